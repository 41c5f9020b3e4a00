//! Failure-free verification trigger for deployment pipelines.
//!
//! Deployment scripts call [`Verifier::verify`] right after a contract
//! lands on chain. Verification is best-effort bookkeeping: a contract
//! that is already verified is a success, and no verification failure
//! should ever abort the deployment that triggered it, so the trigger
//! logs every outcome and swallows every error.

use std::sync::Arc;

use crate::explorer::{
    AbiValue, ContractAddress, ContractMetadata, VerificationClient, VerificationRequest,
};

/// Verification trigger bound to one contract's source and metadata.
///
/// Holds the client seam and the fixed fully-qualified contract identity,
/// so callers only supply what changes per deployment: the address and
/// the constructor arguments.
pub struct Verifier {
    client: Arc<dyn VerificationClient>,
    metadata: ContractMetadata,
}

impl Verifier {
    /// Creates a verifier for the contract described by `metadata`.
    pub fn new(client: Arc<dyn VerificationClient>, metadata: ContractMetadata) -> Self {
        Self { client, metadata }
    }

    /// Triggers source verification for a freshly deployed contract.
    ///
    /// Logs the inputs, hands the exact address and constructor argument
    /// list to the verification client together with the fixed
    /// fully-qualified contract identifier, and always resolves:
    /// an "already verified" response counts as success, and every other
    /// error is logged and swallowed.
    pub async fn verify(&self, address: ContractAddress, args: &[AbiValue]) {
        tracing::info!(
            "Verifying contract {} via {}",
            address,
            self.client.endpoint_url()
        );
        tracing::info!("Constructor args: {:?}", args);

        let request = VerificationRequest {
            address,
            constructor_args: args.to_vec(),
            metadata: self.metadata.clone(),
        };

        match self.client.verify_contract(&request).await {
            Ok(()) => {
                tracing::info!(
                    "Contract {} verified as {}",
                    address,
                    self.metadata.fully_qualified_name()
                );
            }
            Err(e) if e.is_already_verified() => {
                tracing::info!("Contract {} already verified", address);
            }
            Err(e) => {
                tracing::warn!("Verification of {} failed: {}", address, e);
            }
        }
    }
}
