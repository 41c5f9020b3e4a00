//! Core types and the client seam for explorer verification.

use async_trait::async_trait;
use serde::Deserialize;

use super::abi::AbiValue;
use super::{ContractAddress, ExplorerError};

/// Source and compiler metadata for the contract being verified.
///
/// The explorer re-compiles this source with the named compiler release
/// and matches the output against on-chain bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractMetadata {
    /// Flattened Solidity source submitted for re-compilation
    pub source: String,
    /// Source path within the project, e.g. "contracts/OurToken.sol"
    pub source_path: String,
    /// Contract name within the source file
    pub contract_name: String,
    /// Exact compiler release, e.g. "v0.8.19+commit.7dd6d404"
    pub compiler_version: String,
    /// Optimizer runs if optimization was enabled at compile time
    pub optimization_runs: Option<u32>,
}

impl ContractMetadata {
    /// Returns the `path:Name` identifier sent alongside the source.
    ///
    /// Required by explorers to disambiguate contracts that share
    /// identical compiled bytecode.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_path, self.contract_name)
    }
}

/// A single verification submission.
///
/// Carries the exact deployment inputs: target address, the ordered
/// constructor argument list used at deployment, and the contract
/// metadata identifying what to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Deployed contract address
    pub address: ContractAddress,
    /// Ordered constructor arguments as supplied at deployment
    pub constructor_args: Vec<AbiValue>,
    /// Source and compiler identification
    pub metadata: ContractMetadata,
}

/// Explorer-issued token for polling a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// GUID returned by the submit endpoint
    pub guid: String,
}

/// Processing state reported by the explorer's status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Bytecode matched, source is published
    Verified,
    /// Submission still in the explorer's queue
    Pending,
    /// Terminal rejection with the explorer's reason text
    Failed { reason: String },
}

/// JSON envelope every Etherscan-style endpoint answers with.
///
/// `status` is "1" for success and "0" for failure; `result` carries
/// either the payload (a GUID, a status phrase) or the error text.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    pub message: String,
    pub result: String,
}

/// Abstract verification interface for block explorers.
///
/// Implementations handle transport and API details while maintaining
/// consistent error handling. The failure-free trigger in
/// [`crate::verify`] works only through this trait, so scripted
/// implementations can stand in for a live explorer.
#[async_trait]
pub trait VerificationClient: Send + Sync {
    /// Submits source and metadata for verification.
    ///
    /// # Errors
    /// - `ExplorerError::ConnectionFailed` - Network or HTTP error
    /// - `ExplorerError::Rejected` - Explorer refused the submission
    async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<SubmissionReceipt, ExplorerError>;

    /// Checks processing state of a prior submission.
    ///
    /// # Errors
    /// - `ExplorerError::ConnectionFailed` - Network or HTTP error
    /// - `ExplorerError::InvalidResponse` - Malformed status envelope
    async fn check_status(
        &self,
        receipt: &SubmissionReceipt,
    ) -> Result<VerificationStatus, ExplorerError>;

    /// Runs a submission to completion: submit, then poll until the
    /// explorer reports a terminal state.
    ///
    /// # Errors
    /// - `ExplorerError::VerificationFailed` - Explorer rejected the bytecode match
    /// - `ExplorerError::PollBudgetExhausted` - Still pending after the configured checks
    async fn verify_contract(&self, request: &VerificationRequest) -> Result<(), ExplorerError>;

    /// Returns endpoint URL for debugging and logging purposes.
    fn endpoint_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_name() {
        let metadata = ContractMetadata {
            source: "contract OurToken {}".to_string(),
            source_path: "contracts/OurToken.sol".to_string(),
            contract_name: "OurToken".to_string(),
            compiler_version: "v0.8.19+commit.7dd6d404".to_string(),
            optimization_runs: Some(200),
        };
        assert_eq!(
            metadata.fully_qualified_name(),
            "contracts/OurToken.sol:OurToken"
        );
    }

    #[test]
    fn test_envelope_deserialization() {
        let envelope: ApiEnvelope = serde_json::from_str(
            r#"{"status":"1","message":"OK","result":"abc123guid"}"#,
        )
        .unwrap();
        assert_eq!(envelope.status, "1");
        assert_eq!(envelope.message, "OK");
        assert_eq!(envelope.result, "abc123guid");
    }
}
