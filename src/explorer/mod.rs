//! Block-explorer verification abstractions and implementations.
//!
//! HTTP client for Etherscan-compatible contract verification APIs with
//! submission, status polling, and a scripted mock for offline use.

pub mod abi;
pub mod client;
pub mod mock;
pub mod types;

use std::fmt;
use std::str::FromStr;

// Re-export public API
pub use abi::{AbiError, AbiValue};
pub use client::HttpExplorerClient;
pub use mock::MockExplorerClient;
pub use types::{
    ApiEnvelope, ContractMetadata, SubmissionReceipt, VerificationClient, VerificationRequest,
    VerificationStatus,
};

/// 20-byte address of a deployed contract.
///
/// Parsed from `0x`-prefixed hex as emitted by deployment tooling.
/// Displayed lowercase with the `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractAddress([u8; 20]);

impl ContractAddress {
    /// Creates ContractAddress from raw 20-byte value.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns reference to underlying 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parses an address from hex, with or without the `0x` prefix.
    ///
    /// # Errors
    /// - `ExplorerError::InvalidAddress` - Wrong length or non-hex characters
    pub fn parse(input: &str) -> Result<Self, ExplorerError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.len() != 40 {
            return Err(ExplorerError::InvalidAddress {
                input: input.to_string(),
            });
        }

        let raw = hex::decode(digits).map_err(|_| ExplorerError::InvalidAddress {
            input: input.to_string(),
        })?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ContractAddress {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur during explorer verification operations.
///
/// Covers network communication, API rejection, and submission outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("Explorer connection failed: {url}")]
    ConnectionFailed { url: String },

    #[error("Explorer request timed out: {url}")]
    Timeout { url: String },

    #[error("Explorer server error {status}: {url}")]
    ServerError { url: String, status: u16 },

    #[error("Invalid explorer response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Explorer rejected submission: {message}")]
    Rejected { message: String },

    #[error("Verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("Verification still pending after {attempts} status checks")]
    PollBudgetExhausted { attempts: u32 },

    #[error("Invalid contract address: {input}")]
    InvalidAddress { input: String },

    #[error("Constructor argument encoding failed: {0}")]
    Abi(#[from] AbiError),
}

impl ExplorerError {
    /// Checks whether this error reports the contract as already verified.
    ///
    /// Explorers phrase this differently per endpoint ("Contract source
    /// code already verified" on submit, "Already Verified" on status
    /// checks), so detection is a case-insensitive substring match on the
    /// error message.
    pub fn is_already_verified(&self) -> bool {
        self.to_string().to_lowercase().contains("already verified")
    }
}
