//! Sourcematch - block-explorer source verification for deployed contracts
//!
//! Submits contract source and compiler metadata to an Etherscan-compatible
//! explorer API so deployed bytecode can be matched to human-readable source,
//! and exposes a failure-free verification trigger suitable for deployment
//! pipelines that must never abort on a verification hiccup.

pub mod config;
pub mod explorer;
pub mod tracing_setup;
pub mod verify;

// Re-export main types for convenient access
pub use config::SourcematchConfig;
pub use explorer::{
    AbiValue, ContractAddress, ContractMetadata, ExplorerError, HttpExplorerClient,
    MockExplorerClient, VerificationClient, VerificationRequest,
};
pub use verify::Verifier;

pub type Result<T> = std::result::Result<T, ExplorerError>;
