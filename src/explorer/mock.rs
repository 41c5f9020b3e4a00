//! Scripted explorer client for offline development and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{
    SubmissionReceipt, VerificationClient, VerificationRequest, VerificationStatus,
};
use super::ExplorerError;

/// Mock verification client with scripted outcomes.
///
/// Records every request it receives so tests can assert exactly what
/// the external call was handed. Outcomes are consumed in order; once
/// the script is exhausted every call succeeds.
pub struct MockExplorerClient {
    endpoint: String,
    outcomes: Mutex<VecDeque<Result<(), ExplorerError>>>,
    requests: Mutex<Vec<VerificationRequest>>,
}

impl Default for MockExplorerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExplorerClient {
    /// Creates a mock client that accepts every submission.
    pub fn new() -> Self {
        Self {
            endpoint: "mock://explorer".to_string(),
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the outcome of the next unscripted verification call.
    pub fn with_outcome(self, outcome: Result<(), ExplorerError>) -> Self {
        self.outcomes
            .lock()
            .expect("mock outcome lock poisoned")
            .push_back(outcome);
        self
    }

    /// Returns copies of every request handed to this client, in order.
    pub fn recorded_requests(&self) -> Vec<VerificationRequest> {
        self.requests
            .lock()
            .expect("mock request lock poisoned")
            .clone()
    }

    fn record(&self, request: &VerificationRequest) {
        self.requests
            .lock()
            .expect("mock request lock poisoned")
            .push(request.clone());
    }

    fn next_outcome(&self) -> Result<(), ExplorerError> {
        self.outcomes
            .lock()
            .expect("mock outcome lock poisoned")
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

#[async_trait]
impl VerificationClient for MockExplorerClient {
    async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<SubmissionReceipt, ExplorerError> {
        self.record(request);
        self.next_outcome()?;
        Ok(SubmissionReceipt {
            guid: format!("mock-guid-{}", request.address),
        })
    }

    async fn check_status(
        &self,
        _receipt: &SubmissionReceipt,
    ) -> Result<VerificationStatus, ExplorerError> {
        Ok(VerificationStatus::Verified)
    }

    async fn verify_contract(&self, request: &VerificationRequest) -> Result<(), ExplorerError> {
        self.record(request);
        self.next_outcome()
    }

    fn endpoint_url(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::abi::AbiValue;
    use crate::explorer::{ContractAddress, ContractMetadata};

    fn create_test_request() -> VerificationRequest {
        VerificationRequest {
            address: ContractAddress::new([0x11; 20]),
            constructor_args: vec![AbiValue::Uint(42)],
            metadata: ContractMetadata {
                source: "contract OurToken {}".to_string(),
                source_path: "contracts/OurToken.sol".to_string(),
                contract_name: "OurToken".to_string(),
                compiler_version: "v0.8.19+commit.7dd6d404".to_string(),
                optimization_runs: None,
            },
        }
    }

    #[tokio::test]
    async fn test_mock_records_requests_in_order() {
        let client = MockExplorerClient::new();
        let request = create_test_request();

        client.verify_contract(&request).await.unwrap();
        client.verify_contract(&request).await.unwrap();

        let recorded = client.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0], request);
    }

    #[tokio::test]
    async fn test_mock_scripted_outcomes_are_consumed_in_order() {
        let client = MockExplorerClient::new()
            .with_outcome(Err(ExplorerError::Rejected {
                message: "Contract source code already verified".to_string(),
            }))
            .with_outcome(Ok(()));
        let request = create_test_request();

        let first = client.verify_contract(&request).await;
        assert!(first.unwrap_err().is_already_verified());

        assert!(client.verify_contract(&request).await.is_ok());
        // Script exhausted, further calls succeed
        assert!(client.verify_contract(&request).await.is_ok());
    }
}
