//! HTTP explorer client speaking the Etherscan contract-verification API.

use std::time::Duration;

use async_trait::async_trait;

use super::abi;
use super::types::{
    ApiEnvelope, SubmissionReceipt, VerificationClient, VerificationRequest, VerificationStatus,
};
use super::ExplorerError;
use crate::config::SourcematchConfig;

/// HTTP verification client for Etherscan-compatible explorers.
///
/// Submits verification requests as form posts and drives the status
/// poll loop until the explorer reaches a terminal state.
pub struct HttpExplorerClient {
    pub(super) api_url: String,
    pub(super) api_key: String,
    pub(super) poll_interval: Duration,
    pub(super) max_status_polls: u32,
    pub(super) client: reqwest::Client,
}

impl HttpExplorerClient {
    /// Creates an HTTP explorer client from configuration.
    ///
    /// Uses network configuration for timeout and user agent settings.
    ///
    /// # Errors
    /// - `ExplorerError::InvalidResponse` - Endpoint URL does not parse
    pub fn new(config: &SourcematchConfig) -> Result<Self, ExplorerError> {
        // Catch endpoint typos up front instead of on the first submit
        url::Url::parse(&config.explorer.api_url).map_err(|e| {
            ExplorerError::InvalidResponse {
                reason: format!("Invalid explorer API URL {}: {e}", config.explorer.api_url),
            }
        })?;

        Ok(Self {
            api_url: config.explorer.api_url.clone(),
            api_key: config.explorer.api_key.clone(),
            poll_interval: config.network.poll_interval,
            max_status_polls: config.network.max_status_polls,
            client: reqwest::Client::builder()
                .timeout(config.network.request_timeout)
                .user_agent(config.network.user_agent)
                .redirect(reqwest::redirect::Policy::limited(3))
                .build()
                .expect("HTTP client creation should not fail"),
        })
    }

    /// Builds the form body for a verifysourcecode submission.
    ///
    /// # Errors
    /// - `ExplorerError::Abi` - Constructor arguments fail to encode
    pub(super) fn build_submit_form(
        &self,
        request: &VerificationRequest,
    ) -> Result<Vec<(&'static str, String)>, ExplorerError> {
        let constructor_blob = abi::encode_hex(&request.constructor_args)?;
        let optimization_used = if request.metadata.optimization_runs.is_some() {
            "1"
        } else {
            "0"
        };

        let mut form = vec![
            ("apikey", self.api_key.clone()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", request.metadata.source.clone()),
            ("codeformat", "solidity-single-file".to_string()),
            ("contractname", request.metadata.fully_qualified_name()),
            ("compilerversion", request.metadata.compiler_version.clone()),
            ("optimizationUsed", optimization_used.to_string()),
            // The API's historical field spelling, not a typo here
            ("constructorArguements", constructor_blob),
        ];
        if let Some(runs) = request.metadata.optimization_runs {
            form.push(("runs", runs.to_string()));
        }

        Ok(form)
    }

    /// Builds the form body for a checkverifystatus poll.
    pub(super) fn build_status_form(
        &self,
        receipt: &SubmissionReceipt,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.clone()),
            ("module", "contract".to_string()),
            ("action", "checkverifystatus".to_string()),
            ("guid", receipt.guid.clone()),
        ]
    }

    /// Interpret a submit envelope: success carries the polling GUID,
    /// failure carries the explorer's rejection text.
    pub(super) fn parse_submit_envelope(
        envelope: ApiEnvelope,
    ) -> Result<SubmissionReceipt, ExplorerError> {
        if envelope.status == "1" {
            Ok(SubmissionReceipt {
                guid: envelope.result,
            })
        } else {
            Err(ExplorerError::Rejected {
                message: envelope.result,
            })
        }
    }

    /// Interpret a status envelope.
    ///
    /// The status endpoint reports "Pending in queue" with a failure
    /// status code, so pending detection runs before the status check.
    /// Only that exact phrase counts; terminal failure texts that happen
    /// to mention pending submissions must not keep the poll loop alive.
    pub(super) fn parse_status_envelope(
        envelope: ApiEnvelope,
    ) -> Result<VerificationStatus, ExplorerError> {
        if envelope.result.contains("Pending in queue") {
            return Ok(VerificationStatus::Pending);
        }

        if envelope.status == "1" {
            Ok(VerificationStatus::Verified)
        } else {
            Ok(VerificationStatus::Failed {
                reason: envelope.result,
            })
        }
    }

    async fn post_form(
        &self,
        form: &[(&'static str, String)],
    ) -> Result<ApiEnvelope, ExplorerError> {
        let response = self
            .client
            .post(&self.api_url)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("HTTP request to {} failed: {}", self.api_url, e);

                if e.is_timeout() {
                    ExplorerError::Timeout {
                        url: self.api_url.clone(),
                    }
                } else {
                    ExplorerError::ConnectionFailed {
                        url: self.api_url.clone(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Explorer {} returned error status: {}", self.api_url, status);
            return Err(match status.as_u16() {
                500..=599 => ExplorerError::ServerError {
                    url: self.api_url.clone(),
                    status: status.as_u16(),
                },
                _ => ExplorerError::ConnectionFailed {
                    url: self.api_url.clone(),
                },
            });
        }

        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|e| ExplorerError::InvalidResponse {
                reason: format!("Failed to decode explorer envelope: {e}"),
            })
    }
}

#[async_trait]
impl VerificationClient for HttpExplorerClient {
    async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<SubmissionReceipt, ExplorerError> {
        let form = self.build_submit_form(request)?;
        tracing::debug!(
            "Submitting {} for verification as {}",
            request.address,
            request.metadata.fully_qualified_name()
        );

        let envelope = self.post_form(&form).await?;
        Self::parse_submit_envelope(envelope)
    }

    async fn check_status(
        &self,
        receipt: &SubmissionReceipt,
    ) -> Result<VerificationStatus, ExplorerError> {
        let form = self.build_status_form(receipt);
        let envelope = self.post_form(&form).await?;
        Self::parse_status_envelope(envelope)
    }

    /// Submits and polls until the explorer reports a terminal state.
    ///
    /// # Errors
    /// - `ExplorerError::VerificationFailed` - Explorer could not match the bytecode
    /// - `ExplorerError::PollBudgetExhausted` - Pending after all configured checks
    async fn verify_contract(&self, request: &VerificationRequest) -> Result<(), ExplorerError> {
        let receipt = self.submit(request).await?;
        tracing::debug!(
            "Explorer {} accepted submission, guid {}",
            self.api_url,
            receipt.guid
        );

        poll_until_terminal(self, &receipt, self.poll_interval, self.max_status_polls).await
    }

    fn endpoint_url(&self) -> &str {
        &self.api_url
    }
}

/// Polls the status endpoint until the explorer reports a terminal state.
///
/// Works over the client seam so any `VerificationClient` can drive it.
///
/// # Errors
/// - `ExplorerError::VerificationFailed` - Explorer could not match the bytecode
/// - `ExplorerError::PollBudgetExhausted` - Still pending after `max_status_polls` checks
pub(super) async fn poll_until_terminal(
    client: &dyn VerificationClient,
    receipt: &SubmissionReceipt,
    poll_interval: Duration,
    max_status_polls: u32,
) -> Result<(), ExplorerError> {
    for attempt in 1..=max_status_polls {
        tokio::time::sleep(poll_interval).await;

        match client.check_status(receipt).await? {
            VerificationStatus::Verified => {
                tracing::debug!(
                    "Submission {} verified on status check {}",
                    receipt.guid,
                    attempt
                );
                return Ok(());
            }
            VerificationStatus::Pending => {
                tracing::debug!(
                    "Submission {} still pending after status check {}",
                    receipt.guid,
                    attempt
                );
            }
            VerificationStatus::Failed { reason } => {
                return Err(ExplorerError::VerificationFailed { reason });
            }
        }
    }

    Err(ExplorerError::PollBudgetExhausted {
        attempts: max_status_polls,
    })
}
