//! Summary providers.
//!
//! A provider turns a validated record into a [`RiskSummary`] asynchronously. The local and
//! mock-delay providers run the rule-based generator in-process; the HTTP provider posts the
//! record to a summary backend and republishes the message it answers with.

use std::future::Future;
use std::time::Duration;

use api_shared::SubmitProteinDataRes;

use crate::config::{CoreConfig, ProviderKind};
use crate::constants::SUBMIT_PROTEIN_DATA_PATH;
use crate::patient::PatientInput;
use crate::summary::{generate_summary, RiskSummary};
use crate::{AssessmentError, AssessmentResult};

/// Produces a risk summary for a validated record.
pub trait SummaryProvider {
    fn submit(
        &self,
        input: &PatientInput,
    ) -> impl Future<Output = AssessmentResult<RiskSummary>> + Send;
}

/// Generates the summary immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalProvider;

impl SummaryProvider for LocalProvider {
    async fn submit(&self, input: &PatientInput) -> AssessmentResult<RiskSummary> {
        Ok(generate_summary(input))
    }
}

/// Generates the summary after a fixed artificial delay.
#[derive(Clone, Copy, Debug)]
pub struct MockDelayProvider {
    delay: Duration,
}

impl MockDelayProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SummaryProvider for MockDelayProvider {
    async fn submit(&self, input: &PatientInput) -> AssessmentResult<RiskSummary> {
        tracing::debug!(delay = ?self.delay, "simulating analysis");
        tokio::time::sleep(self.delay).await;
        Ok(generate_summary(input))
    }
}

/// Posts the record to `{base_url}/api/submit-protein-data`.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpProvider {
    /// Creates a provider for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AssessmentResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SUBMIT_PROTEIN_DATA_PATH)
    }
}

impl SummaryProvider for HttpProvider {
    async fn submit(&self, input: &PatientInput) -> AssessmentResult<RiskSummary> {
        let url = self.endpoint();
        tracing::debug!(%url, "posting patient data");

        let res = self
            .client
            .post(&url)
            .json(&input.to_request())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AssessmentError::Transport(format!(
                "summary backend responded with {status}"
            )));
        }

        let body: SubmitProteinDataRes = res.json().await?;
        Ok(RiskSummary::new(body.message))
    }
}

/// The provider selected by configuration.
#[derive(Clone, Debug)]
pub enum SummaryBackend {
    Local(LocalProvider),
    MockDelay(MockDelayProvider),
    Http(HttpProvider),
}

impl SummaryBackend {
    /// Builds the provider named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP provider is selected and its client cannot be built, or
    /// no summary URL is configured.
    pub fn from_config(cfg: &CoreConfig) -> AssessmentResult<Self> {
        match cfg.provider() {
            ProviderKind::Local => Ok(SummaryBackend::Local(LocalProvider)),
            ProviderKind::MockDelay => Ok(SummaryBackend::MockDelay(MockDelayProvider::new(
                cfg.mock_delay(),
            ))),
            ProviderKind::Http => {
                let url = cfg.summary_url().ok_or_else(|| {
                    AssessmentError::InvalidInput(
                        "summary URL is required for the http provider".into(),
                    )
                })?;
                Ok(SummaryBackend::Http(HttpProvider::new(
                    url,
                    cfg.request_timeout(),
                )?))
            }
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            SummaryBackend::Local(_) => ProviderKind::Local,
            SummaryBackend::MockDelay(_) => ProviderKind::MockDelay,
            SummaryBackend::Http(_) => ProviderKind::Http,
        }
    }
}

impl SummaryProvider for SummaryBackend {
    async fn submit(&self, input: &PatientInput) -> AssessmentResult<RiskSummary> {
        match self {
            SummaryBackend::Local(p) => p.submit(input).await,
            SummaryBackend::MockDelay(p) => p.submit(input).await,
            SummaryBackend::Http(p) => p.submit(input).await,
        }
    }
}
