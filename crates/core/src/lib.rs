//! # MaligNet Core
//!
//! Core logic for the MaligNet patient risk assessment:
//! - Form validation of protein markers, receptor statuses, gender and age
//! - Rule-based risk-summary generation
//! - Swappable asynchronous summary providers (local, mock delay, HTTP backend)
//! - The submission state machine used by interactive front ends
//!
//! **No API concerns**: HTTP servers and command-line parsing belong in `api-rest` and
//! `malignet-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod provider;
pub mod submission;
pub mod summary;
pub mod validation;

pub use config::{CoreConfig, ProviderKind};
pub use error::{AssessmentError, AssessmentResult};
pub use patient::{Age, Gender, PatientForm, PatientInput, ReceptorStatus};
pub use provider::{
    HttpProvider, LocalProvider, MockDelayProvider, SummaryBackend, SummaryProvider,
};
pub use submission::{Submission, SubmissionState};
pub use summary::{classify_protein, generate_summary, ProteinLevel, RiskSummary};
pub use validation::{FieldError, ValidationErrors};

use api_shared::SubmitProteinDataReq;

/// Stateless assessment operations - no API concerns
#[derive(Clone, Debug)]
pub struct AssessmentService {
    backend: SummaryBackend,
}

impl AssessmentService {
    /// Creates a new `AssessmentService` using the provider selected by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured provider cannot be built.
    pub fn new(cfg: &CoreConfig) -> AssessmentResult<Self> {
        let backend = SummaryBackend::from_config(cfg)?;
        Ok(Self { backend })
    }

    /// Validates a posted record and produces its risk summary.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Validation` if any field is absent, mistyped or invalid, or
    /// the provider's error if producing the summary fails.
    pub async fn assess_request(
        &self,
        req: &SubmitProteinDataReq,
    ) -> AssessmentResult<RiskSummary> {
        let input = PatientInput::try_from(req)?;
        self.backend.submit(&input).await
    }
}
