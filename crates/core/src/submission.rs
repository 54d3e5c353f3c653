//! Submission state machine.
//!
//! `Idle -> Submitting -> Succeeded(message) | Failed(message)`. While a submission is in
//! flight no other may start; once it resolves exactly one of the success or failure
//! messages is shown and submitting is possible again.

use crate::constants::GENERIC_FAILURE_MESSAGE;
use crate::patient::PatientForm;
use crate::provider::SummaryProvider;
use crate::summary::RiskSummary;
use crate::{AssessmentError, AssessmentResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// Drives one form's submissions through a [`SummaryProvider`].
#[derive(Debug)]
pub struct Submission<P> {
    provider: P,
    state: SubmissionState,
}

impl<P: SummaryProvider> Submission<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
    }

    /// The success or failure message of the last resolved submission.
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Succeeded(m) | SubmissionState::Failed(m) => Some(m),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }

    /// Enter `Submitting`, clearing any previous message.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SubmissionInFlight` if a submission is already in flight.
    pub fn begin(&mut self) -> AssessmentResult<()> {
        if self.state.is_submitting() {
            tracing::warn!("submission rejected: another submission is in flight");
            return Err(AssessmentError::SubmissionInFlight);
        }
        self.state = SubmissionState::Submitting;
        tracing::info!("submission started");
        Ok(())
    }

    /// Resolve the in-flight submission with the provider's result.
    ///
    /// Provider errors are logged and replaced by the generic failure message. Calling this
    /// when nothing is in flight leaves the state unchanged.
    pub fn finish(&mut self, result: AssessmentResult<RiskSummary>) -> &SubmissionState {
        if !self.state.is_submitting() {
            tracing::warn!("finish called with no submission in flight");
            return &self.state;
        }

        self.state = match result {
            Ok(summary) => {
                tracing::info!("submission succeeded");
                SubmissionState::Succeeded(summary.into_string())
            }
            Err(e) => {
                tracing::error!("submission failed: {e}");
                SubmissionState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
        &self.state
    }

    /// Validate `form`, then run one submission through the provider.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Validation` (state untouched) if the form is invalid, or
    /// `AssessmentError::SubmissionInFlight` if a submission is already in flight. Provider
    /// failures are not errors here: they resolve to `SubmissionState::Failed`.
    pub async fn submit(&mut self, form: &PatientForm) -> AssessmentResult<&SubmissionState> {
        let input = form.validate()?;
        self.begin()?;
        let result = self.provider.submit(&input).await;
        Ok(self.finish(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientInput;
    use crate::provider::LocalProvider;
    use crate::summary::generate_summary;

    struct FailingProvider;

    impl SummaryProvider for FailingProvider {
        async fn submit(&self, _input: &PatientInput) -> AssessmentResult<RiskSummary> {
            Err(AssessmentError::Transport("connection refused".into()))
        }
    }

    fn form() -> PatientForm {
        PatientForm {
            protein1: "2".into(),
            protein2: "-2".into(),
            protein3: "0.5".into(),
            protein4: "abc".into(),
            pr_status: "Negative".into(),
            ..PatientForm::default()
        }
    }

    #[test]
    fn starts_idle_and_enabled() {
        let submission = Submission::new(LocalProvider);
        assert_eq!(submission.state(), &SubmissionState::Idle);
        assert!(submission.can_submit());
        assert_eq!(submission.message(), None);
    }

    #[tokio::test]
    async fn successful_submission_shows_summary() {
        let mut submission = Submission::new(LocalProvider);
        let expected = generate_summary(&form().validate().unwrap()).into_string();

        let state = submission.submit(&form()).await.unwrap().clone();

        assert_eq!(state, SubmissionState::Succeeded(expected.clone()));
        assert_eq!(submission.message(), Some(expected.as_str()));
        assert!(submission.can_submit());
    }

    #[tokio::test]
    async fn provider_failure_shows_generic_message() {
        let mut submission = Submission::new(FailingProvider);

        let state = submission.submit(&form()).await.unwrap().clone();

        assert_eq!(
            state,
            SubmissionState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
        assert!(submission.can_submit());
    }

    #[tokio::test]
    async fn invalid_form_blocks_submission() {
        let mut submission = Submission::new(LocalProvider);
        let bad = PatientForm {
            age: 130.0,
            ..form()
        };

        let err = submission.submit(&bad).await.expect_err("should not submit");
        match err {
            AssessmentError::Validation(errors) => {
                assert_eq!(
                    errors.message_for("age"),
                    Some("Number must be less than or equal to 120")
                );
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert_eq!(submission.state(), &SubmissionState::Idle);
    }

    #[test]
    fn submit_is_disabled_while_in_flight() {
        let mut submission = Submission::new(LocalProvider);
        submission.begin().unwrap();

        assert!(!submission.can_submit());
        assert_eq!(submission.message(), None);
        assert!(matches!(
            submission.begin(),
            Err(AssessmentError::SubmissionInFlight)
        ));

        submission.finish(Ok(RiskSummary::new("done")));
        assert!(submission.can_submit());
        assert_eq!(submission.message(), Some("done"));
    }

    #[test]
    fn new_submission_clears_previous_message() {
        let mut submission = Submission::new(LocalProvider);
        submission.begin().unwrap();
        submission.finish(Err(AssessmentError::Transport("boom".into())));
        assert_eq!(submission.message(), Some(GENERIC_FAILURE_MESSAGE));

        submission.begin().unwrap();
        assert_eq!(submission.state(), &SubmissionState::Submitting);
        assert_eq!(submission.message(), None);
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut submission = Submission::new(LocalProvider);
        submission.finish(Ok(RiskSummary::new("stray")));
        assert_eq!(submission.state(), &SubmissionState::Idle);
    }
}
