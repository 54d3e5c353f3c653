use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient data failed validation: {0}")]
    Validation(ValidationErrors),
    #[error("summary request failed: {0}")]
    Transport(String),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

impl From<ValidationErrors> for AssessmentError {
    fn from(errors: ValidationErrors) -> Self {
        AssessmentError::Validation(errors)
    }
}

impl From<reqwest::Error> for AssessmentError {
    fn from(err: reqwest::Error) -> Self {
        AssessmentError::Transport(err.to_string())
    }
}

pub type AssessmentResult<T> = std::result::Result<T, AssessmentError>;
