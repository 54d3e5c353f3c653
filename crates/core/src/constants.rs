//! Constants used throughout the MaligNet core crate.
//!
//! This module keeps the fixed advisory wording, thresholds and defaults in one place so
//! that the generator, the providers and the API all agree.

/// Number of protein marker fields on the form.
pub const PROTEIN_COUNT: usize = 4;

/// A parsed protein value strictly above this is reported as elevated.
pub const ELEVATED_THRESHOLD: f64 = 1.0;

/// A parsed protein value strictly below this is reported as lower than normal.
pub const LOWERED_THRESHOLD: f64 = -1.0;

/// Inclusive upper bound for patient age in years.
pub const MAX_AGE: u8 = 120;

/// Appended when both ER and PR are positive.
pub const HORMONE_THERAPY_ADVICE: &str = "Since both ER and PR are positive, hormone therapy could be an effective way to slow or block the growth of breast cancer cells. Other options like surgery, chemotherapy, and radiation therapy may also help in treatment.";

/// Appended when HER2 is positive.
pub const HER2_THERAPY_ADVICE: &str = "HER2-positive breast cancer responds well to targeted therapies, like trastuzumab (Herceptin), which can help block cancer cell growth.";

/// The only message shown to a user when producing a summary fails.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

/// Path of the summary endpoint, relative to the backend base URL.
pub const SUBMIT_PROTEIN_DATA_PATH: &str = "/api/submit-protein-data";

/// Artificial delay used by the mock provider when none is configured.
pub const DEFAULT_MOCK_DELAY_MS: u64 = 2000;

/// Timeout applied to requests made by the HTTP provider when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
