//! Risk-summary generation.
//!
//! A pure mapping from a validated [`PatientInput`] to advisory text. One fragment per protein
//! marker, in form order, followed by the receptor-status advice that applies.

use crate::constants::{
    ELEVATED_THRESHOLD, HER2_THERAPY_ADVICE, HORMONE_THERAPY_ADVICE, LOWERED_THRESHOLD,
};
use crate::patient::PatientInput;

/// The generated advisory text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RiskSummary(String);

impl RiskSummary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a single protein marker reads against the healthy band `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProteinLevel {
    Elevated,
    Lowered,
    Healthy,
}

impl ProteinLevel {
    /// Sentence for protein number `position` (1-based).
    pub fn describe(self, position: usize) -> String {
        match self {
            ProteinLevel::Elevated => format!("Protein {position} levels are elevated."),
            ProteinLevel::Lowered => format!("Protein {position} levels are lower than normal."),
            ProteinLevel::Healthy => format!("Protein {position} is within a healthy range."),
        }
    }
}

/// Classifies raw protein text.
///
/// Text without a numeric prefix reads as healthy; it is not an error.
pub fn classify_protein(text: &str) -> ProteinLevel {
    match parse_leading_float(text) {
        Some(v) if v > ELEVATED_THRESHOLD => ProteinLevel::Elevated,
        Some(v) if v < LOWERED_THRESHOLD => ProteinLevel::Lowered,
        _ => ProteinLevel::Healthy,
    }
}

/// Builds the risk summary for a validated patient record.
pub fn generate_summary(input: &PatientInput) -> RiskSummary {
    let mut text = input
        .proteins()
        .iter()
        .enumerate()
        .map(|(i, p)| classify_protein(p.as_str()).describe(i + 1))
        .collect::<Vec<_>>()
        .join(" ");

    if input.er_status().is_positive() && input.pr_status().is_positive() {
        text.push(' ');
        text.push_str(HORMONE_THERAPY_ADVICE);
    }
    if input.her2_status().is_positive() {
        text.push(' ');
        text.push_str(HER2_THERAPY_ADVICE);
    }

    tracing::debug!(age = input.age().years(), "generated risk summary");

    RiskSummary(text)
}

/// Reads the longest numeric prefix of `text`, the way a lenient form parser does.
///
/// Leading whitespace (including a byte-order mark) is skipped and an optional sign is accepted. Then either `Infinity`
/// or a decimal with optional fraction and exponent is read; trailing characters are
/// ignored. Returns `None` when no digits start the text.
fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}
