//! Form validation.
//!
//! Each field of a raw form is validated independently and every failure is collected, so
//! that a caller can show a message next to each offending field. Messages follow the
//! wording users already see on the web form.

use crate::constants::MAX_AGE;
use crate::patient::Age;
use malignet_types::ProteinText;
use serde_json::Value;

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field, e.g. `protein1` or `her2Status`.
    pub field: String,
    pub message: String,
}

/// All validation failures of one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Record the error of `result` under `field`, returning the valid value if there was one.
    pub(crate) fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A closed set of labelled options offered by a select control.
pub trait FormChoice: Sized + Copy {
    /// Labels in display order.
    const LABELS: &'static [&'static str];

    fn from_label(label: &str) -> Option<Self>;

    fn label(&self) -> &'static str;
}

/// Type name of a JSON value as it appears in type-mismatch messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Requires a posted field to be present and a JSON string.
pub fn expect_text(value: Option<&Value>) -> Result<&str, String> {
    match value {
        None => Err("Required".into()),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!(
            "Expected string, received {}",
            json_type_name(other)
        )),
    }
}

/// Requires a posted field to be present and a JSON number.
pub fn expect_number(value: Option<&Value>) -> Result<f64, String> {
    match value {
        None => Err("Required".into()),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| "Expected number, received nan".to_owned()),
        Some(other) => Err(format!(
            "Expected number, received {}",
            json_type_name(other)
        )),
    }
}

/// Validates a protein marker text field (at most six characters, may be empty).
pub fn validate_protein(value: &str) -> Result<ProteinText, String> {
    ProteinText::new(value).map_err(|e| e.to_string())
}

/// Validates a select-control value against the labels of `T`.
pub fn validate_choice<T: FormChoice>(value: &str) -> Result<T, String> {
    T::from_label(value).ok_or_else(|| {
        let expected = T::LABELS
            .iter()
            .map(|l| format!("'{l}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("Invalid enum value. Expected {expected}, received '{value}'")
    })
}

/// Validates an age given as a JSON number: whole years within `0..=120`.
pub fn validate_age(value: f64) -> Result<Age, String> {
    if value.is_nan() {
        return Err("Expected number, received nan".into());
    }
    if value < 0.0 {
        return Err("Number must be greater than or equal to 0".into());
    }
    if value > f64::from(MAX_AGE) {
        return Err(format!(
            "Number must be less than or equal to {}",
            MAX_AGE
        ));
    }
    if value.fract() != 0.0 {
        return Err("Expected integer, received float".into());
    }

    // In range and integral, so the cast is exact.
    Age::new(value as u8).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, ReceptorStatus};

    #[test]
    fn protein_over_six_characters_is_rejected() {
        assert_eq!(validate_protein("1234567").unwrap_err(), "Max 6 characters");
        assert!(validate_protein("abc").is_ok());
        assert!(validate_protein("").is_ok());
    }

    #[test]
    fn choice_accepts_exact_labels_only() {
        assert_eq!(
            validate_choice::<ReceptorStatus>("Positive").unwrap(),
            ReceptorStatus::Positive
        );
        assert_eq!(validate_choice::<Gender>("Other").unwrap(), Gender::Other);

        let err = validate_choice::<ReceptorStatus>("positive").unwrap_err();
        assert_eq!(
            err,
            "Invalid enum value. Expected 'Positive' | 'Negative', received 'positive'"
        );

        let err = validate_choice::<Gender>("").unwrap_err();
        assert_eq!(
            err,
            "Invalid enum value. Expected 'Male' | 'Female' | 'Other', received ''"
        );
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(validate_age(0.0).unwrap().years(), 0);
        assert_eq!(validate_age(120.0).unwrap().years(), 120);
    }

    #[test]
    fn age_outside_bounds_is_rejected() {
        assert_eq!(
            validate_age(-1.0).unwrap_err(),
            "Number must be greater than or equal to 0"
        );
        assert_eq!(
            validate_age(121.0).unwrap_err(),
            "Number must be less than or equal to 120"
        );
        assert_eq!(
            validate_age(f64::INFINITY).unwrap_err(),
            "Number must be less than or equal to 120"
        );
    }

    #[test]
    fn age_must_be_a_whole_number() {
        assert_eq!(
            validate_age(45.5).unwrap_err(),
            "Expected integer, received float"
        );
        assert_eq!(
            validate_age(f64::NAN).unwrap_err(),
            "Expected number, received nan"
        );
    }

    #[test]
    fn posted_values_must_be_present_and_typed() {
        let text = serde_json::json!("Male");
        assert_eq!(expect_text(Some(&text)).unwrap(), "Male");
        assert_eq!(expect_text(None).unwrap_err(), "Required");
        assert_eq!(
            expect_text(Some(&serde_json::json!(3))).unwrap_err(),
            "Expected string, received number"
        );
        assert_eq!(
            expect_text(Some(&Value::Null)).unwrap_err(),
            "Expected string, received null"
        );

        assert_eq!(expect_number(Some(&serde_json::json!(47))).unwrap(), 47.0);
        assert_eq!(expect_number(None).unwrap_err(), "Required");
        assert_eq!(
            expect_number(Some(&serde_json::json!("30"))).unwrap_err(),
            "Expected number, received string"
        );
        assert_eq!(
            expect_number(Some(&serde_json::json!([1]))).unwrap_err(),
            "Expected number, received array"
        );
    }

    #[test]
    fn errors_display_in_field_order() {
        let mut errors = ValidationErrors::new();
        errors.push("protein2", "Max 6 characters");
        errors.push("age", "Expected integer, received float");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_for("age"), Some("Expected integer, received float"));
        assert_eq!(errors.message_for("gender"), None);
        assert_eq!(
            errors.to_string(),
            "protein2: Max 6 characters; age: Expected integer, received float"
        );
    }
}
