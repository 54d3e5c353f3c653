//! Patient form data.
//!
//! [`PatientForm`] is the raw record as typed into the form, and [`SubmitProteinDataReq`] the
//! raw record posted to the API. A [`PatientInput`] is only obtained by validating one of them
//! ([`PatientForm::validate`] or `PatientInput::try_from`), so the summary generator never
//! sees a partially-invalid record.

use crate::constants::{MAX_AGE, PROTEIN_COUNT};
use crate::validation::{
    expect_number, expect_text, validate_age, validate_choice, validate_protein, FormChoice,
    ValidationErrors,
};
use crate::{AssessmentError, AssessmentResult};
use api_shared::SubmitProteinDataReq;
use malignet_types::ProteinText;
use serde_json::Value;

/// Hormone-receptor or HER2 status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptorStatus {
    Positive,
    Negative,
}

impl ReceptorStatus {
    pub fn is_positive(self) -> bool {
        self == ReceptorStatus::Positive
    }
}

impl FormChoice for ReceptorStatus {
    const LABELS: &'static [&'static str] = &["Positive", "Negative"];

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Positive" => Some(ReceptorStatus::Positive),
            "Negative" => Some(ReceptorStatus::Negative),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReceptorStatus::Positive => "Positive",
            ReceptorStatus::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FormChoice for Gender {
    const LABELS: &'static [&'static str] = &["Male", "Female", "Other"];

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Patient age in whole years, `0..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u8);

impl Age {
    pub fn new(years: u8) -> AssessmentResult<Self> {
        if years > MAX_AGE {
            return Err(AssessmentError::InvalidInput(format!(
                "age must be at most {} years",
                MAX_AGE
            )));
        }
        Ok(Self(years))
    }

    pub fn years(self) -> u8 {
        self.0
    }
}

/// Raw, unvalidated form record.
///
/// Field names mirror the wire names of the web form. `Default` yields the form's initial
/// values: empty proteins, every status `Positive`, gender `Male`, age `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    pub protein1: String,
    pub protein2: String,
    pub protein3: String,
    pub protein4: String,
    pub her2_status: String,
    pub er_status: String,
    pub pr_status: String,
    pub gender: String,
    pub age: f64,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            protein1: String::new(),
            protein2: String::new(),
            protein3: String::new(),
            protein4: String::new(),
            her2_status: "Positive".into(),
            er_status: "Positive".into(),
            pr_status: "Positive".into(),
            gender: "Male".into(),
            age: 0.0,
        }
    }
}

impl PatientForm {
    /// Validates every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each failing field (by wire name) if any field
    /// is invalid.
    pub fn validate(&self) -> Result<PatientInput, ValidationErrors> {
        validate_fields(RawFields {
            proteins: [
                Ok(self.protein1.as_str()),
                Ok(self.protein2.as_str()),
                Ok(self.protein3.as_str()),
                Ok(self.protein4.as_str()),
            ],
            her2_status: Ok(self.her2_status.as_str()),
            er_status: Ok(self.er_status.as_str()),
            pr_status: Ok(self.pr_status.as_str()),
            gender: Ok(self.gender.as_str()),
            age: Ok(self.age),
        })
    }
}

impl TryFrom<&SubmitProteinDataReq> for PatientInput {
    type Error = ValidationErrors;

    /// Validates a posted record. Absent or mistyped fields are reported alongside the
    /// other failures.
    fn try_from(req: &SubmitProteinDataReq) -> Result<Self, Self::Error> {
        validate_fields(RawFields {
            proteins: [
                expect_text(req.protein1.as_ref()),
                expect_text(req.protein2.as_ref()),
                expect_text(req.protein3.as_ref()),
                expect_text(req.protein4.as_ref()),
            ],
            her2_status: expect_text(req.her2_status.as_ref()),
            er_status: expect_text(req.er_status.as_ref()),
            pr_status: expect_text(req.pr_status.as_ref()),
            gender: expect_text(req.gender.as_ref()),
            age: expect_number(req.age.as_ref()),
        })
    }
}

/// Field values after the type check, before the per-field rules.
struct RawFields<'a> {
    proteins: [Result<&'a str, String>; PROTEIN_COUNT],
    her2_status: Result<&'a str, String>,
    er_status: Result<&'a str, String>,
    pr_status: Result<&'a str, String>,
    gender: Result<&'a str, String>,
    age: Result<f64, String>,
}

fn validate_fields(raw: RawFields<'_>) -> Result<PatientInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let [p1, p2, p3, p4] = raw.proteins;
    let proteins = [
        errors.check("protein1", p1.and_then(validate_protein)),
        errors.check("protein2", p2.and_then(validate_protein)),
        errors.check("protein3", p3.and_then(validate_protein)),
        errors.check("protein4", p4.and_then(validate_protein)),
    ];
    let her2_status = errors.check(
        "her2Status",
        raw.her2_status.and_then(validate_choice::<ReceptorStatus>),
    );
    let er_status = errors.check(
        "erStatus",
        raw.er_status.and_then(validate_choice::<ReceptorStatus>),
    );
    let pr_status = errors.check(
        "prStatus",
        raw.pr_status.and_then(validate_choice::<ReceptorStatus>),
    );
    let gender = errors.check("gender", raw.gender.and_then(validate_choice::<Gender>));
    let age = errors.check("age", raw.age.and_then(validate_age));

    match (proteins, her2_status, er_status, pr_status, gender, age) {
        (
            [Some(p1), Some(p2), Some(p3), Some(p4)],
            Some(her2_status),
            Some(er_status),
            Some(pr_status),
            Some(gender),
            Some(age),
        ) if errors.is_empty() => Ok(PatientInput {
            proteins: [p1, p2, p3, p4],
            her2_status,
            er_status,
            pr_status,
            gender,
            age,
        }),
        _ => Err(errors),
    }
}

/// A validated patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInput {
    proteins: [ProteinText; PROTEIN_COUNT],
    her2_status: ReceptorStatus,
    er_status: ReceptorStatus,
    pr_status: ReceptorStatus,
    gender: Gender,
    age: Age,
}

impl PatientInput {
    /// Protein marker texts in form order (protein1 first).
    pub fn proteins(&self) -> &[ProteinText; PROTEIN_COUNT] {
        &self.proteins
    }

    pub fn her2_status(&self) -> ReceptorStatus {
        self.her2_status
    }

    pub fn er_status(&self) -> ReceptorStatus {
        self.er_status
    }

    pub fn pr_status(&self) -> ReceptorStatus {
        self.pr_status
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> Age {
        self.age
    }

    /// Builds the JSON body sent to a summary backend.
    pub fn to_request(&self) -> SubmitProteinDataReq {
        let [p1, p2, p3, p4] = &self.proteins;
        SubmitProteinDataReq {
            protein1: Some(Value::from(p1.as_str())),
            protein2: Some(Value::from(p2.as_str())),
            protein3: Some(Value::from(p3.as_str())),
            protein4: Some(Value::from(p4.as_str())),
            her2_status: Some(Value::from(self.her2_status.label())),
            er_status: Some(Value::from(self.er_status.label())),
            pr_status: Some(Value::from(self.pr_status.label())),
            gender: Some(Value::from(self.gender.label())),
            age: Some(Value::from(self.age.years())),
        }
    }
}
