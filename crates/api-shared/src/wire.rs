//! JSON wire types.
//!
//! Field names follow the web form (camelCase). Request fields are kept as raw JSON values,
//! so a missing field or a value of the wrong type is reported next to the other invalid
//! fields instead of rejecting the whole body at deserialisation time.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of `POST /api/submit-protein-data`.
///
/// `None` means the field was absent; an explicit `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProteinDataReq {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub protein1: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub protein2: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub protein3: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub protein4: Option<Value>,
    /// `Positive` or `Negative`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub her2_status: Option<Value>,
    /// `Positive` or `Negative`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub er_status: Option<Value>,
    /// `Positive` or `Negative`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub pr_status: Option<Value>,
    /// `Male`, `Female` or `Other`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub gender: Option<Value>,
    /// Whole years, 0 to 120
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = u8)]
    pub age: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Successful response, and the generic failure response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubmitProteinDataRes {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorRes {
    pub field: String,
    pub message: String,
}

/// Returned with `422 Unprocessable Entity` when form validation fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorRes {
    pub message: String,
    pub errors: Vec<FieldErrorRes>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_form_field_names() {
        let req = SubmitProteinDataReq {
            protein1: Some(json!("2")),
            her2_status: Some(json!("Positive")),
            er_status: Some(json!("Negative")),
            pr_status: Some(json!("Negative")),
            gender: Some(json!("Female")),
            age: Some(json!(54)),
            ..SubmitProteinDataReq::default()
        };

        let json = serde_json::to_value(&req).expect("serialise request");
        assert_eq!(json["protein1"], "2");
        assert_eq!(json["her2Status"], "Positive");
        assert_eq!(json["erStatus"], "Negative");
        assert_eq!(json["prStatus"], "Negative");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["age"], 54);
        assert!(json.get("protein2").is_none());
    }

    #[test]
    fn absent_and_mistyped_fields_still_parse() {
        let json = r#"{"protein1":7,"her2Status":null,"erStatus":"Negative","age":"30"}"#;
        let req: SubmitProteinDataReq = serde_json::from_str(json).expect("parse request");
        assert_eq!(req.protein1, Some(json!(7)));
        assert_eq!(req.protein2, None);
        assert_eq!(req.her2_status, Some(Value::Null));
        assert_eq!(req.gender, None);
        assert_eq!(req.age, Some(json!("30")));
    }
}
