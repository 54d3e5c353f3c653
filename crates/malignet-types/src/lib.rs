/// Maximum number of characters accepted in a protein marker field.
pub const MAX_PROTEIN_TEXT_LEN: usize = 6;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was longer than the field allows
    #[error("Max {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Free-text protein marker value as typed into the form.
///
/// The value is kept verbatim (no trimming) so that numeric interpretation happens in one
/// place, the summary generator. Empty text is allowed. Length is counted in characters,
/// not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProteinText(String);

impl ProteinText {
    /// Creates a new `ProteinText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ProteinText)` if the input has at most [`MAX_PROTEIN_TEXT_LEN`] characters,
    /// or `Err(TextError::TooLong)` otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        let actual = input.chars().count();
        if actual > MAX_PROTEIN_TEXT_LEN {
            return Err(TextError::TooLong {
                max: MAX_PROTEIN_TEXT_LEN,
                actual,
            });
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ProteinText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProteinText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ProteinText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ProteinText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProteinText::new(&s).map_err(serde::de::Error::custom)
    }
}
