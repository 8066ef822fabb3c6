use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::error::CustomError;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";

/// Whether an update replaces every writable field or only the ones sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

impl UpdateMode {
    pub fn is_partial(self) -> bool {
        matches!(self, UpdateMode::Partial)
    }
}

/// Field name to messages, rendered under `"errors"` in a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), CustomError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CustomError::ValidationError(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A request field as it arrived. Pair with `#[serde(default)]` so a missing
/// key becomes `Absent` and an explicit `null` stays distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
    /// Holds the JSON type that was sent instead.
    Invalid(&'static str),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Field::Null);
        }

        let kind = json_type(&value);
        match T::deserialize(value) {
            Ok(parsed) => Ok(Field::Value(parsed)),
            Err(_) => Ok(Field::Invalid(kind)),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Checks a text field. `required` decides whether an absent value is an error;
/// `null`, blanks and non-strings are always rejected.
pub fn text_field(
    errors: &mut FieldErrors,
    field: &str,
    value: Field<String>,
    required: bool,
) -> Option<String> {
    match value {
        Field::Absent => {
            if required {
                errors.add(field, REQUIRED);
            }
            None
        }
        Field::Null => {
            errors.add(field, NULL);
            None
        }
        Field::Invalid(_) => {
            errors.add(field, NOT_A_STRING);
            None
        }
        Field::Value(text) if text.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Field::Value(text) => Some(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default)]
        group: Field<i64>,
    }

    #[test]
    fn missing_required_text_is_reported() {
        let mut errors = FieldErrors::default();
        assert_eq!(text_field(&mut errors, "text", Field::Absent, true), None);
        assert_eq!(errors.get("text"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn blank_text_is_rejected_even_when_optional() {
        let mut errors = FieldErrors::default();
        text_field(&mut errors, "text", Field::Value("   ".into()), false);
        assert_eq!(errors.get("text"), Some(&[BLANK.to_string()][..]));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn null_text_is_rejected_even_when_optional() {
        let mut errors = FieldErrors::default();
        assert_eq!(text_field(&mut errors, "text", Field::Null, false), None);
        assert_eq!(errors.get("text"), Some(&[NULL.to_string()][..]));
    }

    #[test]
    fn absent_optional_text_is_fine() {
        let mut errors = FieldErrors::default();
        assert_eq!(text_field(&mut errors, "text", Field::Absent, false), None);
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn field_separates_absent_null_and_wrong_types() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"group": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"group": 3}"#).unwrap();
        let wrong: Patch = serde_json::from_str(r#"{"group": "abc"}"#).unwrap();

        assert_eq!(absent.group, Field::Absent);
        assert_eq!(null.group, Field::Null);
        assert_eq!(set.group, Field::Value(3));
        assert_eq!(wrong.group, Field::Invalid("str"));
    }

    #[test]
    fn non_string_text_is_a_field_error() {
        let mut errors = FieldErrors::default();
        text_field(&mut errors, "text", Field::Invalid("number"), true);
        assert_eq!(errors.get("text"), Some(&[NOT_A_STRING.to_string()][..]));
    }
}
