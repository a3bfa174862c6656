//! Field-level validation errors

use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

/// One failed rule on one field, suitable for an API error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as submitted (e.g. `password`)
    pub field: String,
    /// Failed rule (e.g. `length`, `email`, `range`)
    pub code: String,
    /// Rule parameters such as `min` and `max`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

/// Flatten `validator` output into a stable, sorted list.
///
/// The offending input is never included: the `value` parameter that
/// `validator` attaches would echo passwords back to the client.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                code: err.code.to_string(),
                params: err
                    .params
                    .iter()
                    .filter(|(key, _)| *key != "value")
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credentials;
    use validator::Validate;

    #[test]
    fn test_field_errors_report_each_field() {
        let creds = Credentials::new("x", "abc");
        let errors = creds.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert!(fields.iter().any(|f| f.field == "email" && f.code == "length"));
        assert!(fields.iter().any(|f| f.field == "email" && f.code == "email"));
        assert!(fields.iter().any(|f| f.field == "password" && f.code == "length"));
    }

    #[test]
    fn test_field_errors_never_echo_input() {
        let creds = Credentials::new("a@x.com", "abc");
        let errors = creds.validate().unwrap_err();
        let fields = field_errors(&errors);

        let password = fields.iter().find(|f| f.field == "password").unwrap();
        assert_eq!(password.params.get("min").map(String::as_str), Some("5"));
        assert_eq!(password.params.get("max").map(String::as_str), Some("20"));
        assert!(!password.params.contains_key("value"));
        assert!(!format!("{fields:?}").contains("abc"));
    }
}
