use std::sync::OnceLock;

use log::{error, info};
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Default, Clone)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

impl ContactError {
    pub fn status(&self) -> u16 {
        400
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: Value,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn required(field: &Option<String>) -> Result<String, ContactError> {
    field
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ContactError::MissingFields)
}

/// A field counts as present when it is a non-empty string, a non-zero
/// number, `true`, an array or an object. Non-strings are stringified.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        v @ (Value::Array(_) | Value::Object(_)) => Some(v.to_string()),
        _ => None,
    }
}

impl ContactSubmission {
    /// Pick the form fields out of a request body. Bodies that are not
    /// objects simply carry no fields.
    pub fn from_json(body: &Value) -> Self {
        Self {
            name: present(body.get("name")),
            email: present(body.get("email")),
            message: present(body.get("message")),
        }
    }

    pub fn validate(&self) -> Result<ValidSubmission, ContactError> {
        let name = required(&self.name)?;
        let email = required(&self.email)?;
        let message = required(&self.message)?;

        if !email_pattern().is_match(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ValidSubmission {
            name,
            email,
            message,
        })
    }
}

/// Handle a raw JSON request body the way the site's endpoint does.
pub fn handle_submission(body: &str) -> ContactResponse {
    let server_error = ContactResponse {
        status: 500,
        body: json!({ "error": "Internal server error" }),
    };
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            error!("Contact form error: {e}");
            return server_error;
        }
    };
    // null cannot be destructured into fields
    if value.is_null() {
        error!("Contact form error: request body is null");
        return server_error;
    }
    let submission = ContactSubmission::from_json(&value);

    match submission.validate() {
        Ok(valid) => {
            info!(
                "Contact form submission: name={:?} email={:?} message={:?} timestamp={}",
                valid.name,
                valid.email,
                valid.message,
                chrono::Utc::now().to_rfc3339()
            );
            ContactResponse {
                status: 200,
                body: json!({ "success": true, "message": "Message sent successfully" }),
            }
        }
        Err(e) => ContactResponse {
            status: e.status(),
            body: json!({ "error": e.to_string() }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_submission() {
        let response =
            handle_submission(r#"{"name":"Ada","email":"ada@example.com","message":"Hi!"}"#);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({ "success": true, "message": "Message sent successfully" })
        );
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        for body in [
            r#"{"email":"ada@example.com","message":"Hi"}"#,
            r#"{"name":"","email":"ada@example.com","message":"Hi"}"#,
            r#"{"name":"Ada","email":"ada@example.com"}"#,
            r#"{}"#,
        ] {
            let response = handle_submission(body);
            assert_eq!(response.status, 400, "{body}");
            assert_eq!(response.body, json!({ "error": "All fields are required" }));
        }
    }

    #[test]
    fn email_must_look_like_an_address() {
        for email in ["ada", "ada@example", "ada @example.com", "@example.com", "a@b@c.d"] {
            let submission = ContactSubmission {
                name: Some("Ada".into()),
                email: Some(email.into()),
                message: Some("Hi".into()),
            };
            assert_eq!(submission.validate(), Err(ContactError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn bodies_without_fields_are_client_errors() {
        for body in ["[]", r#""text""#, "42", r#"{"name":null,"email":false,"message":0}"#] {
            let response = handle_submission(body);
            assert_eq!(response.status, 400, "{body}");
            assert_eq!(response.body, json!({ "error": "All fields are required" }));
        }
    }

    #[test]
    fn truthy_non_strings_count_as_present() {
        let response =
            handle_submission(r#"{"name":5,"email":"ada@example.com","message":"hi"}"#);
        assert_eq!(response.status, 200);

        let submission = ContactSubmission::from_json(&json!({
            "name": true,
            "email": 7,
            "message": ["a"]
        }));
        assert_eq!(submission.name.as_deref(), Some("true"));
        assert_eq!(submission.validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn null_body_is_a_server_error() {
        assert_eq!(handle_submission("null").status, 500);
    }

    #[test]
    fn malformed_json_is_a_server_error() {
        let response = handle_submission("{not json");
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({ "error": "Internal server error" }));
    }
}
