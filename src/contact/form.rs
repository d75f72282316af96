//! Contact form payload and its field rules

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

use crate::content::ServiceCategory;

/// Digits, spaces, `+`, `-` and parentheses
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9 +\-()]*$").unwrap());

/// Order in which field violations are reported
const FIELD_ORDER: [&str; 5] = ["name", "email", "phone", "message", "service"];

/// One rule violation, as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A submission that passed every rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub service: ServiceCategory,
}

/// Form fields as read from an untyped payload; blank strings become `None`
#[derive(Debug, Default, Validate)]
pub struct ContactRequest {
    #[validate(
        required(message = "Укажите имя"),
        length(min = 2, max = 100, message = "Имя должно содержать от 2 до 100 символов")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Укажите email"),
        email(message = "Укажите корректный email")
    )]
    pub email: Option<String>,

    #[validate(regex(
        path = "*PHONE_REGEX",
        message = "Телефон может содержать только цифры, пробелы, +, - и скобки"
    ))]
    pub phone: Option<String>,

    #[validate(
        required(message = "Введите сообщение"),
        length(min = 10, max = 1000, message = "Сообщение должно содержать от 10 до 1000 символов")
    )]
    pub message: Option<String>,

    #[validate(required(message = "Выберите направление"))]
    pub service: Option<ServiceCategory>,

    /// Fields whose raw value had the wrong type; these replace rule checks
    type_errors: Vec<FieldError>,
}

impl ContactRequest {
    /// Read the form fields out of any JSON value
    pub fn from_value(payload: &Value) -> Self {
        let mut request = ContactRequest::default();

        request.name = request.read_string(payload, "name");
        request.email = request.read_string(payload, "email");
        request.phone = request.read_string(payload, "phone");
        request.message = request.read_string(payload, "message");
        request.service = request
            .read_string(payload, "service")
            .and_then(|raw| match raw.parse::<ServiceCategory>() {
                Ok(category) => Some(category),
                Err(_) => {
                    request
                        .type_errors
                        .push(FieldError::new("service", "Выберите направление"));
                    None
                }
            });

        request
    }

    /// Trimmed string field; a non-string value is a type error
    fn read_string(&mut self, payload: &Value, field: &str) -> Option<String> {
        match payload.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Some(_) => {
                self.type_errors
                    .push(FieldError::new(field, "Ожидается строка"));
                None
            }
        }
    }

    /// Apply every rule, returning all violations at once
    pub fn into_submission(self) -> Result<ContactSubmission, Vec<FieldError>> {
        let errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_errors(&errors),
        };

        let details = merge_errors(&self.type_errors, errors);
        if !details.is_empty() {
            return Err(details);
        }

        // Every `None` below has already produced a `required` or type error
        let ContactRequest {
            name: Some(name),
            email: Some(email),
            phone,
            message: Some(message),
            service: Some(service),
            ..
        } = self
        else {
            unreachable!("a missing required field always yields a field error");
        };

        Ok(ContactSubmission {
            name,
            email,
            phone,
            message,
            service,
        })
    }
}

/// Validate a raw payload into a submission
pub fn parse_submission(payload: &Value) -> Result<ContactSubmission, Vec<FieldError>> {
    ContactRequest::from_value(payload).into_submission()
}

/// True when the bot trap holds anything but `null` or an empty string
pub fn honeypot_triggered(payload: &Value) -> bool {
    match payload.get("honeypot") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for field in FIELD_ORDER {
        if let Some(list) = by_field.get(field) {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(FieldError::new(field, message));
            }
        }
    }

    out
}

/// Type errors win over rule violations for the same field
fn merge_errors(type_errors: &[FieldError], rule_errors: Vec<FieldError>) -> Vec<FieldError> {
    let mut out = Vec::new();

    for field in FIELD_ORDER {
        let typed: Vec<_> = type_errors.iter().filter(|e| e.field == field).collect();
        if typed.is_empty() {
            out.extend(rule_errors.iter().filter(|e| e.field == field).cloned());
        } else {
            out.extend(typed.into_iter().cloned());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Иван Петров",
            "email": "ivan@example.com",
            "phone": "+7 (900) 123-45-67",
            "message": "Нужна консультация по ЭДО",
            "service": "legal",
            "honeypot": ""
        })
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_submission() {
        let submission = parse_submission(&valid()).unwrap();
        assert_eq!(submission.name, "Иван Петров");
        assert_eq!(submission.phone.as_deref(), Some("+7 (900) 123-45-67"));
        assert_eq!(submission.service, ServiceCategory::Legal);
    }

    #[test]
    fn test_fields_are_trimmed_and_phone_optional() {
        let mut payload = valid();
        payload["name"] = json!("  Ann  ");
        payload["phone"] = json!("   ");
        let submission = parse_submission(&payload).unwrap();
        assert_eq!(submission.name, "Ann");
        assert_eq!(submission.phone, None);
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut payload = valid();
        payload.as_object_mut().unwrap().remove("email");
        let errors = parse_submission(&payload).unwrap_err();
        assert_eq!(fields(&errors), vec!["email"]);
        assert_eq!(errors[0].message, "Укажите email");
    }

    #[test]
    fn test_every_absent_required_field_is_an_error() {
        for field in ["name", "email", "message", "service"] {
            for absent in [Value::Null, json!(""), json!("   ")] {
                let mut payload = valid();
                payload[field] = absent;
                let errors = parse_submission(&payload).unwrap_err();
                assert_eq!(fields(&errors), vec![field]);
            }
        }
    }

    #[test]
    fn test_all_violations_in_order() {
        let payload = json!({
            "service": "finance",
            "message": "short",
            "phone": "call me",
            "email": "not-an-email",
            "name": "A"
        });
        let errors = parse_submission(&payload).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["name", "email", "phone", "message", "service"]
        );
    }

    #[test]
    fn test_non_object_payload_misses_every_field() {
        let errors = parse_submission(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "email", "message", "service"]);
    }

    #[test]
    fn test_non_string_value_is_type_error() {
        let mut payload = valid();
        payload["name"] = json!(42);
        let errors = parse_submission(&payload).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("name", "Ожидается строка")]);
    }

    #[test]
    fn test_length_counts_characters() {
        let mut payload = valid();
        payload["name"] = json!("Я".repeat(100));
        assert!(parse_submission(&payload).is_ok());

        payload["name"] = json!("Я".repeat(101));
        let errors = parse_submission(&payload).unwrap_err();
        assert_eq!(fields(&errors), vec!["name"]);
    }

    #[test]
    fn test_honeypot() {
        assert!(!honeypot_triggered(&valid()));
        assert!(!honeypot_triggered(&json!({ "honeypot": null })));
        assert!(!honeypot_triggered(&json!("text")));
        assert!(honeypot_triggered(&json!({ "honeypot": "http://spam" })));
        assert!(honeypot_triggered(&json!({ "honeypot": 0 })));
    }
}
