//! Input validation for uploaded student rows.

use std::fmt;

use serde_json::Value;

use crate::models::{CompetencyVector, NewStudent};

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is absent or blank.
    Missing(String),
    /// Invalid email format.
    InvalidEmail(String),
    /// Value is not a number.
    NotANumber { field: String, value: String },
    /// Number with a fractional part where an integer is expected.
    NotAWholeNumber { field: String, value: f64 },
    /// Numeric value outside the accepted range.
    OutOfRange { field: String, min: f64, max: f64, actual: f64 },
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing(field) => write!(f, "{} is required", field),
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::NotANumber { field, value } => {
                write!(f, "{} must be a number (got '{}')", field, value)
            }
            ValidationError::NotAWholeNumber { field, value } => {
                write!(f, "{} must be a whole number (got {})", field, value)
            }
            ValidationError::OutOfRange { field, min, max, actual } => {
                write!(f, "{} must be between {} and {} (got {})", field, min, max, actual)
            }
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for names and other free-text fields.
pub const MAX_TEXT_LENGTH: usize = 200;

/// Accepted competency score range.
pub const COMPETENCY_RANGE: (f64, f64) = (0.0, 100.0);

/// Accepted academic year range.
pub const GRADE_RANGE: (f64, f64) = (1.0, 4.0);

/// Validate an email address (basic RFC 5322 format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character before @
/// - Has at least one dot in the domain, not at either end
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Missing("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail(
            "must contain an @ symbol".to_string(),
        ));
    };

    if domain.contains('@') {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "malformed domain".to_string(),
        ));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(
            "cannot contain whitespace".to_string(),
        ));
    }

    Ok(())
}

/// Validate one uploaded student row.
///
/// Rows come from client-side CSV parsing, so numbers may arrive as strings
/// and optional columns as empty strings. Every field is checked and all
/// problems are returned together.
pub fn validate_student_row(row: &Value) -> Result<NewStudent, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let student_id = required_text(row, "studentId", &mut errors);
    let name = required_text(row, "name", &mut errors);

    let email = optional_text(row, "email");
    if let Some(ref email) = email {
        if let Err(err) = validate_email(email) {
            errors.push(err);
        }
    }

    let department = optional_text(row, "department");
    if let Some(ref department) = department {
        check_length("department", department, &mut errors);
    }

    let grade = match optional_number(row, "grade") {
        Ok(Some(value)) => {
            if !in_range(value, GRADE_RANGE) {
                errors.push(out_of_range("grade", value, GRADE_RANGE));
                None
            } else if value.fract() != 0.0 {
                errors.push(ValidationError::NotAWholeNumber {
                    field: "grade".to_string(),
                    value,
                });
                None
            } else {
                Some(value as i64)
            }
        }
        Ok(None) => None,
        Err(err) => {
            errors.push(err);
            None
        }
    };

    let creativity = competency(row, "creativity", &mut errors);
    let collaboration = competency(row, "collaboration", &mut errors);
    let problem_solving = competency(row, "problemSolving", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewStudent {
        student_id: student_id.unwrap_or_default(),
        name: name.unwrap_or_default(),
        email,
        department,
        grade,
        competencies: CompetencyVector::new(
            creativity.unwrap_or_default(),
            collaboration.unwrap_or_default(),
            problem_solving.unwrap_or_default(),
        ),
    })
}

/// Text value of a field; numbers are accepted and rendered as text.
fn text_value(row: &Value, field: &str) -> Option<String> {
    let text = match row.get(field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(text).filter(|s| !s.is_empty())
}

fn required_text(row: &Value, field: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    match text_value(row, field) {
        Some(value) => {
            check_length(field, &value, errors);
            Some(value)
        }
        None => {
            errors.push(ValidationError::Missing(field.to_string()));
            None
        }
    }
}

fn optional_text(row: &Value, field: &str) -> Option<String> {
    text_value(row, field)
}

fn check_length(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    let len = value.chars().count();
    if len > MAX_TEXT_LENGTH {
        errors.push(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
            actual: len,
        });
    }
}

/// Numeric value of a field, coercing numeric strings.
fn optional_number(row: &Value, field: &str) -> Result<Option<f64>, ValidationError> {
    let value = match row.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ValidationError::NotANumber {
            field: field.to_string(),
            value: row.get(field).map(render).unwrap_or_default(),
        }),
    }
}

fn competency(row: &Value, field: &str, errors: &mut Vec<ValidationError>) -> Option<f64> {
    match optional_number(row, field) {
        Ok(Some(value)) if in_range(value, COMPETENCY_RANGE) => Some(value),
        Ok(Some(value)) => {
            errors.push(out_of_range(field, value, COMPETENCY_RANGE));
            None
        }
        Ok(None) => {
            errors.push(ValidationError::Missing(field.to_string()));
            None
        }
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

fn out_of_range(field: &str, actual: f64, (min, max): (f64, f64)) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min,
        max,
        actual,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
