use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::api::error::ApiError;

/// A validated, normalized exercise candidate. All three fields are resolved
/// before anything touches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseInput {
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

pub fn validate_new_user(username: Option<&str>) -> Result<String, ApiError> {
    let username = username.unwrap_or("").trim();
    if username.is_empty() {
        return Err(ApiError::MissingField { field: "username" });
    }
    // Uniqueness is the store's job; its duplicate-key failure maps to
    // `UsernameTaken` at the handler boundary.
    Ok(username.to_owned())
}

pub fn validate_exercise_input(
    description: Option<&str>,
    duration: Option<&Value>,
    date: Option<&str>,
) -> Result<ExerciseInput, ApiError> {
    let description = description.unwrap_or("").trim();
    if description.is_empty() {
        return Err(ApiError::MissingField { field: "description" });
    }

    let duration = validate_duration(duration)?;

    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Utc::now(),
        Some(date) => parse_date(date).ok_or(ApiError::InvalidDate)?,
    };

    Ok(ExerciseInput { description: description.to_owned(), duration, date })
}

fn validate_duration(duration: Option<&Value>) -> Result<i64, ApiError> {
    let duration = match duration {
        None | Some(Value::Null) => return Err(ApiError::MissingField { field: "duration" }),
        Some(v) => v,
    };

    let duration = match duration {
        Value::Number(n) => n.as_i64().ok_or(ApiError::InvalidDuration)?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(ApiError::MissingField { field: "duration" });
            }
            s.parse::<i64>().map_err(|_| ApiError::InvalidDuration)?
        },
        _ => return Err(ApiError::InvalidDuration),
    };

    if duration <= 0 {
        return Err(ApiError::InvalidDuration);
    }
    Ok(duration)
}

/// Parses a plain calendar date (taken as midnight UTC) or a full RFC 3339
/// timestamp. Returns `None` rather than an error so callers can pick their
/// own strictness; exercise submission rejects, log filtering ignores.
pub fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
