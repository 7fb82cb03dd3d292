use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    log_filter::format_date,
    model::{Exercise, User},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationUser {
    #[serde(default)]
    pub username: Option<String>,
}

/// Raw exercise submission. `duration` is kept as a json value so numeric
/// strings and numbers are both accepted; validation sorts them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExercisePayload {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Raw log query parameters, exactly as they arrived on the wire. The filter
/// engine owns the permissive parsing contract, so these stay strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub id: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { username: user.username, id: user.id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<&Exercise> for LogEntry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: format_date(&exercise.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub id: i64,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}
