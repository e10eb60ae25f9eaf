use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit event emitted by the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub course_id: i64,
    pub module: String,
    pub action: String,
    /// Relative link that reopens the affected record
    pub url: String,
    /// Identifier of the affected object (the episode id)
    pub info: String,
    pub cmid: i64,
    pub user_id: i64,
}

/// Stored audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LogEntry {
    pub id: i64,
    pub time: DateTime<Utc>,
    pub userid: i64,
    pub course: i64,
    pub module: String,
    pub cmid: i64,
    pub action: String,
    pub url: String,
    pub info: String,
}
