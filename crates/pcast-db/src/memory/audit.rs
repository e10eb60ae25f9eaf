use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pcast_core::models::{LogEntry, LogEvent};
use pcast_core::AppError;
use tokio::sync::Mutex;

use crate::traits::AuditLog;

#[derive(Clone, Default)]
pub struct MemoryAuditLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn record_event(&self, event: &LogEvent, at: DateTime<Utc>) -> Result<(), AppError> {
        let mut entries = self.entries.lock().await;
        let id = entries.len() as i64 + 1;
        entries.push(LogEntry {
            id,
            time: at,
            userid: event.user_id,
            course: event.course_id,
            module: event.module.clone(),
            cmid: event.cmid,
            action: event.action.clone(),
            url: event.url.clone(),
            info: event.info.clone(),
        });
        Ok(())
    }
}
