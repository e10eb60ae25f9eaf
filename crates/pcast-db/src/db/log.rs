use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pcast_core::models::LogEvent;
use pcast_core::AppError;
use sqlx::PgPool;

use crate::traits::AuditLog;

/// Repository for the module's audit trail (`pcast_log`)
#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for LogRepository {
    #[tracing::instrument(skip(self, event), fields(db.table = "pcast_log", db.operation = "insert", action = %event.action))]
    async fn record_event(&self, event: &LogEvent, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO pcast_log (time, userid, course, module, cmid, action, url, info)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(at)
        .bind(event.user_id)
        .bind(event.course_id)
        .bind(&event.module)
        .bind(event.cmid)
        .bind(&event.action)
        .bind(&event.url)
        .bind(&event.info)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
