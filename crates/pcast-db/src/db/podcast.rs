use async_trait::async_trait;
use pcast_core::models::{Course, CourseModule, NewPodcast, Podcast, PodcastUpdate};
use pcast_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::traits::PodcastStore;

const PODCAST_COLUMNS: &str =
    "id, course, name, intro, timecreated, timemodified, requireapproval, grade";

/// Repository for podcast instances and their placements
#[derive(Clone)]
pub struct PodcastRepository {
    pool: PgPool,
}

impl PodcastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PodcastStore for PodcastRepository {
    #[tracing::instrument(skip(self), fields(db.table = "course_modules", db.operation = "select", db.record_id = %cmid))]
    async fn get_course_module(&self, cmid: i64) -> Result<Option<CourseModule>, AppError> {
        let cm = sqlx::query_as::<Postgres, CourseModule>(
            "SELECT id, course, instance FROM course_modules WHERE id = $1 AND module = 'pcast'",
        )
        .bind(cmid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cm)
    }

    #[tracing::instrument(skip(self), fields(db.table = "course", db.operation = "select", db.record_id = %id))]
    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<Postgres, Course>(
            "SELECT id, fullname, maxbytes FROM course WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    #[tracing::instrument(skip(self), fields(db.table = "pcast", db.operation = "select", db.record_id = %id))]
    async fn get_podcast(&self, id: i64) -> Result<Option<Podcast>, AppError> {
        let podcast = sqlx::query_as::<Postgres, Podcast>(&format!(
            "SELECT {} FROM pcast WHERE id = $1",
            PODCAST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(podcast)
    }

    #[tracing::instrument(skip(self, podcast), fields(db.table = "pcast", db.operation = "insert"))]
    async fn insert_podcast(&self, podcast: &NewPodcast) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<Postgres, i64>(
            r#"
            INSERT INTO pcast (course, name, intro, timecreated, requireapproval, grade)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(podcast.course)
        .bind(&podcast.name)
        .bind(&podcast.intro)
        .bind(podcast.timecreated)
        .bind(podcast.requireapproval)
        .bind(podcast.grade)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(podcast_id = id, course = podcast.course, "Podcast created");

        Ok(id)
    }

    #[tracing::instrument(skip(self, podcast), fields(db.table = "pcast", db.operation = "update", db.record_id = %podcast.id))]
    async fn update_podcast(&self, podcast: &PodcastUpdate) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE pcast
            SET course = $2, name = $3, intro = $4, timemodified = $5,
                requireapproval = $6, grade = $7
            WHERE id = $1
            "#,
        )
        .bind(podcast.id)
        .bind(podcast.course)
        .bind(&podcast.name)
        .bind(&podcast.intro)
        .bind(podcast.timemodified)
        .bind(podcast.requireapproval)
        .bind(podcast.grade)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "pcast", db.operation = "delete", db.record_id = %id))]
    async fn delete_podcast(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pcast WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "pcast", db.operation = "select"))]
    async fn scale_in_use(&self, scale_id: i64) -> Result<bool, AppError> {
        let grade = i32::try_from(-scale_id)
            .map_err(|_| AppError::InvalidInput(format!("Scale id out of range: {}", scale_id)))?;

        let used = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM pcast WHERE grade = $1)",
        )
        .bind(grade)
        .fetch_one(&self.pool)
        .await?;

        Ok(used)
    }
}
