use async_trait::async_trait;
use pcast_core::models::Episode;
use pcast_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::traits::EpisodeStore;

const EPISODE_COLUMNS: &str = "id, pcastid, course, userid, name, summary, subtitle, keywords, \
     explicit, category, topcategory, nestedcategory, timecreated, timemodified, approved, \
     duration, mediafile";

/// Repository for podcast episodes
#[derive(Clone)]
pub struct EpisodeRepository {
    pool: PgPool,
}

impl EpisodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EpisodeStore for EpisodeRepository {
    #[tracing::instrument(skip(self), fields(db.table = "pcast_episodes", db.operation = "select", db.record_id = %id))]
    async fn get_episode(&self, id: i64) -> Result<Option<Episode>, AppError> {
        let episode = sqlx::query_as::<Postgres, Episode>(&format!(
            "SELECT {} FROM pcast_episodes WHERE id = $1",
            EPISODE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(episode)
    }

    #[tracing::instrument(skip(self), fields(db.table = "pcast_episodes", db.operation = "select", db.record_id = %id))]
    async fn get_episode_in_podcast(
        &self,
        id: i64,
        pcastid: i64,
    ) -> Result<Option<Episode>, AppError> {
        let episode = sqlx::query_as::<Postgres, Episode>(&format!(
            "SELECT {} FROM pcast_episodes WHERE id = $1 AND pcastid = $2",
            EPISODE_COLUMNS
        ))
        .bind(id)
        .bind(pcastid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(episode)
    }

    #[tracing::instrument(skip(self, episode), fields(db.table = "pcast_episodes", db.operation = "insert"))]
    async fn insert_episode(&self, episode: &Episode) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<Postgres, i64>(
            r#"
            INSERT INTO pcast_episodes (
                pcastid, course, userid, name, summary, subtitle, keywords, explicit,
                category, topcategory, nestedcategory, timecreated, timemodified,
                approved, duration, mediafile
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(episode.pcastid)
        .bind(episode.course)
        .bind(episode.userid)
        .bind(&episode.name)
        .bind(&episode.summary)
        .bind(&episode.subtitle)
        .bind(&episode.keywords)
        .bind(episode.explicit)
        .bind(episode.category)
        .bind(episode.topcategory)
        .bind(episode.nestedcategory)
        .bind(episode.timecreated)
        .bind(episode.timemodified)
        .bind(episode.approved)
        .bind(episode.duration)
        .bind(episode.mediafile)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            episode_id = id,
            pcastid = episode.pcastid,
            userid = episode.userid,
            approved = episode.approved,
            "Episode created"
        );

        Ok(id)
    }

    #[tracing::instrument(skip(self, episode), fields(db.table = "pcast_episodes", db.operation = "update", db.record_id = ?episode.id))]
    async fn update_episode(&self, episode: &Episode) -> Result<(), AppError> {
        let id = episode
            .id
            .ok_or_else(|| AppError::Internal("Cannot update an episode without id".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE pcast_episodes
            SET name = $2, summary = $3, subtitle = $4, keywords = $5, explicit = $6,
                category = $7, topcategory = $8, nestedcategory = $9, timemodified = $10,
                approved = $11, duration = $12, mediafile = $13
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&episode.name)
        .bind(&episode.summary)
        .bind(&episode.subtitle)
        .bind(&episode.keywords)
        .bind(episode.explicit)
        .bind(episode.category)
        .bind(episode.topcategory)
        .bind(episode.nestedcategory)
        .bind(episode.timemodified)
        .bind(episode.approved)
        .bind(episode.duration)
        .bind(episode.mediafile)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::EpisodeNotFound { id });
        }

        tracing::debug!(episode_id = id, duration = ?episode.duration, "Episode updated");

        Ok(())
    }
}
