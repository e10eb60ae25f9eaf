use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pcast_storage::{
    AttachmentError, AttachmentResult, FileArea, FileIndex, NewStoredFile, StoredFile,
};
use sqlx::{PgPool, Postgres};

const FILE_COLUMNS: &str = "id, contextid, filearea, itemid, filepath, filename, contenthash, \
     filesize, mimetype, userid, timecreated, timemodified";

#[derive(sqlx::FromRow)]
struct FileRow {
    id: i64,
    contextid: i64,
    filearea: String,
    itemid: i64,
    filepath: String,
    filename: String,
    contenthash: String,
    filesize: i64,
    mimetype: String,
    userid: Option<i64>,
    timecreated: DateTime<Utc>,
    timemodified: DateTime<Utc>,
}

impl From<FileRow> for StoredFile {
    fn from(row: FileRow) -> Self {
        StoredFile {
            id: row.id,
            context_id: row.contextid,
            area: row.filearea,
            item_id: row.itemid,
            filepath: row.filepath,
            filename: row.filename,
            contenthash: row.contenthash,
            filesize: row.filesize,
            mimetype: row.mimetype,
            userid: row.userid,
            timecreated: row.timecreated,
            timemodified: row.timemodified,
        }
    }
}

fn index_error(err: sqlx::Error) -> AttachmentError {
    AttachmentError::Index(err.to_string())
}

/// Attachment metadata index backed by the `files` table
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileIndex for FileRepository {
    #[tracing::instrument(skip(self, file), fields(db.table = "files", db.operation = "insert", area = %file.area))]
    async fn insert(&self, file: NewStoredFile) -> AttachmentResult<StoredFile> {
        let row = sqlx::query_as::<Postgres, FileRow>(&format!(
            r#"
            INSERT INTO files (
                contextid, filearea, itemid, filepath, filename, contenthash,
                filesize, mimetype, userid, timecreated, timemodified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            FILE_COLUMNS
        ))
        .bind(file.area.context_id)
        .bind(&file.area.area)
        .bind(file.area.item_id)
        .bind(&file.filepath)
        .bind(&file.filename)
        .bind(&file.contenthash)
        .bind(file.filesize)
        .bind(&file.mimetype)
        .bind(file.userid)
        .bind(file.timecreated)
        .bind(file.timemodified)
        .fetch_one(&self.pool)
        .await
        .map_err(index_error)?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list(&self, area: &FileArea) -> AttachmentResult<Vec<StoredFile>> {
        let rows = sqlx::query_as::<Postgres, FileRow>(&format!(
            "SELECT {} FROM files WHERE contextid = $1 AND filearea = $2 AND itemid = $3 ORDER BY id",
            FILE_COLUMNS
        ))
        .bind(area.context_id)
        .bind(&area.area)
        .bind(area.item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(index_error)?;

        Ok(rows.into_iter().map(StoredFile::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "delete", db.record_id = %id))]
    async fn delete_file(&self, id: i64) -> AttachmentResult<()> {
        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(index_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "delete"))]
    async fn delete_area(&self, area: &FileArea) -> AttachmentResult<u64> {
        let result = sqlx::query(
            "DELETE FROM files WHERE contextid = $1 AND filearea = $2 AND itemid = $3",
        )
        .bind(area.context_id)
        .bind(&area.area)
        .bind(area.item_id)
        .execute(&self.pool)
        .await
        .map_err(index_error)?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn area_exists(&self, area: &FileArea) -> AttachmentResult<bool> {
        sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM files WHERE contextid = $1 AND filearea = $2 AND itemid = $3)",
        )
        .bind(area.context_id)
        .bind(&area.area)
        .bind(area.item_id)
        .fetch_one(&self.pool)
        .await
        .map_err(index_error)
    }
}
