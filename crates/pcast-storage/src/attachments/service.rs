use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use super::error::{AttachmentError, AttachmentResult};
use super::index::FileIndex;
use super::types::{AreaOptions, FileArea, FileSort, NewStoredFile, StoredFile};
use crate::keys::{content_hash, content_key};
use crate::traits::Storage;

/// Draft ids are drawn from this range so they never collide with record ids
/// that happen to share a context.
const DRAFT_ID_RANGE: std::ops::Range<i64> = 1..1_000_000_000;
const DRAFT_ID_ATTEMPTS: usize = 16;

/// Staging and committing of uploaded files.
#[async_trait]
pub trait AttachmentService: Send + Sync {
    /// Allocate a fresh draft area for `user_id`, seeded with copies of the
    /// files in `existing` when given. Returns the draft item id.
    async fn prepare_draft_area(
        &self,
        user_id: i64,
        existing: Option<&FileArea>,
    ) -> AttachmentResult<i64>;

    /// Put an upload into a draft area, enforcing `options`.
    async fn stage_file(
        &self,
        user_id: i64,
        draft_id: i64,
        filename: &str,
        data: Vec<u8>,
        options: &AreaOptions,
    ) -> AttachmentResult<StoredFile>;

    /// Replace the contents of `target` with the files of the draft area,
    /// then discard the draft.
    async fn commit_draft_area(
        &self,
        user_id: i64,
        draft_id: i64,
        target: &FileArea,
        options: &AreaOptions,
    ) -> AttachmentResult<Vec<StoredFile>>;

    async fn list_files(&self, area: &FileArea, sort: FileSort)
        -> AttachmentResult<Vec<StoredFile>>;

    async fn read_by_hash(&self, contenthash: &str) -> AttachmentResult<Vec<u8>>;
}

/// [`AttachmentService`] over a metadata index and a content-addressed blob store.
#[derive(Clone)]
pub struct FileAreaService {
    storage: Arc<dyn Storage>,
    index: Arc<dyn FileIndex>,
}

impl FileAreaService {
    pub fn new(storage: Arc<dyn Storage>, index: Arc<dyn FileIndex>) -> Self {
        Self { storage, index }
    }

    async fn allocate_draft_id(&self, user_id: i64) -> AttachmentResult<i64> {
        for _ in 0..DRAFT_ID_ATTEMPTS {
            let candidate = rand::rng().random_range(DRAFT_ID_RANGE);
            if !self
                .index
                .area_exists(&FileArea::draft(user_id, candidate))
                .await?
            {
                return Ok(candidate);
            }
        }
        Err(AttachmentError::Index(
            "Could not allocate an unused draft area".to_string(),
        ))
    }
}

/// Split a submitted name into `(filepath, filename)`.
fn split_name(name: &str, subdirs: bool) -> AttachmentResult<(String, String)> {
    let name = name.trim();
    if name.is_empty()
        || name.starts_with('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(AttachmentError::InvalidFileName(name.to_string()));
    }

    match name.rsplit_once('/') {
        None => Ok(("/".to_string(), name.to_string())),
        Some(_) if !subdirs => Err(AttachmentError::InvalidFileName(format!(
            "{} (folders are not allowed here)",
            name
        ))),
        Some((dir, file)) => Ok((format!("/{}/", dir), file.to_string())),
    }
}

fn check_file(
    filename: &str,
    filepath: &str,
    size: u64,
    mimetype: &str,
    options: &AreaOptions,
) -> AttachmentResult<()> {
    if options.max_bytes > 0 && size > options.max_bytes {
        return Err(AttachmentError::TooLarge {
            filename: filename.to_string(),
            size,
            limit: options.max_bytes,
        });
    }
    if !options.accepts(filename, mimetype) {
        return Err(AttachmentError::TypeNotAccepted {
            filename: filename.to_string(),
            mimetype: mimetype.to_string(),
        });
    }
    if !options.subdirs && filepath != "/" {
        return Err(AttachmentError::InvalidFileName(format!(
            "{}{} (folders are not allowed here)",
            filepath, filename
        )));
    }
    Ok(())
}

#[async_trait]
impl AttachmentService for FileAreaService {
    #[tracing::instrument(skip(self))]
    async fn prepare_draft_area(
        &self,
        user_id: i64,
        existing: Option<&FileArea>,
    ) -> AttachmentResult<i64> {
        let draft_id = self.allocate_draft_id(user_id).await?;
        let draft = FileArea::draft(user_id, draft_id);

        if let Some(source) = existing {
            let files = self.index.list(source).await?;
            for file in &files {
                self.index.insert(file.copy_to(&draft)).await?;
            }
            tracing::debug!(
                draft_id,
                source = %source,
                files = files.len(),
                "Seeded draft area"
            );
        }

        Ok(draft_id)
    }

    #[tracing::instrument(skip(self, data, options), fields(size_bytes = data.len()))]
    async fn stage_file(
        &self,
        user_id: i64,
        draft_id: i64,
        filename: &str,
        data: Vec<u8>,
        options: &AreaOptions,
    ) -> AttachmentResult<StoredFile> {
        let (filepath, filename) = split_name(filename, options.subdirs)?;
        let mimetype = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let size = data.len() as u64;
        check_file(&filename, &filepath, size, &mimetype, options)?;

        let draft = FileArea::draft(user_id, draft_id);
        let staged = self.index.list(&draft).await?;

        if let Some(same) = staged
            .iter()
            .find(|f| f.filepath == filepath && f.filename == filename)
        {
            self.index.delete_file(same.id).await?;
        } else if staged.len() >= options.max_files {
            // A single-file field behaves like a picker: the new upload wins.
            if options.max_files == 1 {
                self.index.delete_area(&draft).await?;
            } else {
                return Err(AttachmentError::TooManyFiles {
                    max: options.max_files,
                });
            }
        }

        let contenthash = content_hash(&data);
        let key = content_key(&contenthash)?;
        if !self.storage.exists(&key).await? {
            self.storage.upload_with_key(&key, data).await?;
        }

        let now = Utc::now();
        let stored = self
            .index
            .insert(NewStoredFile {
                area: draft,
                filepath,
                filename,
                contenthash,
                filesize: size as i64,
                mimetype,
                userid: Some(user_id),
                timecreated: now,
                timemodified: now,
            })
            .await?;

        tracing::info!(
            user_id,
            draft_id,
            file_id = stored.id,
            filename = %stored.filename,
            mimetype = %stored.mimetype,
            "Staged upload"
        );

        Ok(stored)
    }

    #[tracing::instrument(skip(self, target, options), fields(target = %target))]
    async fn commit_draft_area(
        &self,
        user_id: i64,
        draft_id: i64,
        target: &FileArea,
        options: &AreaOptions,
    ) -> AttachmentResult<Vec<StoredFile>> {
        let draft = FileArea::draft(user_id, draft_id);
        let mut files = self.index.list(&draft).await?;
        FileSort::TimeModified.apply(&mut files);

        if files.len() > options.max_files {
            return Err(AttachmentError::TooManyFiles {
                max: options.max_files,
            });
        }
        for file in &files {
            check_file(
                &file.filename,
                &file.filepath,
                file.filesize.max(0) as u64,
                &file.mimetype,
                options,
            )?;
        }

        let removed = self.index.delete_area(target).await?;
        let mut committed = Vec::with_capacity(files.len());
        for file in &files {
            committed.push(self.index.insert(file.copy_to(target)).await?);
        }
        // The draft is spent once its files live in the target
        self.index.delete_area(&draft).await?;

        tracing::info!(
            user_id,
            draft_id,
            removed,
            committed = committed.len(),
            "Committed draft area"
        );

        Ok(committed)
    }

    async fn list_files(
        &self,
        area: &FileArea,
        sort: FileSort,
    ) -> AttachmentResult<Vec<StoredFile>> {
        let mut files = self.index.list(area).await?;
        sort.apply(&mut files);
        Ok(files)
    }

    async fn read_by_hash(&self, contenthash: &str) -> AttachmentResult<Vec<u8>> {
        let key = content_key(contenthash)?;
        Ok(self.storage.download(&key).await?)
    }
}
