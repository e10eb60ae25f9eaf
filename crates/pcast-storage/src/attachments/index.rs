use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::AttachmentResult;
use super::types::{FileArea, NewStoredFile, StoredFile};

/// Persistent metadata of stored files.
///
/// Implementations return files of an area in insertion order; callers sort.
#[async_trait]
pub trait FileIndex: Send + Sync {
    async fn insert(&self, file: NewStoredFile) -> AttachmentResult<StoredFile>;

    async fn list(&self, area: &FileArea) -> AttachmentResult<Vec<StoredFile>>;

    async fn delete_file(&self, id: i64) -> AttachmentResult<()>;

    /// Remove every file of an area, returning how many were removed
    async fn delete_area(&self, area: &FileArea) -> AttachmentResult<u64>;

    async fn area_exists(&self, area: &FileArea) -> AttachmentResult<bool>;
}

#[derive(Default)]
struct IndexState {
    next_id: i64,
    files: BTreeMap<i64, StoredFile>,
}

/// In-process [`FileIndex`] for tests and the memory storage backend.
#[derive(Clone, Default)]
pub struct MemoryFileIndex {
    state: Arc<RwLock<IndexState>>,
}

impl MemoryFileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.files.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.files.is_empty()
    }
}

#[async_trait]
impl FileIndex for MemoryFileIndex {
    async fn insert(&self, file: NewStoredFile) -> AttachmentResult<StoredFile> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let stored = StoredFile {
            id: state.next_id,
            context_id: file.area.context_id,
            area: file.area.area,
            item_id: file.area.item_id,
            filepath: file.filepath,
            filename: file.filename,
            contenthash: file.contenthash,
            filesize: file.filesize,
            mimetype: file.mimetype,
            userid: file.userid,
            timecreated: file.timecreated,
            timemodified: file.timemodified,
        };
        state.files.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, area: &FileArea) -> AttachmentResult<Vec<StoredFile>> {
        let state = self.state.read().await;
        Ok(state
            .files
            .values()
            .filter(|f| {
                f.context_id == area.context_id && f.area == area.area && f.item_id == area.item_id
            })
            .cloned()
            .collect())
    }

    async fn delete_file(&self, id: i64) -> AttachmentResult<()> {
        self.state.write().await.files.remove(&id);
        Ok(())
    }

    async fn delete_area(&self, area: &FileArea) -> AttachmentResult<u64> {
        let mut state = self.state.write().await;
        let before = state.files.len();
        state.files.retain(|_, f| {
            !(f.context_id == area.context_id && f.area == area.area && f.item_id == area.item_id)
        });
        Ok((before - state.files.len()) as u64)
    }

    async fn area_exists(&self, area: &FileArea) -> AttachmentResult<bool> {
        Ok(!self.list(area).await?.is_empty())
    }
}
