use chrono::{DateTime, Utc};
use pcast_core::constants::{EPISODE_FILE_AREA, EPISODE_FILE_TYPES, EPISODE_MAX_FILES};
use serde::{Deserialize, Serialize};

/// Area name used for per-user staging.
pub const DRAFT_AREA: &str = "draft";

/// Addresses one set of files: a context, an area name within it and an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileArea {
    pub context_id: i64,
    pub area: String,
    pub item_id: i64,
}

impl FileArea {
    pub fn new(context_id: i64, area: impl Into<String>, item_id: i64) -> Self {
        Self {
            context_id,
            area: area.into(),
            item_id,
        }
    }

    /// Staging area owned by `user_id`.
    pub fn draft(user_id: i64, draft_id: i64) -> Self {
        Self::new(user_id, DRAFT_AREA, draft_id)
    }

    /// Committed media of one episode.
    pub fn episode(cmid: i64, episode_id: i64) -> Self {
        Self::new(cmid, EPISODE_FILE_AREA, episode_id)
    }

    pub fn is_draft(&self) -> bool {
        self.area == DRAFT_AREA
    }
}

impl std::fmt::Display for FileArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.context_id, self.area, self.item_id)
    }
}

/// Constraints applied when staging and committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaOptions {
    /// Whether files may live below `/`
    pub subdirs: bool,
    /// Per-file size limit in bytes; 0 means unlimited
    pub max_bytes: u64,
    pub max_files: usize,
    /// Type groups (`audio`), exact MIME types (`audio/mpeg`) or extensions
    /// (`.mp3`). Empty accepts everything.
    pub accepted_types: Vec<String>,
}

impl AreaOptions {
    /// Options of the episode media field.
    pub fn episode(max_bytes: u64) -> Self {
        Self {
            subdirs: false,
            max_bytes,
            max_files: EPISODE_MAX_FILES,
            accepted_types: EPISODE_FILE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn accepts(&self, filename: &str, mimetype: &str) -> bool {
        if self.accepted_types.is_empty() {
            return true;
        }
        let lower_name = filename.to_ascii_lowercase();
        self.accepted_types.iter().any(|accepted| {
            let accepted = accepted.to_ascii_lowercase();
            if accepted == "*" {
                true
            } else if accepted.starts_with('.') {
                lower_name.ends_with(&accepted)
            } else if accepted.contains('/') {
                mimetype.eq_ignore_ascii_case(&accepted)
            } else {
                mimetype
                    .split('/')
                    .next()
                    .is_some_and(|group| group.eq_ignore_ascii_case(&accepted))
            }
        })
    }
}

impl Default for AreaOptions {
    fn default() -> Self {
        Self {
            subdirs: true,
            max_bytes: 0,
            max_files: usize::MAX,
            accepted_types: Vec::new(),
        }
    }
}

/// Metadata of a stored file. Bytes are looked up by `contenthash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    pub context_id: i64,
    pub area: String,
    pub item_id: i64,
    pub filepath: String,
    pub filename: String,
    pub contenthash: String,
    pub filesize: i64,
    pub mimetype: String,
    pub userid: Option<i64>,
    pub timecreated: DateTime<Utc>,
    pub timemodified: DateTime<Utc>,
}

impl StoredFile {
    pub fn file_area(&self) -> FileArea {
        FileArea::new(self.context_id, self.area.clone(), self.item_id)
    }

    /// Re-home this file's metadata into another area.
    pub fn copy_to(&self, area: &FileArea) -> NewStoredFile {
        NewStoredFile {
            area: area.clone(),
            filepath: self.filepath.clone(),
            filename: self.filename.clone(),
            contenthash: self.contenthash.clone(),
            filesize: self.filesize,
            mimetype: self.mimetype.clone(),
            userid: self.userid,
            timecreated: self.timecreated,
            timemodified: self.timemodified,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewStoredFile {
    pub area: FileArea,
    pub filepath: String,
    pub filename: String,
    pub contenthash: String,
    pub filesize: i64,
    pub mimetype: String,
    pub userid: Option<i64>,
    pub timecreated: DateTime<Utc>,
    pub timemodified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSort {
    /// Oldest modification first
    #[default]
    TimeModified,
    FileName,
}

impl FileSort {
    pub fn apply(self, files: &mut [StoredFile]) {
        match self {
            FileSort::TimeModified => {
                files.sort_by(|a, b| a.timemodified.cmp(&b.timemodified).then(a.id.cmp(&b.id)))
            }
            FileSort::FileName => files.sort_by(|a, b| {
                (a.filepath.as_str(), a.filename.as_str())
                    .cmp(&(b.filepath.as_str(), b.filename.as_str()))
                    .then(a.id.cmp(&b.id))
            }),
        }
    }
}
