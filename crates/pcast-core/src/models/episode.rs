use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::FORMAT_HTML;

/// Podcast episode
///
/// `id` is `None` until the first insert. `pcastid`, `course`, `userid` and
/// `timecreated` are written by the first insert only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Episode {
    pub id: Option<i64>,
    pub pcastid: i64,
    pub course: i64,
    pub userid: i64,
    pub name: String,
    pub summary: String,
    pub subtitle: String,
    pub keywords: String,
    pub explicit: bool,
    /// Combined iTunes category code as selected in the form
    pub category: Option<i32>,
    pub topcategory: i32,
    pub nestedcategory: i32,
    pub timecreated: DateTime<Utc>,
    pub timemodified: DateTime<Utc>,
    pub approved: bool,
    /// Playback length in seconds, known for MP3 media only
    pub duration: Option<i32>,
    /// Draft item id the media was last submitted through
    pub mediafile: Option<i64>,
}

impl Episode {
    /// Empty in-memory episode for the "new entry" path
    pub fn shell() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Current values in the shape the edit form expects
    pub fn to_form(&self) -> EpisodeForm {
        EpisodeForm {
            name: self.name.clone(),
            summary: RichText::html(self.summary.clone()),
            subtitle: self.subtitle.clone(),
            keywords: self.keywords.clone(),
            explicit: self.explicit,
            category: self.category,
            mediafile: self.mediafile,
        }
    }
}

/// Rich-text editor payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub text: String,
    pub format: i32,
}

impl RichText {
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: FORMAT_HTML,
        }
    }
}

impl Default for RichText {
    fn default() -> Self {
        Self::html(String::new())
    }
}

/// Fields a user submits from the episode edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EpisodeForm {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Episode name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub summary: RichText,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub category: Option<i32>,
    /// Draft area the attachment was staged in
    #[serde(default)]
    pub mediafile: Option<i64>,
}
