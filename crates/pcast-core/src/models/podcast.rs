use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Podcast module instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Podcast {
    pub id: i64,
    pub course: i64,
    pub name: String,
    pub intro: String,
    pub timecreated: DateTime<Utc>,
    pub timemodified: Option<DateTime<Utc>>,
    /// New episodes stay hidden until someone with the approve capability signs off
    pub requireapproval: bool,
    /// Maximum grade, or `-scaleid` when graded with a scale
    pub grade: i32,
}

impl Podcast {
    /// Scale this instance is graded with, if any
    pub fn scale_id(&self) -> Option<i64> {
        (self.grade < 0).then(|| -(self.grade as i64))
    }
}

/// Settings form submitted by the host when a podcast is added or edited
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PodcastForm {
    /// Existing instance id; only meaningful on update
    #[serde(default)]
    pub instance: Option<i64>,
    pub course: i64,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Podcast name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub requireapproval: bool,
    #[serde(default)]
    pub grade: i32,
}

/// Podcast values ready to be written
#[derive(Debug, Clone)]
pub struct NewPodcast {
    pub course: i64,
    pub name: String,
    pub intro: String,
    pub timecreated: DateTime<Utc>,
    pub requireapproval: bool,
    pub grade: i32,
}

/// Podcast values written by an update
#[derive(Debug, Clone)]
pub struct PodcastUpdate {
    pub id: i64,
    pub course: i64,
    pub name: String,
    pub intro: String,
    pub timemodified: DateTime<Utc>,
    pub requireapproval: bool,
    pub grade: i32,
}
