use serde::{Deserialize, Serialize};

use super::Podcast;

/// Course hosting one or more podcast placements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub fullname: String,
    /// Upload limit in bytes for the course; 0 means no course-level limit.
    pub maxbytes: i64,
}

/// Placement of a module instance inside a course (the `cmid` target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CourseModule {
    pub id: i64,
    pub course: i64,
    pub instance: i64,
}

/// Identifiers a capability check is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleContext {
    pub cmid: i64,
    pub course_id: i64,
    pub podcast_id: i64,
}

/// Everything a `cmid` resolves to
#[derive(Debug, Clone)]
pub struct Placement {
    pub course_module: CourseModule,
    pub course: Course,
    pub podcast: Podcast,
}

impl Placement {
    pub fn cmid(&self) -> i64 {
        self.course_module.id
    }

    pub fn context(&self) -> ModuleContext {
        ModuleContext {
            cmid: self.course_module.id,
            course_id: self.course.id,
            podcast_id: self.podcast.id,
        }
    }

    /// Attachment size limit: the course's own limit, else the site fallback.
    pub fn max_attachment_bytes(&self, site_limit: u64) -> u64 {
        if self.course.maxbytes > 0 {
            (self.course.maxbytes as u64).min(site_limit)
        } else {
            site_limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn placement(maxbytes: i64) -> Placement {
        Placement {
            course_module: CourseModule {
                id: 3,
                course: 2,
                instance: 1,
            },
            course: Course {
                id: 2,
                fullname: "Radio 101".to_string(),
                maxbytes,
            },
            podcast: Podcast {
                id: 1,
                course: 2,
                name: "Weekly".to_string(),
                intro: String::new(),
                timecreated: Utc::now(),
                timemodified: None,
                requireapproval: false,
                grade: 0,
            },
        }
    }

    #[test]
    fn test_context_uses_placement_ids() {
        let ctx = placement(0).context();
        assert_eq!(ctx.cmid, 3);
        assert_eq!(ctx.course_id, 2);
        assert_eq!(ctx.podcast_id, 1);
    }

    #[test]
    fn test_course_limit_wins_when_smaller() {
        assert_eq!(placement(1024).max_attachment_bytes(4096), 1024);
        assert_eq!(placement(0).max_attachment_bytes(4096), 4096);
        assert_eq!(placement(8192).max_attachment_bytes(4096), 4096);
    }
}
