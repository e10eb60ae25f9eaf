//! Who may edit an existing episode.

use std::time::Duration;

use pcast_core::models::{Episode, ModuleContext};
use pcast_core::RequestContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    Allowed,
    /// The user did not write the episode and cannot manage the podcast
    NotAuthor,
    /// The author's editing window has closed
    WindowExpired,
    /// The author is inside the window but lacks write
    MissingWrite,
}

#[derive(Debug, Clone, Copy)]
pub struct EditPolicy {
    pub max_editing_time: Duration,
}

impl EditPolicy {
    pub fn new(max_editing_time: Duration) -> Self {
        Self { max_editing_time }
    }

    /// Whether `now - timecreated` is still strictly below the window.
    /// A creation time in the future counts as inside the window.
    pub fn in_edit_window(&self, ctx: &RequestContext<'_>, episode: &Episode) -> bool {
        match (ctx.now - episode.timecreated).to_std() {
            Ok(elapsed) => elapsed < self.max_editing_time,
            Err(_) => true,
        }
    }

    pub fn evaluate(
        &self,
        ctx: &RequestContext<'_>,
        module: &ModuleContext,
        episode: &Episode,
    ) -> EditDecision {
        if ctx.capabilities.can_manage(ctx.user_id, module) {
            return EditDecision::Allowed;
        }
        if episode.userid != ctx.user_id {
            return EditDecision::NotAuthor;
        }
        if !self.in_edit_window(ctx, episode) {
            return EditDecision::WindowExpired;
        }
        if !ctx.capabilities.can_write(ctx.user_id, module) {
            return EditDecision::MissingWrite;
        }
        EditDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as TimeDelta, Utc};
    use pcast_core::{Capability, StaticCapabilities};

    const MODULE: ModuleContext = ModuleContext {
        cmid: 3,
        course_id: 2,
        podcast_id: 1,
    };

    fn episode_by(userid: i64, age: TimeDelta) -> (Episode, chrono::DateTime<Utc>) {
        let now = Utc::now();
        (
            Episode {
                id: Some(7),
                userid,
                timecreated: now - age,
                timemodified: now - age,
                ..Episode::default()
            },
            now,
        )
    }

    fn policy() -> EditPolicy {
        EditPolicy::new(Duration::from_secs(1800))
    }

    #[test]
    fn test_author_inside_window_with_write() {
        let caps = StaticCapabilities::new([Capability::Write]);
        let (episode, now) = episode_by(5, TimeDelta::minutes(10));
        let ctx = RequestContext::new(5, &caps).at(now);
        assert_eq!(policy().evaluate(&ctx, &MODULE, &episode), EditDecision::Allowed);
    }

    #[test]
    fn test_author_after_window() {
        let caps = StaticCapabilities::new([Capability::Write]);
        let (episode, now) = episode_by(5, TimeDelta::minutes(31));
        let ctx = RequestContext::new(5, &caps).at(now);
        assert_eq!(
            policy().evaluate(&ctx, &MODULE, &episode),
            EditDecision::WindowExpired
        );
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let caps = StaticCapabilities::new([Capability::Write]);
        let (episode, now) = episode_by(5, TimeDelta::seconds(1800));
        let ctx = RequestContext::new(5, &caps).at(now);
        assert!(!policy().in_edit_window(&ctx, &episode));
    }

    #[test]
    fn test_non_author_denied_regardless_of_window() {
        let caps = StaticCapabilities::new([Capability::Write]);
        for age in [TimeDelta::seconds(1), TimeDelta::days(3)] {
            let (episode, now) = episode_by(8, age);
            let ctx = RequestContext::new(5, &caps).at(now);
            assert_eq!(
                policy().evaluate(&ctx, &MODULE, &episode),
                EditDecision::NotAuthor
            );
        }
    }

    #[test]
    fn test_manager_bypasses_ownership_and_window() {
        let caps = StaticCapabilities::new([Capability::Manage]);
        let (episode, now) = episode_by(8, TimeDelta::days(30));
        let ctx = RequestContext::new(5, &caps).at(now);
        assert_eq!(policy().evaluate(&ctx, &MODULE, &episode), EditDecision::Allowed);
    }

    #[test]
    fn test_author_without_write() {
        let caps = StaticCapabilities::none();
        let (episode, now) = episode_by(5, TimeDelta::minutes(1));
        let ctx = RequestContext::new(5, &caps).at(now);
        assert_eq!(
            policy().evaluate(&ctx, &MODULE, &episode),
            EditDecision::MissingWrite
        );
    }
}
