//! Copies submitted form values onto an episode and derives computed fields.

use chrono::{DateTime, Utc};
use pcast_core::models::{Episode, EpisodeForm};

use crate::categories::CategoryResolver;

/// Keep ASCII letters and digits only: `"My Episode 1"` becomes `"MyEpisode1"`.
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Apply the user-editable fields. Ownership, placement, creation time and
/// approval are left to the caller.
pub fn bind_form(
    episode: &mut Episode,
    form: EpisodeForm,
    now: DateTime<Utc>,
    categories: &dyn CategoryResolver,
) {
    let selection = categories.resolve(form.category);

    episode.name = sanitize_name(&form.name);
    episode.summary = form.summary.text;
    episode.subtitle = form.subtitle;
    episode.keywords = form.keywords;
    episode.explicit = form.explicit;
    episode.category = form.category;
    episode.topcategory = selection.topcategory;
    episode.nestedcategory = selection.nestedcategory;
    episode.mediafile = form.mediafile;
    episode.timemodified = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ItunesCategoryResolver;
    use pcast_core::models::RichText;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My Episode 1"), "MyEpisode1");
        assert_eq!(sanitize_name("Épisode #2: the-end!"), "pisode2theend");
        assert_eq!(sanitize_name("!!!"), "");
    }

    #[test]
    fn test_bind_unwraps_summary_and_derives_categories() {
        let now = Utc::now();
        let mut episode = Episode::shell();
        bind_form(
            &mut episode,
            EpisodeForm {
                name: "Pilot Show".to_string(),
                summary: RichText::html("<p>Intro</p>"),
                subtitle: "First".to_string(),
                keywords: "pilot,intro".to_string(),
                explicit: true,
                category: Some(2005),
                mediafile: Some(77),
            },
            now,
            &ItunesCategoryResolver,
        );

        assert_eq!(episode.name, "PilotShow");
        assert_eq!(episode.summary, "<p>Intro</p>");
        assert_eq!((episode.topcategory, episode.nestedcategory), (2, 5));
        assert_eq!(episode.mediafile, Some(77));
        assert_eq!(episode.timemodified, now);
        assert!(episode.is_new());
    }
}
