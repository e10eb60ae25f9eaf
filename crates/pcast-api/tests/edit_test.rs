//! Episode edit page integration tests.
//!
//! Run with: `cargo test -p pcast-api --test edit_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use chrono::Duration as TimeDelta;
use pcast_core::Capability;
use pcast_db::EpisodeStore;
use serde_json::Value;

use helpers::{
    mp3_stream, setup_test_app, AUTHOR, COURSE, EDIT_PATH, MODERATED_CMID, OPEN_CMID, OTHER,
};

const WRITER: &[Capability] = &[Capability::Write];

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("Location is ASCII")
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_query_param("cmid", OPEN_CMID)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = setup_test_app().await;
    let bearer = format!("{}x", app.bearer(AUTHOR, WRITER));

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", bearer)
        .add_query_param("cmid", OPEN_CMID)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_form_for_new_episode() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .add_query_param("cmid", OPEN_CMID)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.json::<Value>();
    assert_eq!(page["cmid"], OPEN_CMID);
    assert_eq!(page["episode_id"], Value::Null);
    assert_eq!(page["title"], "Weekly Show");
    assert_eq!(page["heading"], "Radio 101");
    assert!(page["draft_item_id"].as_i64().unwrap() > 0);
    assert_eq!(page["form"]["mediafile"], page["draft_item_id"]);
}

#[tokio::test]
async fn test_form_for_existing_episode() {
    let app = setup_test_app().await;
    app.seed_episode(7, AUTHOR, TimeDelta::minutes(1)).await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .add_query_param("cmid", OPEN_CMID)
        .add_query_param("id", 7)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.json::<Value>();
    assert_eq!(page["episode_id"], 7);
    assert_eq!(page["form"]["name"], "Pilot");
    assert_eq!(page["form"]["summary"]["text"], "<p>First</p>");
}

#[tokio::test]
async fn test_create_episode_without_attachment() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("name", "My Episode 1")
        .add_text("summary", "<p>Hello</p>")
        .add_text("keywords", "rust")
        .add_text("category", "1003");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/mod/pcast/view.php?id=3&mode=addentry&hook=1"
    );

    let episode = app.episodes.get_episode(1).await.unwrap().unwrap();
    assert_eq!(episode.name, "MyEpisode1");
    assert_eq!(episode.userid, AUTHOR);
    assert_eq!(episode.course, COURSE);
    assert!(episode.approved);
    assert_eq!(episode.duration, None);
    assert_eq!(episode.timecreated, episode.timemodified);
    assert_eq!((episode.topcategory, episode.nestedcategory), (1, 3));

    let entries = app.audit.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "add episode");
    assert_eq!(entries[0].url, "view.php?id=3&mode=addentry&hook=1");
}

#[tokio::test]
async fn test_mp3_attachment_backfills_duration_pending_approval() {
    let app = setup_test_app().await;

    // 1250 frames * 24 ms = 30 s
    let form = MultipartForm::new()
        .add_text("cmid", MODERATED_CMID)
        .add_text("name", "Interview")
        .add_part(
            "attachments",
            Part::bytes(mp3_stream(1250))
                .file_name("interview.mp3")
                .mime_type("audio/mpeg"),
        );

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let episode = app.episodes.get_episode(1).await.unwrap().unwrap();
    assert!(!episode.approved);
    let duration = episode.duration.expect("duration backfilled");
    assert!((29..=31).contains(&duration), "duration was {}", duration);
    assert!(episode.mediafile.is_some());
    assert_eq!(app.storage.len().await, 1);
}

#[tokio::test]
async fn test_approver_submission_is_approved() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("cmid", MODERATED_CMID)
        .add_text("name", "Approved");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header(
            "Authorization",
            app.bearer(AUTHOR, &[Capability::Write, Capability::Approve]),
        )
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(app.episodes.get_episode(1).await.unwrap().unwrap().approved);
}

#[tokio::test]
async fn test_non_media_attachment_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("name", "Notes")
        .add_part(
            "attachments",
            Part::bytes(b"just text".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");
    assert!(app.episodes.is_empty().await);
}

#[tokio::test]
async fn test_cancel_redirects_to_episode_without_writing() {
    let app = setup_test_app().await;
    let seeded = app.seed_episode(7, AUTHOR, TimeDelta::minutes(1)).await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("id", 7)
        .add_text("name", "Renamed")
        .add_text("cancel", "Cancel");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/mod/pcast/view.php?id=3&mode=addentry&hook=7"
    );
    assert_eq!(app.episodes.write_count().await, 0);
    assert_eq!(app.episodes.get_episode(7).await.unwrap(), Some(seeded));
    assert!(app.audit.entries().await.is_empty());
}

#[tokio::test]
async fn test_update_keeps_identity_fields() {
    let app = setup_test_app().await;
    let seeded = app.seed_episode(7, AUTHOR, TimeDelta::minutes(1)).await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("id", 7)
        .add_text("name", "Second Take")
        .add_text("explicit", "1");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let episode = app.episodes.get_episode(7).await.unwrap().unwrap();
    assert_eq!(episode.name, "SecondTake");
    assert!(episode.explicit);
    assert_eq!(episode.userid, seeded.userid);
    assert_eq!(episode.pcastid, seeded.pcastid);
    assert_eq!(episode.timecreated, seeded.timecreated);
    assert!(episode.timemodified > seeded.timemodified);
    assert_eq!(app.audit.entries().await[0].action, "update episode");
}

#[tokio::test]
async fn test_editing_others_episode_is_refused_with_continue_url() {
    let app = setup_test_app().await;
    app.seed_episode(7, OTHER, TimeDelta::minutes(1)).await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .add_query_param("cmid", OPEN_CMID)
        .add_query_param("id", 7)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "CANNOT_EDIT_OTHERS");
    assert_eq!(body["continue_url"], "view.php?id=3&mode=addentry&hook=7");
}

#[tokio::test]
async fn test_expired_window_is_refused() {
    let app = setup_test_app().await;
    app.seed_episode(7, AUTHOR, TimeDelta::hours(2)).await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("id", 7)
        .add_text("name", "Too Late");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "EDIT_TIME_EXPIRED");
    assert_eq!(app.episodes.write_count().await, 0);
}

#[tokio::test]
async fn test_upload_without_write_stores_nothing() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("name", "Spam")
        .add_part(
            "attachments",
            Part::bytes(mp3_stream(50))
                .file_name("spam.mp3")
                .mime_type("audio/mpeg"),
        );

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, &[]))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "NO_EDIT_PRIVILEGES");
    assert!(app.storage.is_empty().await);
    assert!(app.episodes.is_empty().await);
}

#[tokio::test]
async fn test_upload_to_expired_episode_stores_nothing() {
    let app = setup_test_app().await;
    app.seed_episode(7, AUTHOR, TimeDelta::hours(2)).await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("id", 7)
        .add_text("name", "Too Late")
        .add_part(
            "attachments",
            Part::bytes(mp3_stream(50))
                .file_name("late.mp3")
                .mime_type("audio/mpeg"),
        );

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "EDIT_TIME_EXPIRED");
    assert_eq!(app.storage.len().await, 0);
}

#[tokio::test]
async fn test_manager_edits_after_window() {
    let app = setup_test_app().await;
    app.seed_episode(7, OTHER, TimeDelta::hours(2)).await;

    let form = MultipartForm::new()
        .add_text("cmid", OPEN_CMID)
        .add_text("id", 7)
        .add_text("name", "Fixed Title");

    let response = app
        .client()
        .post(EDIT_PATH)
        .add_header(
            "Authorization",
            app.bearer(AUTHOR, &[Capability::Write, Capability::Manage]),
        )
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let episode = app.episodes.get_episode(7).await.unwrap().unwrap();
    assert_eq!(episode.name, "FixedTitle");
    assert_eq!(episode.userid, OTHER);
}

#[tokio::test]
async fn test_missing_cmid_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "MISSING_MODULE_REFERENCE");
}

#[tokio::test]
async fn test_unknown_module_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer(AUTHOR, WRITER))
        .add_query_param("cmid", 99)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "MODULE_NOT_FOUND");
}

#[tokio::test]
async fn test_grant_for_another_course_does_not_apply() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(EDIT_PATH)
        .add_header("Authorization", app.bearer_scoped(AUTHOR, WRITER, Some(99)))
        .add_query_param("cmid", OPEN_CMID)
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "NO_EDIT_PRIVILEGES");
}
