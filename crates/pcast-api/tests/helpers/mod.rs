//! Test helpers: build AppState and router over in-memory collaborators.
//!
//! Run from workspace root: `cargo test -p pcast-api`.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Duration as TimeDelta, Utc};
use pcast_api::setup::routes;
use pcast_api::{AppState, JwtClaims, JwtService};
use pcast_core::models::{Course, CourseModule, Episode, Podcast};
use pcast_core::{Capability, PcastConfig, StorageBackend};
use pcast_db::{MemoryAuditLog, MemoryEpisodeStore, MemoryPodcastStore};
use pcast_processing::Mp3Processor;
use pcast_services::{EditorSettings, EpisodeEditor, ItunesCategoryResolver};
use pcast_storage::{AttachmentService, FileAreaService, MemoryFileIndex, MemoryStorage};

pub const JWT_SECRET: &str = "test-secret-that-is-at-least-32-characters";

pub const AUTHOR: i64 = 5;
pub const OTHER: i64 = 8;
pub const COURSE: i64 = 2;
/// Placement of a podcast without approval
pub const OPEN_CMID: i64 = 3;
/// Placement of a podcast that requires approval
pub const MODERATED_CMID: i64 = 4;

pub const EDIT_PATH: &str = "/mod/pcast/edit.php";

/// Test application: server plus handles on the in-memory stores.
pub struct TestApp {
    pub server: TestServer,
    pub episodes: MemoryEpisodeStore,
    pub audit: MemoryAuditLog,
    pub storage: MemoryStorage,
    jwt: JwtService,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// `Authorization` header value for `user_id` holding `capabilities`
    pub fn bearer(&self, user_id: i64, capabilities: &[Capability]) -> String {
        self.bearer_scoped(user_id, capabilities, None)
    }

    pub fn bearer_scoped(
        &self,
        user_id: i64,
        capabilities: &[Capability],
        course: Option<i64>,
    ) -> String {
        let now = Utc::now().timestamp();
        let token = self
            .jwt
            .sign(&JwtClaims {
                sub: user_id,
                capabilities: capabilities.to_vec(),
                course,
                exp: now + 600,
                iat: now,
            })
            .expect("Failed to sign test token");
        format!("Bearer {}", token)
    }

    /// Store an episode by `userid`, created `age` ago in the open podcast.
    pub async fn seed_episode(&self, id: i64, userid: i64, age: TimeDelta) -> Episode {
        let created = Utc::now() - age;
        let episode = Episode {
            id: Some(id),
            pcastid: 1,
            course: COURSE,
            userid,
            name: "Pilot".to_string(),
            summary: "<p>First</p>".to_string(),
            timecreated: created,
            timemodified: created,
            approved: true,
            ..Episode::default()
        };
        self.episodes.put_episode(episode.clone()).await;
        episode
    }
}

pub fn test_config() -> PcastConfig {
    PcastConfig {
        jwt_secret: JWT_SECRET.to_string(),
        storage_backend: StorageBackend::Memory,
        ..PcastConfig::default()
    }
}

/// Setup test app: course 2 holds an open podcast (cm 3) and a moderated one (cm 4).
pub async fn setup_test_app() -> TestApp {
    let config = test_config();

    let podcasts = MemoryPodcastStore::new();
    podcasts
        .put_course(Course {
            id: COURSE,
            fullname: "Radio 101".to_string(),
            maxbytes: 0,
        })
        .await;
    for (cmid, instance, name, requireapproval) in [
        (OPEN_CMID, 1, "Weekly Show", false),
        (MODERATED_CMID, 6, "Moderated Show", true),
    ] {
        podcasts
            .put_course_module(CourseModule {
                id: cmid,
                course: COURSE,
                instance,
            })
            .await;
        podcasts
            .put_podcast(Podcast {
                id: instance,
                course: COURSE,
                name: name.to_string(),
                intro: String::new(),
                timecreated: Utc::now(),
                timemodified: None,
                requireapproval,
                grade: 0,
            })
            .await;
    }

    let episodes = MemoryEpisodeStore::new();
    let audit = MemoryAuditLog::new();
    let storage = MemoryStorage::new();
    let attachments: Arc<dyn AttachmentService> = Arc::new(FileAreaService::new(
        Arc::new(storage.clone()),
        Arc::new(MemoryFileIndex::new()),
    ));

    let editor = EpisodeEditor::new(
        Arc::new(podcasts),
        Arc::new(episodes.clone()),
        Arc::new(audit.clone()),
        attachments.clone(),
        Arc::new(ItunesCategoryResolver),
        Arc::new(Mp3Processor::new()),
        EditorSettings::from(&config),
    );

    let state = Arc::new(AppState::new(config, editor, attachments));
    let server = TestServer::new(routes::setup_routes(state.clone()))
        .expect("Failed to create test server");

    TestApp {
        server,
        episodes,
        audit,
        storage,
        jwt: state.jwt.clone(),
    }
}

/// MPEG-1 Layer III CBR stream: 128 kbps, 48 kHz, 24 ms per 384-byte frame.
pub fn mp3_stream(frames: usize) -> Vec<u8> {
    const FRAME_LEN: usize = 384;
    let mut data = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x94, 0x00]);
        data.extend_from_slice(&frame);
    }
    data
}
