use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use pcast_core::RequestContext;
use pcast_services::{EditPage, EditRequest, Submission};
use pcast_storage::AreaOptions;
use serde::Deserialize;

use super::form::{read_edit_form, Upload};
use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditQuery {
    #[serde(default)]
    pub cmid: i64,
    #[serde(default)]
    pub id: i64,
}

/// Form state for a new episode (`id` absent or 0) or an existing one.
#[tracing::instrument(
    skip(state, user),
    fields(user_id = user.user_id, cmid = query.cmid, episode_id = query.id, operation = "edit_form")
)]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<EditQuery>,
) -> Result<Json<EditPage>, HttpAppError> {
    let ctx = RequestContext::new(user.user_id, &user.capabilities);
    let page = state
        .editor
        .prepare(&ctx, EditRequest::new(query.cmid, query.id))
        .await?;
    Ok(Json(page))
}

/// Save or cancel a posted form, then redirect to the view page.
#[tracing::instrument(
    skip(state, user, multipart),
    fields(user_id = user.user_id, operation = "edit_submit")
)]
pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let posted = read_edit_form(multipart).await?;
    let ctx = RequestContext::new(user.user_id, &user.capabilities);
    let request = EditRequest::new(posted.cmid, posted.id);

    let submission = if posted.cancelled {
        Submission::Cancel
    } else {
        let mut form = posted.form;
        if let Some(upload) = posted.upload {
            // Refused requests must not leave staged files behind
            state.editor.check_submit_access(&ctx, request).await?;
            let draft_id = stage_upload(&state, user.user_id, form.mediafile, upload).await?;
            form.mediafile = Some(draft_id);
        }
        Submission::Save(form)
    };

    let outcome = state.editor.submit(&ctx, request, submission).await?;
    Ok(Redirect::to(&state.view_url(&outcome.redirect)).into_response())
}

/// Stage an upload into the posted draft area, or a fresh one.
///
/// Staging applies the site limit; the course limit is enforced when the
/// draft is committed.
async fn stage_upload(
    state: &AppState,
    user_id: i64,
    draft_id: Option<i64>,
    upload: Upload,
) -> Result<i64, HttpAppError> {
    let draft_id = match draft_id {
        Some(id) => id,
        None => state.attachments.prepare_draft_area(user_id, None).await?,
    };

    let options = AreaOptions::episode(state.config.max_attachment_bytes);
    state
        .attachments
        .stage_file(user_id, draft_id, &upload.filename, upload.data, &options)
        .await?;

    Ok(draft_id)
}
