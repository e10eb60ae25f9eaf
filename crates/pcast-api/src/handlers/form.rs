//! Multipart decoding of the posted episode form.

use std::str::FromStr;

use axum::extract::Multipart;
use pcast_core::constants::ATTACHMENTS_FIELD;
use pcast_core::models::{EpisodeForm, RichText};
use pcast_core::AppError;

use crate::error::HttpAppError;

/// File sent in the `attachments` field
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Everything one POST to the edit page carries
#[derive(Debug, Default)]
pub struct PostedEdit {
    pub cmid: i64,
    pub id: i64,
    pub cancelled: bool,
    pub form: EpisodeForm,
    pub upload: Option<Upload>,
}

impl PostedEdit {
    fn apply_text(&mut self, name: &str, value: String) -> Result<(), AppError> {
        match name {
            "cmid" => self.cmid = parse_number(name, &value)?.unwrap_or(0),
            "id" => self.id = parse_number(name, &value)?.unwrap_or(0),
            "cancel" => self.cancelled = true,
            "name" => self.form.name = value,
            "summary" => self.form.summary = RichText::html(value),
            "subtitle" => self.form.subtitle = value,
            "keywords" => self.form.keywords = value,
            "explicit" => self.form.explicit = parse_flag(&value),
            "category" => {
                self.form.category = parse_number(name, &value)?.filter(|code| *code != 0)
            }
            "mediafile" => {
                self.form.mediafile = parse_number(name, &value)?.filter(|id| *id != 0)
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
        Ok(())
    }
}

/// Empty values read as absent.
fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<Option<T>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| AppError::InvalidInput(format!("Field '{}' must be a number", name)))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Read the posted edit form.
pub async fn read_edit_form(mut multipart: Multipart) -> Result<PostedEdit, HttpAppError> {
    let mut posted = PostedEdit::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == ATTACHMENTS_FIELD {
            if posted.upload.is_some() {
                return Err(HttpAppError(AppError::InvalidInput(
                    "Only one file may be attached to an episode".to_string(),
                )));
            }
            let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let data = field.bytes().await?;

            // Browsers send an empty part when no file was chosen
            if filename.is_empty() && data.is_empty() {
                continue;
            }
            posted.upload = Some(Upload {
                filename,
                data: data.to_vec(),
            });
        } else {
            let value = field.text().await?;
            posted.apply_text(&field_name, value)?;
        }
    }

    Ok(posted)
}
