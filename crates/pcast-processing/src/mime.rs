/// MIME types treated as MP3 audio. `audio/mpeg` is what browsers and
/// `mime_guess` report for `.mp3`; the others are legacy aliases.
pub const MP3_MIME_TYPES: &[&str] = &["audio/mp3", "audio/mpeg", "audio/x-mp3", "audio/mpeg3"];

pub fn is_mp3_mime(mimetype: &str) -> bool {
    let essence = mimetype.split(';').next().unwrap_or_default().trim();
    MP3_MIME_TYPES
        .iter()
        .any(|mp3| essence.eq_ignore_ascii_case(mp3))
}
