//! Video link normalisation
//!
//! Recipe cards embed the walkthrough video, which needs the `/embed/` form
//! of a YouTube link rather than the watch page the feed publishes.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

/// Base for embeddable YouTube links
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

lazy_static! {
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/v/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("video id pattern is valid"))
    .collect();
}

/// Converts a YouTube link into its embeddable form.
///
/// Links already in `/embed/` form are returned unchanged. Watch, short and
/// `/v/` links are rewritten to `https://www.youtube.com/embed/<id>`. Any
/// other link is passed through when it parses as a URL.
///
/// # Returns
/// * `Some(String)` - A URL suitable for embedding
/// * `None` - The input is not a URL at all
pub fn youtube_embed_url(link: &str) -> Option<String> {
    if link.contains("youtube.com/embed") {
        return Some(link.to_string());
    }

    for pattern in VIDEO_ID_PATTERNS.iter() {
        if let Some(id) = pattern.captures(link).and_then(|caps| caps.get(1)) {
            return Some(format!("{}{}", YOUTUBE_EMBED_BASE, id.as_str()));
        }
    }

    Url::parse(link).ok().map(|_| link.to_string())
}
