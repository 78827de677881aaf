use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// What an embedded player lets the app observe and control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCapabilities {
    pub reports_time: bool,
    pub accepts_commands: bool,
}

impl SurfaceCapabilities {
    /// Anti-skip needs both a trustworthy time feed and a way to seek back.
    #[must_use]
    pub fn can_enforce_sequential(&self) -> bool {
        self.reports_time && self.accepts_commands
    }
}

/// Hosting service of the quiz video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VideoKind {
    #[default]
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "gdrive")]
    GDrive,
}

impl VideoKind {
    pub const ALL: [VideoKind; 2] = [VideoKind::YouTube, VideoKind::GDrive];

    /// Stable wire name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VideoKind::YouTube => "youtube",
            VideoKind::GDrive => "gdrive",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "youtube" => Some(VideoKind::YouTube),
            "gdrive" => Some(VideoKind::GDrive),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VideoKind::YouTube => "YouTube",
            VideoKind::GDrive => "Google Drive",
        }
    }

    /// Human-readable link format, used in validation messages and placeholders.
    #[must_use]
    pub fn expected_format(self) -> &'static str {
        match self {
            VideoKind::YouTube => {
                "https://www.youtube.com/watch?v=<id> or https://youtu.be/<id>"
            }
            VideoKind::GDrive => "https://drive.google.com/file/d/<id>/view?usp=sharing",
        }
    }

    #[must_use]
    pub fn capabilities(self) -> SurfaceCapabilities {
        match self {
            VideoKind::YouTube => SurfaceCapabilities {
                reports_time: true,
                accepts_commands: true,
            },
            VideoKind::GDrive => SurfaceCapabilities::default(),
        }
    }

    /// Extract the video id from a share link.
    ///
    /// Links without a scheme are treated as `https`.
    #[must_use]
    pub fn extract_id(self, raw_link: &str) -> Option<String> {
        let url = parse_link(raw_link)?;
        let host = url.host_str()?.to_ascii_lowercase();
        match self {
            VideoKind::YouTube => youtube_id(&url, &host),
            VideoKind::GDrive => drive_id(&url, &host),
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VideoLinkError {
    #[error("please enter a valid {kind} URL (expected {})", .kind.expected_format())]
    InvalidLink { kind: VideoKind },
}

/// A validated reference to the quiz video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    kind: VideoKind,
    raw_link: String,
    resolved_id: String,
}

impl VideoSource {
    /// Validate `raw_link` for `kind` and resolve the video id.
    ///
    /// # Errors
    ///
    /// Returns `VideoLinkError::InvalidLink` if no id can be extracted.
    pub fn parse(kind: VideoKind, raw_link: impl Into<String>) -> Result<Self, VideoLinkError> {
        let raw_link = raw_link.into().trim().to_string();
        let resolved_id = kind
            .extract_id(&raw_link)
            .ok_or(VideoLinkError::InvalidLink { kind })?;
        Ok(Self {
            kind,
            raw_link,
            resolved_id,
        })
    }

    /// Rehydrate a source from storage. A blank stored id is re-resolved from the link.
    ///
    /// # Errors
    ///
    /// Returns `VideoLinkError::InvalidLink` when the id is blank and the link
    /// does not resolve either.
    pub fn from_persisted(
        kind: VideoKind,
        raw_link: String,
        resolved_id: String,
    ) -> Result<Self, VideoLinkError> {
        let resolved_id = resolved_id.trim().to_string();
        if resolved_id.is_empty() {
            return Self::parse(kind, raw_link);
        }
        Ok(Self {
            kind,
            raw_link,
            resolved_id,
        })
    }

    #[must_use]
    pub fn kind(&self) -> VideoKind {
        self.kind
    }

    #[must_use]
    pub fn raw_link(&self) -> &str {
        &self.raw_link
    }

    #[must_use]
    pub fn resolved_id(&self) -> &str {
        &self.resolved_id
    }

    /// URL for the embedded player iframe.
    #[must_use]
    pub fn embed_url(&self) -> String {
        match self.kind {
            VideoKind::YouTube => format!(
                "https://www.youtube.com/embed/{}?enablejsapi=1&controls=1&disablekb=1&modestbranding=1&rel=0&showinfo=0",
                self.resolved_id
            ),
            VideoKind::GDrive => {
                format!("https://drive.google.com/file/d/{}/preview", self.resolved_id)
            }
        }
    }
}

fn parse_link(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") {
        Url::parse(trimmed).ok()
    } else {
        Url::parse(&format!("https://{trimmed}")).ok()
    }
}

fn youtube_id(url: &Url, host: &str) -> Option<String> {
    if host == "youtu.be" {
        let first = url.path_segments()?.next()?;
        return video_id(first);
    }
    if host == "youtube.com" || host.ends_with(".youtube.com") {
        if url.path().trim_end_matches('/') != "/watch" {
            return None;
        }
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| video_id(&value));
    }
    None
}

fn drive_id(url: &Url, host: &str) -> Option<String> {
    if host != "drive.google.com" {
        return None;
    }
    let mut segments = url.path_segments()?;
    if segments.next()? != "file" || segments.next()? != "d" {
        return None;
    }
    video_id(segments.next()?)
}

/// Both hosts use URL-safe base64 ids: `[A-Za-z0-9_-]+`.
fn video_id(value: &str) -> Option<String> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| value.to_string())
}
