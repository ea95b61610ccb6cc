use crate::catalog::{Transition, SAFE};
use crate::rules::{ContentType, MediaType, RuleSet};
use serde::Serialize;
use std::path::Path;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi"];

/// Upload-side classification: mime type first, then file extension.
/// Anything unrecognised is treated as a still image.
pub fn detect_media_type(path: &str, mime: Option<&str>) -> MediaType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = mime.map(|m| m.trim().to_ascii_lowercase()).unwrap_or_default();

    if mime.starts_with("video/") || VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaType::Video
    } else if mime == "image/gif" || ext == "gif" {
        MediaType::Gif
    } else {
        MediaType::Image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Celebration,
    Announcement,
    Calm,
    Energetic,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Brightness {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProfile {
    pub mood: Mood,
    pub brightness: Brightness,
    pub recommended: Vec<Transition>,
}

// Checked in order; first hit wins.
const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (
        Mood::Celebration,
        &["celebration", "party", "birthday", "festival", "congrat"],
    ),
    (Mood::Announcement, &["announcement", "notice", "info", "alert"]),
    (Mood::Calm, &["calm", "peaceful", "serene", "quiet"]),
    (Mood::Energetic, &["energy", "action", "sport", "dynamic"]),
];

/// Guesses a mood from keywords in the asset's file name.
pub fn analyze_media_path(path: &str, rules: &RuleSet) -> MediaProfile {
    let path = path.to_lowercase();

    for (mood, keywords) in MOOD_KEYWORDS {
        if !keywords.iter().any(|k| path.contains(k)) {
            continue;
        }
        let brightness = match mood {
            Mood::Celebration | Mood::Energetic => Brightness::High,
            _ => Brightness::Medium,
        };
        let source = if *mood == Mood::Celebration {
            ContentType::Celebration
        } else {
            ContentType::Custom
        };
        let recommended = rules
            .content_rule(Some(source))
            .map(|r| r.primary.clone())
            .unwrap_or_default();
        return MediaProfile {
            mood: *mood,
            brightness,
            recommended,
        };
    }

    MediaProfile {
        mood: Mood::Neutral,
        brightness: Brightness::Medium,
        recommended: SAFE.to_vec(),
    }
}
