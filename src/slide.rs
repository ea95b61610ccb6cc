use crate::media;
use crate::rules::{ContentType, MediaType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    Manual,
    Random,
    Auto,
}

impl TransitionMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "manual" => Some(Self::Manual),
            "random" => Some(Self::Random),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// A slide row as the slide store hands it over. Only the fields the
/// selector reads are kept; everything else in the row is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlideDescriptor {
    #[serde(default, alias = "contentType")]
    pub content_type: Option<String>,
    #[serde(default, alias = "mediaType")]
    pub media_type: Option<String>,
    #[serde(default, alias = "transitionMode")]
    pub transition_mode: Option<String>,
    #[serde(default, alias = "transitionType")]
    pub transition_type: Option<String>,
    #[serde(default, alias = "transitionDuration")]
    pub transition_duration: Option<i64>,
    #[serde(default, alias = "mediaPath")]
    pub media_path: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SlideDescriptor {
    /// Missing mode falls back to `default`; an unrecognised one is `Auto`.
    pub fn mode(&self, default: TransitionMode) -> TransitionMode {
        match non_empty(&self.transition_mode) {
            None => default,
            Some(s) => TransitionMode::parse(s).unwrap_or(TransitionMode::Auto),
        }
    }

    pub fn manual_type(&self) -> Option<&str> {
        non_empty(&self.transition_type)
    }

    pub fn content(&self) -> Option<ContentType> {
        non_empty(&self.content_type).and_then(ContentType::parse)
    }

    /// Declared media type, or one detected from `media_path` when the row
    /// has none.
    pub fn media(&self) -> Option<MediaType> {
        match non_empty(&self.media_type) {
            Some(s) => MediaType::parse(s),
            None => non_empty(&self.media_path).map(|p| media::detect_media_type(p, None)),
        }
    }

    pub fn duration_ms(&self, default_ms: u64) -> u64 {
        match self.transition_duration {
            Some(ms) if ms > 0 => ms as u64,
            _ => default_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_store_rows_in_either_case() {
        let snake: SlideDescriptor = serde_json::from_value(json!({
            "id": 7,
            "title": "Kurallar",
            "content_type": "rule",
            "media_type": "image",
            "transition_mode": "manual",
            "transition_type": "wipe",
            "transition_duration": null
        }))
        .expect("snake_case row");
        assert_eq!(snake.content(), Some(ContentType::Rule));
        assert_eq!(snake.mode(TransitionMode::Auto), TransitionMode::Manual);
        assert_eq!(snake.manual_type(), Some("wipe"));
        assert_eq!(snake.duration_ms(1000), 1000);

        let camel: SlideDescriptor = serde_json::from_value(json!({
            "contentType": "photo",
            "mediaPath": "/uploads/clip.MP4",
            "transitionDuration": 1500
        }))
        .expect("camelCase row");
        assert_eq!(camel.content(), Some(ContentType::Photo));
        assert_eq!(camel.media(), Some(MediaType::Video));
        assert_eq!(camel.duration_ms(1000), 1500);
    }

    #[test]
    fn mode_defaults_and_unknowns() {
        let mut s = SlideDescriptor::default();
        assert_eq!(s.mode(TransitionMode::Random), TransitionMode::Random);
        s.transition_mode = Some("  ".into());
        assert_eq!(s.mode(TransitionMode::Random), TransitionMode::Random);
        s.transition_mode = Some("chaotic".into());
        assert_eq!(s.mode(TransitionMode::Random), TransitionMode::Auto);
        s.transition_type = Some(String::new());
        assert_eq!(s.manual_type(), None);
    }

    #[test]
    fn declared_unknown_media_type_is_not_guessed() {
        let s = SlideDescriptor {
            media_type: Some("audio".into()),
            media_path: Some("party.gif".into()),
            ..Default::default()
        };
        assert_eq!(s.media(), None);
    }
}
