use crate::catalog::{Category, Transition, ARTISTIC, DIRECTIONAL, DYNAMIC, SMOOTH};
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::Transition::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Celebration,
    Announcement,
    Rule,
    Photo,
    Custom,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "celebration" => Some(Self::Celebration),
            "announcement" => Some(Self::Announcement),
            "rule" => Some(Self::Rule),
            "photo" => Some(Self::Photo),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Video,
    Gif,
    Image,
}

impl MediaType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "video" => Some(Self::Video),
            "gif" => Some(Self::Gif),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Gif => "gif",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionClass {
    First,
    Middle,
    Last,
}

impl PositionClass {
    /// A lone slide counts as `First`. `index` past the end is clamped.
    pub fn classify(index: usize, len: usize) -> Self {
        let last = len.saturating_sub(1);
        let index = index.min(last);
        if index == 0 {
            Self::First
        } else if index == last {
            Self::Last
        } else {
            Self::Middle
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionRule {
    pub primary: Vec<Transition>,
    pub secondary: Vec<Transition>,
    pub avoid: Vec<Transition>,
}

impl SelectionRule {
    pub fn new(primary: &[Transition], secondary: &[Transition], avoid: &[Transition]) -> Self {
        Self {
            primary: primary.to_vec(),
            secondary: secondary.to_vec(),
            avoid: avoid.to_vec(),
        }
    }

    pub fn avoids(&self, t: Transition) -> bool {
        self.avoid.contains(&t)
    }
}

/// Lookup tables consulted by the selector. Missing entries simply
/// contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub content: HashMap<ContentType, SelectionRule>,
    pub media: HashMap<MediaType, SelectionRule>,
    pub position: HashMap<PositionClass, Vec<Transition>>,
    pub contrast: HashMap<Category, Vec<Transition>>,
}

impl RuleSet {
    pub fn standard() -> Self {
        let content = HashMap::from([
            (
                ContentType::Celebration,
                // Fade and blur read as too subtle for a celebration.
                SelectionRule::new(
                    &[Particle, ZoomIn, Glitch],
                    &[Rotate, Flip, Morph],
                    &[Fade, Blur],
                ),
            ),
            (
                ContentType::Announcement,
                SelectionRule::new(&[SlideUp, Fade, Push], &[Dissolve, Wipe], &[Glitch, Morph]),
            ),
            (
                ContentType::Rule,
                SelectionRule::new(
                    &[Fade, SlideRight, Dissolve],
                    &[SlideLeft, Blur],
                    &[Glitch, Particle],
                ),
            ),
            (
                ContentType::Photo,
                SelectionRule::new(
                    &[ZoomIn, ZoomOut, Dissolve],
                    &[Fade, SlideLeft, SlideRight],
                    &[Glitch],
                ),
            ),
            (
                ContentType::Custom,
                SelectionRule::new(&[Fade, SlideLeft, ZoomIn], &[SlideRight, Dissolve], &[]),
            ),
        ]);

        let media = HashMap::from([
            (
                MediaType::Video,
                // Moving content plus zoom/rotate is disorienting.
                SelectionRule::new(
                    &[Fade, Dissolve, SlideLeft],
                    &[SlideRight, Push],
                    &[ZoomIn, ZoomOut, Rotate],
                ),
            ),
            (
                MediaType::Gif,
                SelectionRule::new(&[Fade, SlideUp, ZoomIn], &[SlideDown, Dissolve], &[Glitch]),
            ),
            (
                MediaType::Image,
                SelectionRule::new(
                    &[ZoomIn, ZoomOut, Dissolve, Fade],
                    &[SlideLeft, SlideRight, Blur],
                    &[],
                ),
            ),
        ]);

        let middle: Vec<Transition> = DYNAMIC.iter().chain(DIRECTIONAL).copied().collect();
        let position = HashMap::from([
            (PositionClass::First, vec![Fade, ZoomIn, SlideUp]),
            (PositionClass::Last, vec![Fade, ZoomOut, Dissolve]),
            (PositionClass::Middle, middle),
        ]);

        let after_directional: Vec<Transition> = ARTISTIC.iter().chain(SMOOTH).copied().collect();
        let contrast = HashMap::from([
            (Category::Smooth, DYNAMIC.to_vec()),
            (Category::Dynamic, SMOOTH.to_vec()),
            (Category::Directional, after_directional),
        ]);

        Self {
            content,
            media,
            position,
            contrast,
        }
    }

    pub fn content_rule(&self, content_type: Option<ContentType>) -> Option<&SelectionRule> {
        content_type.and_then(|c| self.content.get(&c))
    }

    pub fn media_rule(&self, media_type: Option<MediaType>) -> Option<&SelectionRule> {
        media_type.and_then(|m| self.media.get(&m))
    }

    pub fn position_primary(&self, position: PositionClass) -> &[Transition] {
        self.position.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitions that stand out after one from `previous`.
    pub fn contrast_after(&self, previous: Category) -> &[Transition] {
        self.contrast.get(&previous).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_positions_in_five_slide_sequence() {
        assert_eq!(PositionClass::classify(0, 5), PositionClass::First);
        assert_eq!(PositionClass::classify(2, 5), PositionClass::Middle);
        assert_eq!(PositionClass::classify(4, 5), PositionClass::Last);
    }

    #[test]
    fn classify_degenerate_sequences() {
        assert_eq!(PositionClass::classify(0, 1), PositionClass::First);
        assert_eq!(PositionClass::classify(0, 0), PositionClass::First);
        assert_eq!(PositionClass::classify(9, 5), PositionClass::Last);
        assert_eq!(PositionClass::classify(1, 2), PositionClass::Last);
    }

    #[test]
    fn standard_rules_never_prefer_what_they_avoid() {
        let rules = RuleSet::standard();
        for rule in rules.content.values().chain(rules.media.values()) {
            for t in rule.primary.iter().chain(&rule.secondary) {
                assert!(!rule.avoids(*t), "{} both preferred and avoided", t.name());
            }
        }
    }

    #[test]
    fn contrast_has_no_entry_after_artistic() {
        let rules = RuleSet::standard();
        assert!(rules.contrast_after(Category::Artistic).is_empty());
        assert_eq!(rules.contrast_after(Category::Smooth), DYNAMIC);
        assert_eq!(rules.contrast_after(Category::Directional).len(), 9);
    }

    #[test]
    fn unknown_dimension_values_have_no_rule() {
        let rules = RuleSet::standard();
        assert!(rules.content_rule(ContentType::parse("poster")).is_none());
        assert!(rules.media_rule(MediaType::parse("audio")).is_none());
        assert!(rules.content_rule(Some(ContentType::Rule)).is_some());
    }
}
