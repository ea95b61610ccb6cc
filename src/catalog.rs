use serde::{Serialize, Serializer};

/// Every transition the slideshow renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Fade,
    Dissolve,
    Blur,
    ZoomIn,
    ZoomOut,
    Rotate,
    Flip,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Push,
    Wipe,
    Particle,
    Glitch,
    Morph,
    Cube,
    Cover,
    Uncover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Smooth,
    Dynamic,
    Directional,
    Artistic,
}

pub const SMOOTH: &[Transition] = &[Transition::Fade, Transition::Dissolve, Transition::Blur];

pub const DYNAMIC: &[Transition] = &[
    Transition::ZoomIn,
    Transition::ZoomOut,
    Transition::Rotate,
    Transition::Flip,
];

pub const DIRECTIONAL: &[Transition] = &[
    Transition::SlideLeft,
    Transition::SlideRight,
    Transition::SlideUp,
    Transition::SlideDown,
    Transition::Push,
    Transition::Wipe,
];

pub const ARTISTIC: &[Transition] = &[
    Transition::Particle,
    Transition::Glitch,
    Transition::Morph,
    Transition::Cube,
    Transition::Cover,
    Transition::Uncover,
];

/// Transitions that look acceptable on any slide. Last-resort pool.
pub const SAFE: &[Transition] = &[
    Transition::Fade,
    Transition::SlideLeft,
    Transition::SlideRight,
    Transition::ZoomIn,
    Transition::Dissolve,
];

/// Full catalog in stable order: smooth, dynamic, directional, artistic.
pub const ALL: &[Transition] = &[
    Transition::Fade,
    Transition::Dissolve,
    Transition::Blur,
    Transition::ZoomIn,
    Transition::ZoomOut,
    Transition::Rotate,
    Transition::Flip,
    Transition::SlideLeft,
    Transition::SlideRight,
    Transition::SlideUp,
    Transition::SlideDown,
    Transition::Push,
    Transition::Wipe,
    Transition::Particle,
    Transition::Glitch,
    Transition::Morph,
    Transition::Cube,
    Transition::Cover,
    Transition::Uncover,
];

impl Transition {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "fade" => Some(Self::Fade),
            "dissolve" => Some(Self::Dissolve),
            "blur" => Some(Self::Blur),
            "zoom-in" => Some(Self::ZoomIn),
            "zoom-out" => Some(Self::ZoomOut),
            "rotate" => Some(Self::Rotate),
            "flip" => Some(Self::Flip),
            "slide-left" => Some(Self::SlideLeft),
            "slide-right" => Some(Self::SlideRight),
            "slide-up" => Some(Self::SlideUp),
            "slide-down" => Some(Self::SlideDown),
            "push" => Some(Self::Push),
            "wipe" => Some(Self::Wipe),
            "particle" => Some(Self::Particle),
            "glitch" => Some(Self::Glitch),
            "morph" => Some(Self::Morph),
            "cube" => Some(Self::Cube),
            "cover" => Some(Self::Cover),
            "uncover" => Some(Self::Uncover),
            _ => None,
        }
    }

    /// Renderer semantics: anything it cannot draw becomes a fade.
    pub fn parse_or_fade(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Fade)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Dissolve => "dissolve",
            Self::Blur => "blur",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Rotate => "rotate",
            Self::Flip => "flip",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::Push => "push",
            Self::Wipe => "wipe",
            Self::Particle => "particle",
            Self::Glitch => "glitch",
            Self::Morph => "morph",
            Self::Cube => "cube",
            Self::Cover => "cover",
            Self::Uncover => "uncover",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Fade | Self::Dissolve | Self::Blur => Category::Smooth,
            Self::ZoomIn | Self::ZoomOut | Self::Rotate | Self::Flip => Category::Dynamic,
            Self::SlideLeft
            | Self::SlideRight
            | Self::SlideUp
            | Self::SlideDown
            | Self::Push
            | Self::Wipe => Category::Directional,
            Self::Particle
            | Self::Glitch
            | Self::Morph
            | Self::Cube
            | Self::Cover
            | Self::Uncover => Category::Artistic,
        }
    }

    pub fn is_safe(self) -> bool {
        SAFE.contains(&self)
    }
}

impl Serialize for Transition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Dynamic => "dynamic",
            Self::Directional => "directional",
            Self::Artistic => "artistic",
        }
    }

    pub fn members(self) -> &'static [Transition] {
        match self {
            Self::Smooth => SMOOTH,
            Self::Dynamic => DYNAMIC,
            Self::Directional => DIRECTIONAL,
            Self::Artistic => ARTISTIC,
        }
    }

    pub const ALL: [Category; 4] = [
        Category::Smooth,
        Category::Dynamic,
        Category::Directional,
        Category::Artistic,
    ];
}
