use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PixdiffError;

/// Which logical image an annotation belongs to. Fixed at creation time;
/// annotations never migrate between slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSlot {
    A,
    B,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::A, ImageSlot::B];
}

impl FromStr for ImageSlot {
    type Err = PixdiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(ImageSlot::A),
            "B" | "b" => Ok(ImageSlot::B),
            other => Err(PixdiffError::InvalidArgument(format!(
                "unknown image slot {other:?} (expected A or B)"
            ))),
        }
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSlot::A => write!(f, "A"),
            ImageSlot::B => write!(f, "B"),
        }
    }
}

/// Active annotation tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Draw,
    Text,
}

impl FromStr for ToolKind {
    type Err = PixdiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(ToolKind::Draw),
            "text" => Ok(ToolKind::Text),
            other => Err(PixdiffError::InvalidArgument(format!(
                "unknown tool {other:?} (expected draw or text)"
            ))),
        }
    }
}

/// One sampled input point of a freehand stroke, in image space
/// (origin at the image center), with pen pressure in [0, 1].
///
/// Serializes as a bare `[x, y, pressure]` triple to match the wire shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32, pressure: f32) -> Self {
        Self { x, y, pressure }
    }
}

impl From<[f32; 3]> for StrokePoint {
    fn from([x, y, pressure]: [f32; 3]) -> Self {
        Self { x, y, pressure }
    }
}

impl From<StrokePoint> for [f32; 3] {
    fn from(p: StrokePoint) -> Self {
        [p.x, p.y, p.pressure]
    }
}

/// One continuous freehand gesture.
///
/// Coordinates are image-space and carry no zoom or pan; `size` is stored
/// pre-divided by the base fit scale at commit time so the rendered
/// thickness tracks the image content across resizes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub color: String,
    pub size: f32,
}

/// A committed text label anchored in image space. Same scale-compensation
/// rule as [`Stroke::size`] applies to `font_size`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: String,
    #[serde(rename = "fontSize")]
    pub font_size: f32,
}

/// Fixed two-slot container keyed by [`ImageSlot`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerSlot<T> {
    #[serde(rename = "A", default)]
    pub a: Vec<T>,
    #[serde(rename = "B", default)]
    pub b: Vec<T>,
}

impl<T> Default for PerSlot<T> {
    fn default() -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
        }
    }
}

impl<T> PerSlot<T> {
    pub fn get(&self, slot: ImageSlot) -> &Vec<T> {
        match slot {
            ImageSlot::A => &self.a,
            ImageSlot::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, slot: ImageSlot) -> &mut Vec<T> {
        match slot {
            ImageSlot::A => &mut self.a,
            ImageSlot::B => &mut self.b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

/// The full annotation state of one comparison session.
///
/// Deserialization also accepts the legacy wire shape, a bare array of
/// strokes, which is interpreted as `strokes.A` with everything else empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireAnnotationSet")]
pub struct AnnotationSet {
    #[serde(default)]
    pub strokes: PerSlot<Stroke>,
    #[serde(default)]
    pub texts: PerSlot<TextAnnotation>,
}

impl AnnotationSet {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.texts.is_empty()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireAnnotationSet {
    Full {
        #[serde(default)]
        strokes: PerSlot<Stroke>,
        #[serde(default)]
        texts: PerSlot<TextAnnotation>,
    },
    Legacy(Vec<Stroke>),
}

impl From<WireAnnotationSet> for AnnotationSet {
    fn from(wire: WireAnnotationSet) -> Self {
        match wire {
            WireAnnotationSet::Full { strokes, texts } => Self { strokes, texts },
            WireAnnotationSet::Legacy(strokes) => Self {
                strokes: PerSlot {
                    a: strokes,
                    b: Vec::new(),
                },
                texts: PerSlot::default(),
            },
        }
    }
}
