use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math;

/// Integer canvas-space coordinate, `[x, y]`.
pub type Point = [i32; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(Uuid);

impl PrimitiveId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrimitiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque RGB color. Serialized as `#rrggbb`; parsed from that form or from a
/// palette name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

const PALETTE: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("gray", [190, 190, 190]),
    ("grey", [190, 190, 190]),
    ("red", [255, 0, 0]),
    ("orange", [255, 165, 0]),
    ("yellow", [255, 255, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("purple", [160, 32, 240]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
];

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color([channel(0)?, channel(2)?, channel(4)?]));
        }
        PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, rgb)| Color(*rgb))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("unknown color `{value}`"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Line,
    Triangle,
}

impl ShapeKind {
    pub fn from_name(name: &str) -> Option<ShapeKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Some(ShapeKind::Rectangle),
            "oval" => Some(ShapeKind::Oval),
            "line" => Some(ShapeKind::Line),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }
}

/// Freehand brush. Unknown names are kept as `Custom`; they get the fallback
/// thickness and leave no marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BrushKind {
    Pen,
    Pencil,
    Ink,
    Oil,
    Paint,
    Custom(String),
}

impl BrushKind {
    pub const FALLBACK_THICKNESS: u32 = 5;

    pub fn from_name(name: &str) -> BrushKind {
        match name.trim().to_ascii_lowercase().as_str() {
            "pen" => BrushKind::Pen,
            "pencil" => BrushKind::Pencil,
            "ink" => BrushKind::Ink,
            "oil" => BrushKind::Oil,
            "paint" => BrushKind::Paint,
            _ => BrushKind::Custom(name.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BrushKind::Pen => "pen",
            BrushKind::Pencil => "pencil",
            BrushKind::Ink => "ink",
            BrushKind::Oil => "oil",
            BrushKind::Paint => "paint",
            BrushKind::Custom(name) => name,
        }
    }

    pub fn default_thickness(&self) -> u32 {
        match self {
            BrushKind::Pen => 2,
            BrushKind::Pencil => 1,
            BrushKind::Ink => 4,
            BrushKind::Oil => 8,
            BrushKind::Paint => 12,
            BrushKind::Custom(_) => Self::FALLBACK_THICKNESS,
        }
    }
}

impl From<String> for BrushKind {
    fn from(name: String) -> Self {
        BrushKind::from_name(&name)
    }
}

impl From<BrushKind> for String {
    fn from(kind: BrushKind) -> Self {
        kind.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Shape(ShapeKind),
    Text,
    Emoji,
    Move,
    Eraser,
}

impl Tool {
    pub fn from_name(name: &str) -> Option<Tool> {
        if let Some(kind) = ShapeKind::from_name(name) {
            return Some(Tool::Shape(kind));
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "brush" => Some(Tool::Brush),
            "text" => Some(Tool::Text),
            "emoji" => Some(Tool::Emoji),
            "move" => Some(Tool::Move),
            "eraser" => Some(Tool::Eraser),
            _ => None,
        }
    }
}

/// Coarse classification deciding which style attributes a primitive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Shape,
    Text,
    Stroke,
    Erase,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Shape => "shape",
            Category::Text => "text",
            Category::Stroke => "stroke",
            Category::Erase => "erase",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Geometry of a primitive. The variant fixes the primitive's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mark {
    /// Round brush dab (pen, ink, oil).
    Dot { center: Point, radius: i32 },
    /// Square brush dab (paint).
    Square { center: Point, half: i32 },
    /// One pencil grain, a 1px segment.
    Grain { from: Point, to: Point },
    Shape {
        shape: ShapeKind,
        start: Point,
        end: Point,
        width: u32,
    },
    /// Text anchored at its center.
    Text {
        position: Point,
        content: String,
        font: Font,
    },
    Erase { center: Point, half: i32 },
}

impl Mark {
    pub fn category(&self) -> Category {
        match self {
            Mark::Dot { .. } | Mark::Square { .. } | Mark::Grain { .. } => Category::Stroke,
            Mark::Shape { .. } => Category::Shape,
            Mark::Text { .. } => Category::Text,
            Mark::Erase { .. } => Category::Erase,
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        let shift = |p: &mut Point| {
            p[0] += dx;
            p[1] += dy;
        };
        match self {
            Mark::Dot { center, .. } | Mark::Square { center, .. } | Mark::Erase { center, .. } => {
                shift(center)
            }
            Mark::Grain { from, to } => {
                shift(from);
                shift(to);
            }
            Mark::Shape { start, end, .. } => {
                shift(start);
                shift(end);
            }
            Mark::Text { position, .. } => shift(position),
        }
    }

    /// Reference point used to report where a primitive sits.
    pub fn origin(&self) -> Point {
        match self {
            Mark::Dot { center, .. } | Mark::Square { center, .. } | Mark::Erase { center, .. } => {
                *center
            }
            Mark::Grain { from, .. } => *from,
            Mark::Shape { start, .. } => *start,
            Mark::Text { position, .. } => *position,
        }
    }

    /// Distance from `pos` to the visible extent of the mark. Points inside
    /// count as zero, except for the interior of an unfilled shape.
    pub fn distance_to(&self, pos: Point, filled: bool) -> f32 {
        let p = math::to_f32(pos);
        match self {
            Mark::Dot { center, radius } => {
                (math::distance(p, math::to_f32(*center)) - *radius as f32).max(0.0)
            }
            Mark::Square { center, half } | Mark::Erase { center, half } => {
                let (min, max) = math::square_bounds(*center, *half);
                math::rect_distance(p, min, max)
            }
            Mark::Grain { from, to } => {
                math::point_to_segment_distance(p, math::to_f32(*from), math::to_f32(*to))
            }
            Mark::Shape {
                shape,
                start,
                end,
                width,
            } => {
                let (a, b) = (math::to_f32(*start), math::to_f32(*end));
                let raw = match shape {
                    ShapeKind::Rectangle => {
                        let (min, max) = math::normalize(a, b);
                        if filled {
                            math::rect_distance(p, min, max)
                        } else {
                            math::rect_outline_distance(p, min, max)
                        }
                    }
                    ShapeKind::Oval => {
                        let (min, max) = math::normalize(a, b);
                        math::ellipse_distance(p, min, max, filled)
                    }
                    ShapeKind::Line => math::point_to_segment_distance(p, a, b),
                    ShapeKind::Triangle => {
                        math::triangle_distance(p, triangle_vertices(a, b), filled)
                    }
                };
                (raw - *width as f32 / 2.0).max(0.0)
            }
            Mark::Text {
                position,
                content,
                font,
            } => {
                let size = font.size as f32;
                let half_w = content.chars().count() as f32 * size * 0.6 / 2.0;
                let half_h = size * 1.2 / 2.0;
                let c = math::to_f32(*position);
                math::rect_distance(p, [c[0] - half_w, c[1] - half_h], [c[0] + half_w, c[1] + half_h])
            }
        }
    }
}

/// Right triangle spanned by a drag: the anchor, the release point and the
/// corner below/above the anchor.
pub fn triangle_vertices<T: Copy>(start: [T; 2], end: [T; 2]) -> [[T; 2]; 3] {
    [start, end, [start[0], end[1]]]
}

/// One persisted drawing object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub mark: Mark,
    pub fill: Option<Color>,
    pub outline: Option<Color>,
}

impl Primitive {
    pub fn new(mark: Mark, fill: Option<Color>, outline: Option<Color>) -> Self {
        Self {
            id: PrimitiveId::new(),
            mark,
            fill,
            outline,
        }
    }

    pub fn category(&self) -> Category {
        self.mark.category()
    }

    /// Color a line or grain is stroked with: its fill when set, otherwise the outline.
    pub fn stroke_color(&self) -> Option<Color> {
        self.fill.or(self.outline)
    }

    /// Hit distance from `pos`; the interior of a shape only counts once it has a fill.
    pub fn distance_to(&self, pos: Point) -> f32 {
        self.mark.distance_to(pos, self.fill.is_some())
    }

    pub fn font(&self) -> Option<&Font> {
        match &self.mark {
            Mark::Text { font, .. } => Some(font),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_names_and_hex() {
        assert_eq!(Color::parse("red"), Some(Color([255, 0, 0])));
        assert_eq!(Color::parse("Blue"), Some(Color([0, 0, 255])));
        assert_eq!(Color::parse("#10ff0a"), Some(Color([16, 255, 10])));
        assert_eq!(Color::parse("#10ff0"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
        assert_eq!(Color([16, 255, 10]).to_hex(), "#10ff0a");
    }

    #[test]
    fn brush_defaults_follow_the_table() {
        let expected = [("pen", 2), ("pencil", 1), ("ink", 4), ("oil", 8), ("paint", 12)];
        for (name, thickness) in expected {
            assert_eq!(BrushKind::from_name(name).default_thickness(), thickness);
        }
        let custom = BrushKind::from_name("charcoal");
        assert_eq!(custom, BrushKind::Custom("charcoal".into()));
        assert_eq!(custom.default_thickness(), 5);
    }

    #[test]
    fn tool_names_cover_shapes() {
        assert_eq!(Tool::from_name("oval"), Some(Tool::Shape(ShapeKind::Oval)));
        assert_eq!(Tool::from_name("move"), Some(Tool::Move));
        assert_eq!(Tool::from_name("lasso"), None);
    }

    #[test]
    fn category_follows_mark() {
        let dot = Mark::Dot { center: [0, 0], radius: 2 };
        let erase = Mark::Erase { center: [0, 0], half: 2 };
        assert_eq!(dot.category(), Category::Stroke);
        assert_eq!(erase.category(), Category::Erase);
    }

    #[test]
    fn translate_moves_every_point() {
        let mut mark = Mark::Shape {
            shape: ShapeKind::Line,
            start: [1, 2],
            end: [5, 9],
            width: 2,
        };
        mark.translate(3, -2);
        assert_eq!(
            mark,
            Mark::Shape {
                shape: ShapeKind::Line,
                start: [4, 0],
                end: [8, 7],
                width: 2,
            }
        );
    }

    #[test]
    fn distance_is_zero_inside_and_grows_outside() {
        let rect = Mark::Shape {
            shape: ShapeKind::Rectangle,
            start: [50, 40],
            end: [10, 10],
            width: 2,
        };
        assert_eq!(rect.distance_to([20, 20], true), 0.0);
        assert!((rect.distance_to([60, 40], true) - 9.0).abs() < 1e-4);
        assert!((rect.distance_to([20, 20], false) - 9.0).abs() < 1e-4);
        assert_eq!(rect.distance_to([11, 25], false), 0.0);

        let text = Mark::Text {
            position: [100, 100],
            content: "hi".into(),
            font: Font::new("Arial", 20),
        };
        assert_eq!(text.distance_to([100, 100], false), 0.0);
        assert!(text.distance_to([200, 100], false) > 50.0);
    }
}
