use crate::app_state::CanvasModel;
use crate::drawing::{BrushKind, Category, Color, Mark, PrimitiveId, Tool};
use crate::event_handler::log_ignored;
use crate::raster::RasterSink;
use crate::state::{Outcome, Rejection};

/// Range of the brush size control.
pub const THICKNESS_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// A change to the defaults new primitives inherit.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveStyle {
    Color(Color),
    /// Also switches to the brush tool and resets thickness to the kind's default.
    Brush(BrushKind),
    Thickness(u32),
    Tool(Tool),
    FontFamily(String),
    FontSize(u32),
    /// Selects the emoji tool stamping `glyph`.
    Emoji(String),
}

/// A restyle aimed at the selection, or at the defaults when nothing is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleChange {
    Color(Color),
    Outline(Color),
    FontFamily(String),
    FontSize(u32),
}

fn parse_color(value: &str) -> Result<Color, Rejection> {
    Color::parse(value).ok_or_else(|| Rejection::invalid(format!("unknown color `{value}`")))
}

fn parse_size(value: &str) -> Result<u32, Rejection> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(Rejection::invalid(format!("bad size `{value}`"))),
    }
}

fn parse_family(value: &str) -> Result<String, Rejection> {
    let family = value.trim();
    if family.is_empty() {
        return Err(Rejection::invalid("empty font family"));
    }
    Ok(family.to_string())
}

impl ActiveStyle {
    /// Parses a toolbar-style `(attribute, value)` pair.
    pub fn parse(attribute: &str, value: &str) -> Result<Self, Rejection> {
        match attribute {
            "color" => parse_color(value).map(ActiveStyle::Color),
            "brush" => Ok(ActiveStyle::Brush(BrushKind::from_name(value))),
            "thickness" | "brush_size" => parse_size(value).map(ActiveStyle::Thickness),
            "tool" => Tool::from_name(value)
                .map(ActiveStyle::Tool)
                .ok_or_else(|| Rejection::invalid(format!("unknown tool `{value}`"))),
            "font" => parse_family(value).map(ActiveStyle::FontFamily),
            "size" => parse_size(value).map(ActiveStyle::FontSize),
            "emoji" if !value.is_empty() => Ok(ActiveStyle::Emoji(value.to_string())),
            _ => Err(Rejection::invalid(format!("cannot set `{attribute}` to `{value}`"))),
        }
    }
}

impl StyleChange {
    pub fn parse(attribute: &str, value: &str) -> Result<Self, Rejection> {
        match attribute {
            "color" => parse_color(value).map(StyleChange::Color),
            "outline" => parse_color(value).map(StyleChange::Outline),
            "font" => parse_family(value).map(StyleChange::FontFamily),
            "size" => parse_size(value).map(StyleChange::FontSize),
            _ => Err(Rejection::invalid(format!("unknown style `{attribute}`"))),
        }
    }

    pub fn attribute(&self) -> &'static str {
        match self {
            StyleChange::Color(_) => "color",
            StyleChange::Outline(_) => "outline",
            StyleChange::FontFamily(_) => "font",
            StyleChange::FontSize(_) => "size",
        }
    }

    fn applies_to(&self, category: Category) -> bool {
        match self {
            StyleChange::Color(_) => matches!(category, Category::Shape | Category::Text),
            StyleChange::Outline(_) => category == Category::Shape,
            StyleChange::FontFamily(_) | StyleChange::FontSize(_) => category == Category::Text,
        }
    }
}

impl<S: RasterSink> CanvasModel<S> {
    pub fn set_active_style(&mut self, style: ActiveStyle) -> Outcome {
        match style {
            ActiveStyle::Color(color) => self.style.color = color,
            ActiveStyle::Brush(kind) => {
                self.style.thickness = kind.default_thickness();
                log::debug!("Brush {} with thickness {}", kind.name(), self.style.thickness);
                self.style.brush = kind;
                self.set_tool(Tool::Brush);
            }
            ActiveStyle::Thickness(thickness) => {
                self.style.thickness = thickness.clamp(*THICKNESS_RANGE.start(), *THICKNESS_RANGE.end());
            }
            ActiveStyle::Tool(tool) => self.set_tool(tool),
            ActiveStyle::FontFamily(family) => self.style.font.family = family,
            ActiveStyle::FontSize(size) => self.style.font.size = size,
            ActiveStyle::Emoji(glyph) => {
                self.style.emoji = Some(glyph);
                self.set_tool(Tool::Emoji);
            }
        }
        Outcome::Applied
    }

    /// Restyles the selected primitive, or updates the matching default when
    /// nothing is selected.
    pub fn apply_style(&mut self, change: StyleChange) -> Outcome {
        let outcome = match self.input.selection {
            Some(id) => self.restyle(id, change),
            None => match change {
                StyleChange::Color(color) => {
                    self.style.color = color;
                    Outcome::Applied
                }
                StyleChange::Outline(_) => Rejection::EmptySelection.into(),
                StyleChange::FontFamily(family) => {
                    self.style.font.family = family;
                    Outcome::Applied
                }
                StyleChange::FontSize(size) => {
                    self.style.font.size = size;
                    Outcome::Applied
                }
            },
        };
        log_ignored("apply_style", &outcome);
        outcome
    }

    pub fn clear_selection(&mut self) {
        self.input.selection = None;
    }

    fn set_tool(&mut self, tool: Tool) {
        self.style.tool = tool;
        self.clear_selection();
    }

    fn restyle(&mut self, id: PrimitiveId, change: StyleChange) -> Outcome {
        let Some(category) = self.primitive(id).map(|p| p.category()) else {
            self.clear_selection();
            return Rejection::EmptySelection.into();
        };
        if !change.applies_to(category) {
            return Rejection::LegalityMismatch {
                attribute: change.attribute(),
                category,
            }
            .into();
        }

        let font = match &change {
            StyleChange::FontFamily(family) => {
                let mut font = self.font_of(id);
                font.family = family.clone();
                Some(font)
            }
            StyleChange::FontSize(size) => {
                let mut font = self.font_of(id);
                font.size = *size;
                Some(font)
            }
            StyleChange::Color(_) | StyleChange::Outline(_) => None,
        };
        if let Some(font) = &font {
            self.item_fonts.insert(id, font.clone());
        }

        let Some(primitive) = self.primitive_mut(id) else {
            return Rejection::EmptySelection.into();
        };
        match change {
            StyleChange::Color(color) => primitive.fill = Some(color),
            StyleChange::Outline(color) => primitive.outline = Some(color),
            StyleChange::FontFamily(_) | StyleChange::FontSize(_) => {
                if let (Mark::Text { font: current, .. }, Some(font)) = (&mut primitive.mark, font) {
                    *current = font;
                }
            }
        }
        Outcome::Applied
    }
}
