use std::collections::HashMap;

use anyhow::Context;

use crate::brush::BrushGenerator;
use crate::config::CanvasConfig;
use crate::drawing::{Color, Font, Point, Primitive, PrimitiveId};
use crate::raster::{ImageMirror, RasterSink};
use crate::state::{InputState, StyleState};

/// The canvas drawing model: primitives, the style new primitives inherit,
/// and the current selection. Driven by pointer events and style requests;
/// every created primitive is mirrored onto `S`.
pub struct CanvasModel<S: RasterSink = ImageMirror> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) background: Color,

    pub(crate) primitives: Vec<Primitive>,
    /// Per-primitive font of text primitives.
    pub(crate) item_fonts: HashMap<PrimitiveId, Font>,
    pub(crate) style: StyleState,
    pub(crate) input: InputState,

    pub(crate) brushes: BrushGenerator,
    pub(crate) raster: S,
}

impl CanvasModel<ImageMirror> {
    /// A model mirrored onto an in-memory image, ready for `save`.
    pub fn new(config: &CanvasConfig) -> anyhow::Result<Self> {
        let mut mirror = ImageMirror::new(config.width, config.height, config.background);
        if let Some(path) = &config.font_path {
            mirror = mirror
                .with_font_file(path)
                .context("preparing raster text")?;
        }
        Ok(Self::with_raster(config, mirror))
    }
}

impl<S: RasterSink> CanvasModel<S> {
    pub fn with_raster(config: &CanvasConfig, mut raster: S) -> Self {
        raster.reset(config.background);
        Self {
            width: config.width.max(1),
            height: config.height.max(1),
            background: config.background,
            primitives: Vec::new(),
            item_fonts: HashMap::new(),
            style: config.initial_style(),
            input: InputState::default(),
            brushes: BrushGenerator::new(config.seed),
            raster,
        }
    }

    /// Replaces the jitter source used by pencil and oil brushes.
    pub fn with_brushes(mut self, brushes: BrushGenerator) -> Self {
        self.brushes = brushes;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Primitives in creation order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id == id)
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn selection(&self) -> Option<PrimitiveId> {
        self.input.selection
    }

    pub fn anchor(&self) -> Option<Point> {
        self.input.anchor
    }

    /// Recorded font of a text primitive, falling back to the current default.
    pub fn font_of(&self, id: PrimitiveId) -> Font {
        self.item_fonts
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.style.font.clone())
    }

    pub fn raster(&self) -> &S {
        &self.raster
    }

    /// Removes every primitive and repaints the raster background.
    pub fn clear(&mut self) {
        log::info!("Clearing canvas ({} primitives)", self.primitives.len());
        self.primitives.clear();
        self.item_fonts.clear();
        self.input = InputState::default();
        self.raster.reset(self.background);
    }

    /// JSON snapshot of every primitive.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&self.primitives).context("serializing canvas primitives")
    }

    pub(crate) fn clamp_point(&self, point: Point) -> Point {
        let max_x = i32::try_from(self.width).unwrap_or(i32::MAX) - 1;
        let max_y = i32::try_from(self.height).unwrap_or(i32::MAX) - 1;
        [point[0].clamp(0, max_x), point[1].clamp(0, max_y)]
    }

    /// Stores a new primitive and mirrors it onto the raster.
    pub(crate) fn push(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = primitive.id;
        if let Some(font) = primitive.font() {
            self.item_fonts.insert(id, font.clone());
        }
        self.raster.mirror(&primitive);
        self.primitives.push(primitive);
        id
    }

    pub(crate) fn primitive_mut(&mut self, id: PrimitiveId) -> Option<&mut Primitive> {
        self.primitives.iter_mut().find(|p| p.id == id)
    }
}
