use crate::app_state::CanvasModel;
use crate::drawing::{Mark, Point, Primitive, PrimitiveId, Tool};
use crate::prompt::TextPrompt;
use crate::raster::RasterSink;
use crate::state::{Outcome, Rejection};

/// Outline width of rectangles, ovals, lines and triangles.
pub const SHAPE_STROKE_WIDTH: u32 = 2;

impl<S: RasterSink> CanvasModel<S> {
    /// Pointer press with the active tool. Records the gesture anchor; text and
    /// emoji stamp a primitive, move selects the closest primitive, eraser
    /// erases immediately.
    pub fn begin(&mut self, point: Point, prompt: &mut dyn TextPrompt) -> Outcome {
        let point = self.clamp_point(point);
        self.input.anchor = Some(point);

        let outcome = match self.style.tool {
            Tool::Text => {
                let content = prompt.ask("Text", "Enter text:");
                self.stamp_text(point, content)
            }
            Tool::Emoji => {
                let content = match &self.style.emoji {
                    Some(glyph) => Some(glyph.clone()),
                    None => prompt.ask("Emoji", "Enter emoji:"),
                };
                self.stamp_text(point, content)
            }
            Tool::Move => self.select_at(point),
            Tool::Eraser => {
                self.erase_at(point);
                Outcome::Applied
            }
            Tool::Brush | Tool::Shape(_) => Outcome::Unchanged,
        };
        log_ignored("begin", &outcome);
        outcome
    }

    /// One drag sample while the pointer is down.
    pub fn drag(&mut self, point: Point) -> Outcome {
        let point = self.clamp_point(point);

        let outcome = match self.style.tool {
            Tool::Brush => {
                let marks = self
                    .brushes
                    .dabs(&self.style.brush, point, self.style.thickness);
                if marks.is_empty() {
                    Outcome::Unchanged
                } else {
                    let color = self.style.color;
                    for mark in marks {
                        self.push(Primitive::new(mark, Some(color), None));
                    }
                    Outcome::Applied
                }
            }
            Tool::Eraser => {
                self.erase_at(point);
                Outcome::Applied
            }
            Tool::Move => self.move_selected(point),
            Tool::Text | Tool::Emoji | Tool::Shape(_) => Outcome::Unchanged,
        };
        log_ignored("drag", &outcome);
        outcome
    }

    /// Pointer release. Finishes a shape spanning anchor to `point`; the anchor
    /// is cleared whatever the tool.
    pub fn end(&mut self, point: Point) -> Outcome {
        let point = self.clamp_point(point);
        let anchor = self.input.anchor.take();

        let outcome = match (self.style.tool, anchor) {
            (Tool::Shape(shape), Some(start)) => {
                let mark = Mark::Shape {
                    shape,
                    start,
                    end: point,
                    width: SHAPE_STROKE_WIDTH,
                };
                let id = self.push(Primitive::new(mark, None, Some(self.style.color)));
                log::info!("Created {shape:?} {id} from {start:?} to {point:?}");
                Outcome::Applied
            }
            (Tool::Shape(_), None) => Rejection::invalid("release without a press").into(),
            _ => Outcome::Unchanged,
        };
        log_ignored("end", &outcome);
        outcome
    }

    /// Closest primitive to `point`; on ties the most recently created wins.
    pub fn hit_test(&self, point: Point) -> Option<PrimitiveId> {
        let mut best: Option<(f32, PrimitiveId)> = None;
        for primitive in self.primitives.iter().rev() {
            let distance = primitive.distance_to(point);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, primitive.id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn stamp_text(&mut self, position: Point, content: Option<String>) -> Outcome {
        let Some(content) = content.filter(|c| !c.is_empty()) else {
            return Rejection::invalid("empty or cancelled text prompt").into();
        };
        let mark = Mark::Text {
            position,
            content,
            font: self.style.font.clone(),
        };
        let id = self.push(Primitive::new(mark, Some(self.style.color), None));
        log::info!("Created text {id} at {position:?}");
        Outcome::Applied
    }

    fn select_at(&mut self, point: Point) -> Outcome {
        self.input.selection = self.hit_test(point);
        match self.input.selection {
            Some(id) => {
                log::debug!("Selected {id} at {point:?}");
                Outcome::Applied
            }
            None => Rejection::EmptySelection.into(),
        }
    }

    fn erase_at(&mut self, point: Point) {
        let mark = Mark::Erase {
            center: point,
            half: self.style.thickness as i32,
        };
        let background = self.background;
        self.push(Primitive::new(mark, Some(background), Some(background)));
    }

    fn move_selected(&mut self, point: Point) -> Outcome {
        let Some(id) = self.input.selection else {
            return Rejection::EmptySelection.into();
        };
        let anchor = self.input.anchor.unwrap_or(point);
        let (dx, dy) = (point[0] - anchor[0], point[1] - anchor[1]);
        let Some(primitive) = self.primitive_mut(id) else {
            self.input.selection = None;
            return Rejection::EmptySelection.into();
        };
        primitive.mark.translate(dx, dy);
        self.input.anchor = Some(point);
        Outcome::Applied
    }
}

pub(crate) fn log_ignored(operation: &str, outcome: &Outcome) {
    if let Some(reason) = outcome.rejection() {
        log::debug!("{operation} ignored: {reason}");
    }
}
