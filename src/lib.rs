mod app;
mod app_state;
mod brush;
mod config;
mod drawing;
mod event_handler;
mod math;
mod prompt;
mod raster;
mod script;
mod state;
mod style;

// Re-export the main public interface
pub use app::run;
pub use app_state::CanvasModel;
pub use brush::BrushGenerator;
pub use config::CanvasConfig;
pub use drawing::{
    BrushKind, Category, Color, Font, Mark, Point, Primitive, PrimitiveId, ShapeKind, Tool,
};
pub use event_handler::SHAPE_STROKE_WIDTH;
pub use prompt::{NoPrompt, TextPrompt};
pub use raster::{ImageMirror, RasterSink};
pub use script::{Command, ReplaySummary};
pub use state::{InputState, Outcome, Rejection, StyleState};
pub use style::{ActiveStyle, StyleChange, THICKNESS_RANGE};
