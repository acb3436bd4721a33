use crate::drawing::{BrushKind, Category, Color, Font, Point, PrimitiveId, Tool};

/// Current defaults stamped onto newly created primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    pub color: Color,
    pub tool: Tool,
    pub brush: BrushKind,
    pub thickness: u32,
    pub font: Font,
    /// Glyph stamped by the emoji tool.
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Press position of the current gesture, advanced by move drags.
    pub anchor: Option<Point>,
    pub selection: Option<PrimitiveId>,
}

/// Why an operation had no effect. Advisory only: nothing here is a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("`{attribute}` does not apply to a {category} primitive")]
    LegalityMismatch {
        attribute: &'static str,
        category: Category,
    },
    #[error("no primitive is selected")]
    EmptySelection,
}

impl Rejection {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Rejection::InvalidInput(detail.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// Nothing to do for the active tool.
    Unchanged,
    Ignored(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Ignored(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(reason: Rejection) -> Self {
        Outcome::Ignored(reason)
    }
}
