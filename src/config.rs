use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::drawing::{BrushKind, Color, Font, Tool};
use crate::state::StyleState;

/// Startup settings for a canvas. Every field has a default, so a config file
/// only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub color: Color,
    pub brush: BrushKind,
    pub thickness: u32,
    pub font_family: String,
    pub font_size: u32,
    pub emoji: Option<String>,
    /// Seed for brush jitter; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// TTF/OTF used to draw text into the exported raster.
    pub font_path: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            color: Color::BLACK,
            brush: BrushKind::Pen,
            thickness: 5,
            font_family: "Arial".to_string(),
            font_size: 20,
            emoji: None,
            seed: None,
            font_path: None,
        }
    }
}

impl CanvasConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: CanvasConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(
            config.width > 0 && config.height > 0,
            "canvas size must be non-zero, got {}x{}",
            config.width,
            config.height
        );
        anyhow::ensure!(
            config.width <= i32::MAX as u32 && config.height <= i32::MAX as u32,
            "canvas size {}x{} exceeds the coordinate range",
            config.width,
            config.height
        );
        Ok(config)
    }

    pub fn initial_style(&self) -> StyleState {
        StyleState {
            color: self.color,
            tool: Tool::Brush,
            brush: self.brush.clone(),
            thickness: self.thickness.max(1),
            font: Font::new(self.font_family.clone(), self.font_size.max(1)),
            emoji: self.emoji.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: CanvasConfig =
            serde_json::from_str(r#"{ "width": 320, "color": "red", "brush": "oil" }"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.color, Color([255, 0, 0]));
        assert_eq!(config.brush, BrushKind::Oil);
        assert_eq!(config.font_size, 20);
    }

    #[test]
    fn unknown_color_is_rejected() {
        let parsed = serde_json::from_str::<CanvasConfig>(r#"{ "color": "not-a-color" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CanvasConfig::load(Path::new("/nonexistent/wpaint.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn load_rejects_oversized_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        std::fs::write(&path, r#"{ "width": 4000000000 }"#).unwrap();
        let err = CanvasConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("exceeds the coordinate range"));
    }

    #[test]
    fn initial_style_starts_with_brush() {
        let style = CanvasConfig::default().initial_style();
        assert_eq!(style.tool, Tool::Brush);
        assert_eq!(style.thickness, 5);
        assert_eq!(style.font, Font::new("Arial", 20));
    }
}
