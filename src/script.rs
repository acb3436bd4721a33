use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::app_state::CanvasModel;
use crate::drawing::Point;
use crate::raster::RasterSink;
use crate::state::Outcome;
use crate::style::{ActiveStyle, StyleChange};

/// One recorded UI action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Style { attr: String, value: String },
    Apply { attr: String, value: String },
    /// `text` answers the prompt of the text and emoji tools.
    Press {
        at: Point,
        #[serde(default)]
        text: Option<String>,
    },
    Drag { at: Point },
    Release { at: Point },
    Clear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub unchanged: usize,
    pub ignored: usize,
}

pub fn load(path: &Path) -> anyhow::Result<Vec<Command>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    parse(&raw).with_context(|| format!("parsing script {}", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<Vec<Command>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn replay<S: RasterSink>(model: &mut CanvasModel<S>, commands: &[Command]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (index, command) in commands.iter().enumerate() {
        let outcome = match command {
            Command::Style { attr, value } => match ActiveStyle::parse(attr, value) {
                Ok(style) => model.set_active_style(style),
                Err(reason) => reason.into(),
            },
            Command::Apply { attr, value } => match StyleChange::parse(attr, value) {
                Ok(change) => model.apply_style(change),
                Err(reason) => reason.into(),
            },
            Command::Press { at, text } => model.begin(*at, &mut text.clone()),
            Command::Drag { at } => model.drag(*at),
            Command::Release { at } => model.end(*at),
            Command::Clear => {
                model.clear();
                Outcome::Applied
            }
        };
        match outcome {
            Outcome::Applied => summary.applied += 1,
            Outcome::Unchanged => summary.unchanged += 1,
            Outcome::Ignored(reason) => {
                log::warn!("Step {index} ({command:?}) had no effect: {reason}");
                summary.ignored += 1;
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::drawing::{Mark, Primitive, ShapeKind};

    #[test]
    fn parses_tagged_commands() {
        let commands = parse(
            r#"[
                {"op": "style", "attr": "tool", "value": "line"},
                {"op": "press", "at": [1, 2]},
                {"op": "press", "at": [3, 4], "text": "hello"},
                {"op": "clear"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Style { attr: "tool".into(), value: "line".into() },
                Command::Press { at: [1, 2], text: None },
                Command::Press { at: [3, 4], text: Some("hello".into()) },
                Command::Clear,
            ]
        );
    }

    #[test]
    fn replay_counts_outcomes() {
        let commands = parse(
            r#"[
                {"op": "style", "attr": "tool", "value": "line"},
                {"op": "press", "at": [0, 0]},
                {"op": "drag", "at": [5, 5]},
                {"op": "release", "at": [10, 0]},
                {"op": "apply", "attr": "outline", "value": "red"},
                {"op": "style", "attr": "tool", "value": "spray"}
            ]"#,
        )
        .unwrap();
        let mut model = CanvasModel::with_raster(&CanvasConfig::default(), Vec::<Primitive>::new());
        let summary = replay(&mut model, &commands);
        assert_eq!(summary, ReplaySummary { applied: 2, unchanged: 2, ignored: 2 });
        assert!(matches!(
            model.primitives()[0].mark,
            Mark::Shape { shape: ShapeKind::Line, start: [0, 0], end: [10, 0], .. }
        ));
    }

    #[test]
    fn malformed_script_is_an_error() {
        assert!(parse(r#"[{"op": "teleport"}]"#).is_err());
    }
}
