use std::path::Path;

use crate::app_state::CanvasModel;
use crate::config::CanvasConfig;
use crate::script;

const USAGE: &str = "usage: wpaint <script.json> <out.png|out.jpg> [config.json]";

/// Replays a gesture script onto a fresh canvas and saves the raster.
pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(script_path), Some(out_path)) = (args.next(), args.next()) else {
        anyhow::bail!(USAGE);
    };
    let config = match args.next() {
        Some(path) => CanvasConfig::load(Path::new(&path))?,
        None => CanvasConfig::default(),
    };
    log::info!("Canvas {}x{}", config.width, config.height);

    let commands = script::load(Path::new(&script_path))?;
    let mut model = CanvasModel::new(&config)?;
    let summary = script::replay(&mut model, &commands);
    log::info!(
        "Replayed {} steps: {} applied, {} unchanged, {} ignored; {} primitives",
        commands.len(),
        summary.applied,
        summary.unchanged,
        summary.ignored,
        model.primitives().len()
    );

    model.raster().save(Path::new(&out_path))
}
