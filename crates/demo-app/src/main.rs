use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rune_config::RuneInputConfig;
use rune_field::Overlay;
use rune_text::{FontdueMeasure, TextMeasure};

mod host;
mod scenes;

use host::DemoHost;
use scenes::Page;

fn arg_value(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args().find_map(|a| a.strip_prefix(&prefix).map(str::to_string))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RuneInputConfig::load();
    log::debug!("config: {config:?}");

    // Scene selection mirrors DEMO_SCENE / --scene=NAME.
    let scene_name = arg_value("scene")
        .or_else(|| std::env::var("DEMO_SCENE").ok())
        .unwrap_or_else(|| "form".to_string());
    let Some(mut scene) = scenes::by_name(&scene_name) else {
        bail!("unknown scene {scene_name:?} (expected \"form\" or \"shadows\")");
    };

    let measure: Option<Box<dyn TextMeasure>> = match arg_value("font") {
        Some(path) => Some(Box::new(
            FontdueMeasure::from_path(&path).with_context(|| format!("loading font {path}"))?,
        )),
        None => None,
    };

    let out_dir = arg_value("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/rune-input-demo"));
    let mut page = Page::new(400, 320, out_dir.join(scene.name()))?;

    let mut overlay = Overlay::new(DemoHost::new(measure), config);
    log::info!("running scene {}", scene.name());
    scene.run(&mut overlay, &mut page)?;
    Ok(())
}
