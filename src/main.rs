//! flashdeck - Terminal front-end for choosing flash target drives
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use flashdeck_app::config::{self, Settings};
use flashdeck_app::drive_source::DriveSource;
use flashdeck_core::prelude::*;
use flashdeck_core::SourceImage;
use flashdeck_tui::RunOptions;

/// Size of the stand-in image used with `--demo`
const DEMO_IMAGE_SIZE: u64 = 2_147_483_648;

/// flashdeck - choose the drives an image will be flashed to
#[derive(Parser, Debug)]
#[command(name = "flashdeck", version)]
#[command(about = "Choose the drives an image will be flashed to", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["drives", "demo"])))]
struct Args {
    /// JSON file listing the connected drives, re-read while running
    #[arg(long, value_name = "FILE")]
    drives: Option<PathBuf>,

    /// Use a built-in list of drives
    #[arg(long)]
    demo: bool,

    /// Image to flash
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Directory holding config.toml
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    flashdeck_core::logging::init()?;

    let settings = load_settings(args.config.clone());

    let image = match (&args.image, args.demo) {
        (Some(path), _) => Some(SourceImage::from_file(path)?),
        (None, true) => Some(SourceImage::new("demo.img", DEMO_IMAGE_SIZE)),
        (None, false) => None,
    };

    let drive_source = match args.drives {
        Some(path) => DriveSource::File(path),
        None => DriveSource::Demo,
    };
    info!("Drive source: {}", drive_source);

    let result = flashdeck_tui::run(RunOptions {
        settings,
        image,
        drive_source: Some(drive_source),
    })
    .await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("flashdeck exiting");
    result
}

/// Settings from `--config` or the platform config directory, creating a
/// commented default file on first run
fn load_settings(config_dir: Option<PathBuf>) -> Settings {
    let dir = config_dir.unwrap_or_else(config::default_config_dir);
    if let Err(e) = config::init_config_dir(&dir) {
        warn!("{}", e);
    }
    config::load_settings(&dir)
}
