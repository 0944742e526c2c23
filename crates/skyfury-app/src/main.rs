use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use skyfury_app::assets::{AssetLoader, SpriteKey};
use skyfury_app::config::{AppConfig, Overrides};
use skyfury_app::game_loop::Runner;
use skyfury_app::logging;

/// Side-scrolling arcade shooter, run headless.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Level to start on (1-based)
    #[arg(short, long)]
    level: Option<u32>,
    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,
    /// Frame-rate cap
    #[arg(long)]
    fps: Option<u32>,
    /// Asset directory
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Endless practice arena
    #[arg(long)]
    practice: bool,
    /// Fixed time step, no sleeping
    #[arg(long)]
    fast: bool,
    /// Leave the aircraft on the runway instead of flying the autopilot
    #[arg(long)]
    idle: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let overrides = Overrides {
        seed: args.seed,
        level: args.level,
        fps: args.fps,
        max_frames: args.frames,
        asset_root: args.assets,
        practice: args.practice,
        fast: args.fast,
        idle: args.idle,
    };
    let config = AppConfig::load_or_default(args.config.as_deref())
        .context("Loading configuration")?
        .apply(&overrides);

    let mut assets =
        AssetLoader::new(config.asset_root.clone()).context("Opening asset directory")?;
    if assets.preload() == SpriteKey::ALL.len() {
        log::warn!("No sprites found under {}", assets.root().display());
    }
    log::debug!("{} sprites cached", assets.cached());

    let mut runner = Runner::from_config(config).context("Starting game")?;
    let summary = runner.run();
    log::info!(
        "Finished after {} frames in {:?}: level {}, score {}, {} kills",
        summary.frames,
        summary.phase,
        summary.level,
        summary.score,
        summary.kills
    );
    Ok(())
}
