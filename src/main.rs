use anyhow::Result;
use clap::{Parser, ValueEnum};
use garden_snake::game::GameConfig;
use garden_snake::modes::{PlayMode, SyncMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garden_snake")]
#[command(version, about = "Grid snake with hazards, levels and an offline sprite cache")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Starting game speed in ticks per second
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=10))]
    speed: u32,

    /// Directory sprite assets are fetched from (sync-assets mode)
    #[arg(long, default_value = "assets")]
    origin: PathBuf,

    /// Root directory of the offline sprite cache (sync-assets mode)
    #[arg(long, default_value = ".sprite-cache")]
    cache_root: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Install the sprite manifest into the offline cache
    SyncAssets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Play => {
            let config = GameConfig::with_tick_rate(cli.speed);
            let mut play_mode = PlayMode::new(config);
            play_mode.run().await?;
        }
        Mode::SyncAssets => {
            let sync_mode = SyncMode::new(cli.origin, cli.cache_root);
            sync_mode.run()?;
        }
    }

    Ok(())
}
