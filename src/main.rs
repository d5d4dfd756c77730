use clap::Parser;
use emoji_zoo::ContentSource;
use emoji_zoo::core::config::{CliOverrides, GameConfig, load_config, resolve};
use emoji_zoo::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "emoji-zoo", about = "Emoji matching game for young children")]
struct Args {
    /// Where levels come from (overrides config and EMOJI_ZOO_SOURCE)
    #[arg(short, long, value_enum)]
    source: Option<ContentSource>,

    /// Seed for coloring colors (same seed, same colors)
    #[arg(long)]
    seed: Option<u64>,

    /// Log narration instead of speaking it
    #[arg(short, long)]
    mute: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to emoji-zoo.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("emoji-zoo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Emoji Zoo v{} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("{}; continuing with defaults", e);
        GameConfig::default()
    });
    let cli = CliOverrides {
        content_source: args.source,
        seed: args.seed,
        mute: args.mute,
    };
    let config = resolve(&file_config, &cli);
    log::info!(
        "Resolved config: source={:?}, model={}, narration={}, seed={:?}",
        config.content_source,
        config.gemini_model,
        if config.narration.enabled { "on" } else { "muted" },
        config.coloring_seed
    );

    tui::run(config)
}
