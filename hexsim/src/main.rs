use anyhow::{Context, Result};
use clap::Parser;
use hexsim_core::run_turn;
use std::path::PathBuf;

mod loader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the world snapshot (JSON)
    input: PathBuf,

    /// Where to write the mutated snapshot; defaults to overwriting the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of turns to simulate
    #[arg(short, long, default_value_t = 1)]
    turns: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let loaded = loader::load_snapshot(&args.input)
        .with_context(|| format!("loading snapshot {}", args.input.display()))?;
    let mut state = loaded.state;
    for message in &loaded.messages {
        log::warn!("{message}");
    }
    log::info!(
        "loaded state \"{}\": {} provinces, {} buildings, {} templates",
        state.state_name,
        state.provinces.len(),
        state.buildings.len(),
        state.templates.len()
    );

    for turn in 1..=args.turns {
        let report = run_turn(&mut state);
        println!("=== turn {turn} ===");
        for message in &report.messages {
            println!("{message}");
        }
    }

    let output = args.output.as_ref().unwrap_or(&args.input);
    loader::save_snapshot(output, &state)
        .with_context(|| format!("saving snapshot {}", output.display()))?;
    log::info!("snapshot written to {}", output.display());

    Ok(())
}
