use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod celebrate;
mod merge;
mod play;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Parser)]
#[command(name = "yachtro")]
#[command(about = "Dice scoring game and PDF page merger")]
struct Cli {
    /// Directory holding rules.json, hands.json and jokers.json
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive run on the terminal
    Play {
        /// Seed for dice and shop offers
        #[arg(long, default_value_t = DEFAULT_RUN_SEED)]
        seed: u64,
        /// Fetch a celebration image when a round is cleared
        #[arg(long)]
        celebrate: bool,
    },
    /// Print the hand scoring guide and the joker catalog
    Table,
    /// Merge the pages of several PDF files into one
    Merge(merge::MergeArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Play { seed, celebrate } => play::run(&cli.assets, seed, celebrate),
        Command::Table => play::print_table(&cli.assets),
        Command::Merge(args) => merge::run(args),
    }
}
