//! uw-cards CLI
//!
//! Reconciles the curated card spreadsheets with the Warhammer Underworlds
//! card database, one locale at a time.

mod error;
mod logging;
mod progress;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use error::CliError;
use progress::BarProgress;
use uw_cards_sync::{HttpClient, Settings, SyncOptions, sync_all};

#[derive(Parser)]
#[command(name = "uw-cards")]
#[command(
    about = "Merge curated card spreadsheets with the upstream card database",
    long_about = None
)]
struct Cli {
    /// Directory with cards-<locale>.csv files; outputs are written here too
    /// (defaults to current directory)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Settings file (defaults to <data-dir>/uw-cards.toml, then the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locales to process (e.g., en,de); defaults to every configured locale
    #[arg(short, long, value_delimiter = ',')]
    locale: Vec<String>,

    /// Do not download card images
    #[arg(long)]
    no_images: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Run every selected locale. Returns the number of locales that failed.
fn run(cli: Cli) -> Result<usize, CliError> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let settings = Settings::resolve(cli.config.as_deref(), &data_dir)?;
    let locales = settings.select_locales(&cli.locale)?;
    let client = HttpClient::new(&settings)?;

    let options = SyncOptions {
        data_dir,
        fetch_images: !cli.no_images,
    };
    let progress = BarProgress::new(cli.quiet);

    let outcomes = sync_all(&client, &settings, &locales, &options, &progress);
    Ok(report::print_summary(&outcomes))
}
