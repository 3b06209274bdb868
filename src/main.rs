use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

use shelf::startup::{self, StartupError};
use shelf::tui;

#[derive(Parser)]
#[command(
    name = "shelf",
    version,
    about = "Browse your Readwise books and highlights in the terminal"
)]
struct Args {}

#[tokio::main]
async fn main() -> ExitCode {
    let _args = Args::parse();

    // Initialize file logger - writes to shelf.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shelf.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Shelf starting up");

    let app = match start().await {
        Ok(app) => app,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("shelf: {e}");
            return ExitCode::FAILURE;
        }
    };

    match tui::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("shelf: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<shelf::core::state::App, StartupError> {
    let config = startup::load_config()?;
    let source = startup::build_source(&config)?;
    startup::bootstrap(source, &config.root_title).await
}
