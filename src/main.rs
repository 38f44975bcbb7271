use bubbletea_rs::{MouseMotion, Program};
use clap::Parser;
use complex_journal::app::{self, App, Context};
use complex_journal::config::{Cli, Config};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "complex_journal=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let config = Config::load(&cli)?;
    tracing::info!(api_url = %config.api_url, loop_around = config.loop_around, "starting");

    if !app::install(Context::new(config)?) {
        return Err("application context installed twice".into());
    }

    let program = Program::<App>::builder()
        .alt_screen(true)
        .mouse_motion(MouseMotion::Cell)
        .signal_handler(true)
        .build()?;
    program.run().await?;

    tracing::info!("exiting");
    Ok(())
}
