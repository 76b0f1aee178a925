use std::path::PathBuf;

use clap::Parser;
use legend_types::LanguageCode;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod profile;
pub mod ui;

use self::controller::AppController;

#[derive(Parser)]
#[command(name = "legend", about = "Detect, translate and summarize text")]
struct Cli {
    /// JSON profile to load instead of the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target language selected at startup
    #[arg(long)]
    target: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(target) = cli.target {
        config.languages.default_target = LanguageCode::new(target);
    }

    let controller = AppController::new(config);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("Task exited, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("Task failed: {e}"),
                Some(Err(e)) => tracing::error!("Task panicked: {e}"),
                None => tracing::warn!("No tasks running"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}

#[cfg(test)]
mod tests;
