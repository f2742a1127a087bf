use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedmail::app::AppContext;
use feedmail::cli::Cli;
use feedmail::config::Config;
use feedmail::pipeline::Pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    tracing::info!("Opening the configuration file.");
    let config = Config::load()?;
    tracing::debug!(
        mail = ?config.mail,
        feeds = ?config.rss.feeds,
        store = %config.store.path.display(),
        "configuration"
    );

    let ctx = AppContext::open(config).await?;
    Pipeline::new(&ctx).run_configured().await;
    ctx.shutdown();

    Ok(())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    let (file_layer, stderr_layer) = match &cli.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("can not open log file {}", path.display()))?;
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
