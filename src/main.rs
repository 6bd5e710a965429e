//! Nordpuls - a terminal dashboard for Swedish stock briefings.

use anyhow::Context;
use nordpuls::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The alternate screen owns stdout, so logs go to a daily file.
    let log_dir = nordpuls::config::log_dir().context("Could not resolve log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Could not create {}", log_dir.display()))?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "nordpuls.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nordpuls=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    let config = Config::load_or_default().context("Failed to load configuration")?;

    let mut app = App::new(config).context("Failed to start the terminal UI")?;
    app.run().await?;

    Ok(())
}
