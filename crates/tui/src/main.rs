mod app;
mod config;
mod error;
mod ui;
mod validate;

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Tracing goes to a file so the alternate screen stays clean; without a
/// configured log file it is simply disabled.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "homiak_tui={level},store={level}",
            level = config.log_level
        ))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
