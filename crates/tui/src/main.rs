mod app;
mod client;
mod config;
mod error;
mod local_state;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // File-only logging: stdout belongs to the alternate screen.
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(format!(
                "bilancio_tui={level},engine={level}",
                level = config.log_level
            ))
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
