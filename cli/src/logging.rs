use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = ".tasklist";
const LOG_FILE_NAME: &str = "client.log";

/// Sends client diagnostics to `~/.tasklist/client.log` so they never
/// draw over the terminal UI.
pub fn init() -> Result<()> {
    let dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?
        .join(LOG_DIR_NAME);
    fs::create_dir_all(&dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasklist=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("{}", e))?;
    Ok(())
}
