mod export;
mod models;
mod run;
mod storage;
mod store;
mod summary;
mod ui;
mod wallet;

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    init_logging(&data_dir)?;

    let storage = storage::SqliteStorage::open(&data_dir.join("mywallet.db"))?;
    let mut wallet = wallet::Wallet::open(Box::new(storage));

    match args.len() {
        1 => run::as_tui(&mut wallet),
        2.. => run::as_cli(&args, &mut wallet),
        _ => {
            eprintln!("Usage: mywallet [command]");
            Ok(())
        }
    }
}

/// `MYWALLET_DATA_DIR` if set, otherwise the platform data directory.
fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match std::env::var_os("MYWALLET_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => directories::ProjectDirs::from("com", "mywallet", "MyWallet")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}

/// Log to a file; the terminal belongs to the TUI. Level comes from `MYWALLET_LOG`.
fn init_logging(data_dir: &Path) -> Result<()> {
    let path = data_dir.join("mywallet.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env("MYWALLET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;
    Ok(())
}
