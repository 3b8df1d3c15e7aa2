mod common;
mod config;
mod logging;
mod storage;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use storage::SnapshotFile;
use ui::ChatApp;

#[derive(Parser)]
#[command(name = "chatapp", version, about = "Terminal chat with a local user store")]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: PathBuf,
    /// User data file (overrides the config file)
    #[arg(long, env = "CHATAPP_DATA_FILE", value_name = "FILE")]
    data_file: Option<PathBuf>,
    /// Log file, appended to (overrides the config file)
    #[arg(long, env = "CHATAPP_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    // Logging needs the config, so a config problem is reported right after init.
    let (mut app_config, config_error) = match config::load_config(&cli.config) {
        Ok(app_config) => (app_config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    if let Some(data_file) = cli.data_file {
        app_config.data_file = data_file;
    }
    if let Some(log_file) = cli.log_file {
        app_config.log_file = log_file;
    }

    logging::init(&app_config.log_file, &app_config.log_level);
    if let Some(err) = config_error {
        log::warn!("{err}; using defaults");
    }

    let snapshot = SnapshotFile::new(&app_config.data_file);
    let store = snapshot.load_or_empty();

    let stdin = io::stdin();
    let mut app = ChatApp::new(store, snapshot, stdin.lock(), app_config.form_failure);
    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!(
                "Session ended unexpectedly: {err}. {} accounts in memory were not saved.",
                app.store().len()
            );
            ExitCode::FAILURE
        }
    }
}
