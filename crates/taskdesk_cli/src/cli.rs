use std::path::PathBuf;

use clap::Parser;
use taskdesk_core::AppConfig;

use crate::cmd::Commands;

/// Operator CLI for a TaskDesk workspace database.
/// Flags override the `TASKDESK_*` environment variables.
#[derive(Parser)]
#[command(name = "taskdesk", version, about = "Client and task register for tax practices")]
pub struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace | debug | info | warn | error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Principal the commands act as.
    #[arg(long = "as", global = true, default_value = "local-operator")]
    pub principal: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = Some(log_dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}
