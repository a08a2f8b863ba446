use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mysteryshop", version, about = "Mystery-shopper checklist core CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Task database file (overrides MYSTERYSHOP_DB_PATH)")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, help = "Absolute log directory (overrides MYSTERYSHOP_LOG_DIR)")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "trace|debug|info|warn|error")]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints core liveness and version.
    Ping,
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// `GET /tasks`
    List,
    /// `POST /tasks`
    Add { title: String },
}

#[derive(Subcommand, Debug)]
pub enum ChecklistCommands {
    /// Builds the sample checklist and submits it through the simulated gateway.
    Demo {
        #[arg(long, default_value_t = false, help = "Make the simulated write fail")]
        fail: bool,
        #[arg(long, help = "Checklist name to submit")]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Consolidates the sample responses.
    Demo,
}
