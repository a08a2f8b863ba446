//! Command-line entry point over the mystery-shopper API.
//!
//! # Responsibility
//! - Exercise the task endpoints and submission pipeline from a shell.
//! - Print machine-readable JSON on stdout; errors go to stderr with exit code 1.

mod cli;
mod demo;

use clap::Parser;
use cli::{ChecklistCommands, Cli, Commands, ReportCommands, TaskCommands};
use mysteryshop_api::{dispatch, submit_form, ApiConfig};
use mysteryshop_core::{consolidate, GatewayError, ResponseReport, SimulatedGateway};
use serde_json::{json, Value};
use std::process::ExitCode;

const DEFAULT_CHECKLIST_NAME: &str = "Atendimento - Loja Centro";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let config = resolve_config(&cli)?;
    if let Some(logging) = config.logging() {
        mysteryshop_core::init_logging(&logging).map_err(|err| err.to_string())?;
    }

    let value = match cli.command {
        Commands::Ping => json!({
            "ping": mysteryshop_core::ping(),
            "version": mysteryshop_core::core_version(),
        }),
        Commands::Tasks { command } => run_tasks(&config, command)?,
        Commands::Checklist {
            command: ChecklistCommands::Demo { fail, name },
        } => run_checklist_demo(&config, fail, name)?,
        Commands::Report {
            command: ReportCommands::Demo,
        } => run_report_demo()?,
    };
    serde_json::to_string_pretty(&value).map_err(|err| err.to_string())
}

fn resolve_config(cli: &Cli) -> Result<ApiConfig, String> {
    let mut config = ApiConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn run_tasks(config: &ApiConfig, command: TaskCommands) -> Result<Value, String> {
    let response = match command {
        TaskCommands::List => dispatch(config, "GET", "/tasks", ""),
        TaskCommands::Add { title } => {
            let body = json!({ "title": title }).to_string();
            dispatch(config, "POST", "/tasks", &body)
        }
    };
    if response.status >= 400 {
        return Err(format!("status {}: {}", response.status, response.body));
    }
    Ok(response.body)
}

fn run_checklist_demo(
    config: &ApiConfig,
    fail: bool,
    name: Option<String>,
) -> Result<Value, String> {
    let name = name.unwrap_or_else(|| DEFAULT_CHECKLIST_NAME.to_string());
    let mut editor = demo::store_service_editor(&name).map_err(|err| err.to_string())?;
    let gateway = if fail {
        SimulatedGateway::failing(
            config.submit_delay,
            GatewayError::Unavailable("simulated outage".to_string()),
        )
    } else {
        SimulatedGateway::new(config.submit_delay)
    };

    let response = submit_form(&mut editor, &gateway);
    let mut value = serde_json::to_value(&response).map_err(|err| err.to_string())?;
    value["trace"] = serde_json::to_value(editor.trace()).map_err(|err| err.to_string())?;
    Ok(value)
}

fn run_report_demo() -> Result<Value, String> {
    let responses = demo::sample_responses().map_err(|err| err.to_string())?;
    let per_response: Vec<ResponseReport> =
        responses.iter().map(ResponseReport::from_response).collect();
    let dashboard = consolidate(&responses);

    Ok(json!({
        "responses": per_response,
        "consolidated": dashboard,
        "overall_percentage": dashboard.overall.rounded_percentage(),
    }))
}
