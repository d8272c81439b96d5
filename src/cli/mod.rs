//! Interactive terminal front end and the non-interactive subcommands.
//!
//! The binary is the composition root: it owns the config manager, the
//! storage backend, and the workspace, and hands them to the menu loop.

pub mod menus;
pub mod output;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{AppConfig, ConfigManager};
use crate::core::filter::BillFilter;
use crate::core::services::{ServiceError, SummaryService};
use crate::core::time::local_today;
use crate::core::workspace::Workspace;
use crate::domain::BillDirection;
use crate::errors::StoreError;
use crate::export::{build_rows, write_csv_file, ExportError};
use crate::storage::JsonStore;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

struct AppContext {
    config: AppConfig,
    store: JsonStore,
    workspace: Workspace,
}

fn open_context() -> Result<AppContext, CliError> {
    let config = ConfigManager::new()?.load()?;
    let store = JsonStore::open(config.resolved_data_dir())?;
    let workspace = Workspace::load_from(&store)?;
    Ok(AppContext {
        config,
        store,
        workspace,
    })
}

/// Interactive menu session.
pub fn run() -> Result<(), CliError> {
    let mut context = open_context()?;
    menus::main_loop(&context.store, &mut context.workspace, &context.config)
}

/// `summary` subcommand: dashboard totals plus urgency lists.
pub fn print_summary() -> Result<(), CliError> {
    let context = open_context()?;
    let summary = SummaryService::dashboard(
        &context.workspace.bills,
        local_today(),
        context.config.dashboard_limit,
    );
    output::print_dashboard(&summary);
    Ok(())
}

/// `list` subcommand. Without an argument every bill is listed; `payable`
/// or `receivable` restricts the direction.
pub fn print_list(direction: Option<String>) -> Result<(), CliError> {
    let direction = match direction.as_deref() {
        None => None,
        Some("payable") => Some(BillDirection::Payable),
        Some("receivable") => Some(BillDirection::Receivable),
        Some(other) => {
            return Err(CliError::Usage(format!(
                "unknown direction `{other}` (expected payable or receivable)"
            )))
        }
    };
    let context = open_context()?;
    let mut filter = BillFilter::new();
    filter.direction = direction;
    let matched = filter.apply(&context.workspace.bills);
    output::print_bill_table(&matched, local_today());
    Ok(())
}

/// `export <path>` subcommand: CSV of every bill, input order.
pub fn export_to(path: PathBuf) -> Result<(), CliError> {
    let context = open_context()?;
    let matched = BillFilter::new().apply(&context.workspace.bills);
    let rows = build_rows(&matched);
    write_csv_file(&rows, &path)?;
    output::success(format!(
        "Exported {} bills to {}",
        rows.len(),
        path.display()
    ));
    Ok(())
}
