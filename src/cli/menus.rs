//! Dialoguer-driven menu loops.
//!
//! Service failures are presented and swallowed here: an operation that the
//! store rejects prints a notification and returns to the menu instead of
//! aborting the session.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::{output, CliError};
use crate::config::AppConfig;
use crate::core::filter::{BillFilter, DateWindow, StatusFilter};
use crate::core::installment::InstallmentPlan;
use crate::core::services::{
    BillService, CategoryService, DepositorService, ServiceResult, SummaryService,
};
use crate::core::time::local_today;
use crate::core::workspace::Workspace;
use crate::domain::{BillDirection, BillDraft, Depositor, Displayable};
use crate::export::{build_rows, write_csv_file};
use crate::storage::DataStore;

const DATE_PROMPT_FORMAT: &str = "%Y-%m-%d";

pub fn main_loop(
    store: &dyn DataStore,
    workspace: &mut Workspace,
    config: &AppConfig,
) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    loop {
        let items = [
            "Dashboard",
            "Payables",
            "Receivables",
            "Categories",
            "Depositors",
            "Export CSV",
            "Quit",
        ];
        let choice = Select::with_theme(&theme)
            .with_prompt("contas")
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => {
                let summary =
                    SummaryService::dashboard(&workspace.bills, local_today(), config.dashboard_limit);
                output::print_dashboard(&summary);
            }
            // The payables view does not restrict direction; the receivables
            // view always does.
            1 => bills_menu(store, workspace, &theme, None)?,
            2 => bills_menu(store, workspace, &theme, Some(BillDirection::Receivable))?,
            3 => categories_menu(store, workspace, &theme)?,
            4 => depositors_menu(store, workspace, &theme)?,
            5 => export_flow(workspace, &theme)?,
            _ => return Ok(()),
        }
    }
}

fn bills_menu(
    store: &dyn DataStore,
    workspace: &mut Workspace,
    theme: &ColorfulTheme,
    direction: Option<BillDirection>,
) -> Result<(), CliError> {
    loop {
        let items = ["List", "Add", "Add installments", "Mark paid", "Delete", "Back"];
        let choice = Select::with_theme(theme)
            .with_prompt(match direction {
                Some(BillDirection::Receivable) => "receivables",
                _ => "payables",
            })
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => list_bills(workspace, theme, direction)?,
            1 => {
                if let Some(draft) = prompt_bill_draft(workspace, theme, direction)? {
                    present(BillService::create(store, workspace, draft).map(|_| "Bill created"));
                }
            }
            2 => {
                if let Some((base, plan)) = prompt_installments(workspace, theme, direction)? {
                    present(
                        BillService::create_installments(store, workspace, base, plan)
                            .map(|ids| format!("Created {} installments", ids.len())),
                    );
                }
            }
            3 => {
                if let Some(id) = pick_bill(workspace, theme, direction)? {
                    present(BillService::mark_paid(store, workspace, id).map(|_| "Marked as paid"));
                }
            }
            4 => {
                if let Some(id) = pick_bill(workspace, theme, direction)? {
                    let confirmed = Confirm::with_theme(theme)
                        .with_prompt("Delete this bill permanently?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        present(BillService::delete(store, workspace, id).map(|_| "Bill deleted"));
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}

fn list_bills(
    workspace: &Workspace,
    theme: &ColorfulTheme,
    direction: Option<BillDirection>,
) -> Result<(), CliError> {
    let statuses = ["all", "unpaid", "paid"];
    let status_choice = Select::with_theme(theme)
        .with_prompt("status")
        .items(&statuses)
        .default(0)
        .interact()?;
    let search: String = Input::with_theme(theme)
        .with_prompt("search (empty for all)")
        .allow_empty(true)
        .interact_text()?;

    let mut filter = BillFilter::new().with_search(search);
    filter.status = match status_choice {
        1 => StatusFilter::Unpaid,
        2 => StatusFilter::Paid,
        _ => StatusFilter::All,
    };
    filter.direction = direction;

    let today = local_today();
    if direction == Some(BillDirection::Receivable) {
        // Payment-period filtering exists only on the receivables view.
        let wants_window = Confirm::with_theme(theme)
            .with_prompt("Filter by payment period?")
            .default(false)
            .interact()?;
        if wants_window {
            let start = prompt_date(theme, "period start (YYYY-MM-DD)")?;
            let end = prompt_date(theme, "period end (YYYY-MM-DD)")?;
            if let (Some(start), Some(end)) = (start, end) {
                match DateWindow::new(start, end) {
                    Ok(window) => filter.payment_window = Some(window),
                    Err(err) => {
                        output::error(err);
                        return Ok(());
                    }
                }
            }
        }
        let matched = SummaryService::filtered_recent_first(&workspace.bills, &filter);
        output::print_bill_table(&matched, today);
    } else {
        output::print_bill_table(&filter.apply(&workspace.bills), today);
    }
    Ok(())
}

fn prompt_bill_draft(
    workspace: &Workspace,
    theme: &ColorfulTheme,
    direction: Option<BillDirection>,
) -> Result<Option<BillDraft>, CliError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("counterparty name")
        .interact_text()?;
    let amount = match prompt_amount(theme, "amount")? {
        Some(amount) => amount,
        None => return Ok(None),
    };
    let due_date = match prompt_date(theme, "due date (YYYY-MM-DD)")? {
        Some(date) => date,
        None => return Ok(None),
    };
    let category = prompt_category(workspace, theme)?;
    let notes: String = Input::with_theme(theme)
        .with_prompt("notes (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut draft = BillDraft::new(
        name,
        amount,
        due_date,
        category,
        direction.unwrap_or(BillDirection::Payable),
    );
    if !notes.trim().is_empty() {
        draft.notes = Some(notes.trim().to_string());
    }
    Ok(Some(draft))
}

fn prompt_installments(
    workspace: &Workspace,
    theme: &ColorfulTheme,
    direction: Option<BillDirection>,
) -> Result<Option<(BillDraft, InstallmentPlan)>, CliError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("counterparty name")
        .interact_text()?;
    let total = match prompt_amount(theme, "total amount")? {
        Some(total) => total,
        None => return Ok(None),
    };
    let count: String = Input::with_theme(theme)
        .with_prompt("installment count (1-48)")
        .interact_text()?;
    let Ok(count) = count.trim().parse::<u32>() else {
        output::error("Installment count must be a number");
        return Ok(None);
    };
    let first_due = match prompt_date(theme, "first due date (YYYY-MM-DD)")? {
        Some(date) => date,
        None => return Ok(None),
    };
    let category = prompt_category(workspace, theme)?;

    // Amount on the base draft is replaced per installment during expansion.
    let base = BillDraft::new(
        name,
        total,
        first_due,
        category,
        direction.unwrap_or(BillDirection::Payable),
    );
    Ok(Some((base, InstallmentPlan::new(count, total, first_due))))
}

fn prompt_category(workspace: &Workspace, theme: &ColorfulTheme) -> Result<String, CliError> {
    if workspace.categories.is_empty() {
        let typed: String = Input::with_theme(theme)
            .with_prompt("category")
            .interact_text()?;
        return Ok(typed.trim().to_string());
    }
    let mut labels: Vec<String> = workspace
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    labels.push("(type a new one)".into());
    let choice = Select::with_theme(theme)
        .with_prompt("category")
        .items(&labels)
        .default(0)
        .interact()?;
    if choice == labels.len() - 1 {
        let typed: String = Input::with_theme(theme)
            .with_prompt("category")
            .interact_text()?;
        Ok(typed.trim().to_string())
    } else {
        Ok(labels[choice].clone())
    }
}

fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<Option<Decimal>, CliError> {
    let raw: String = Input::with_theme(theme).with_prompt(prompt).interact_text()?;
    match raw.trim().replace(',', ".").parse::<Decimal>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            output::error(format!("`{}` is not a valid amount", raw.trim()));
            Ok(None)
        }
    }
}

fn prompt_date(theme: &ColorfulTheme, prompt: &str) -> Result<Option<NaiveDate>, CliError> {
    let raw: String = Input::with_theme(theme).with_prompt(prompt).interact_text()?;
    match NaiveDate::parse_from_str(raw.trim(), DATE_PROMPT_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            output::error(format!("`{}` is not a valid date", raw.trim()));
            Ok(None)
        }
    }
}

fn pick_bill(
    workspace: &Workspace,
    theme: &ColorfulTheme,
    direction: Option<BillDirection>,
) -> Result<Option<Uuid>, CliError> {
    let candidates: Vec<&crate::domain::Bill> = workspace
        .bills
        .iter()
        .filter(|bill| direction.map_or(true, |d| bill.direction == d))
        .collect();
    if candidates.is_empty() {
        output::warn("No bills to act on.");
        return Ok(None);
    }
    let labels: Vec<String> = candidates.iter().map(|bill| bill.display_label()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt("which bill")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(candidates[choice].id))
}

fn categories_menu(
    store: &dyn DataStore,
    workspace: &mut Workspace,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    loop {
        let items = ["List", "Add", "Rename", "Delete", "Back"];
        let choice = Select::with_theme(theme)
            .with_prompt("categories")
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => {
                for category in CategoryService::list(workspace) {
                    println!("{}", category.name);
                }
            }
            1 => {
                let name: String = Input::with_theme(theme)
                    .with_prompt("category name")
                    .interact_text()?;
                present(CategoryService::add(store, workspace, name).map(|_| "Category added"));
            }
            2 => {
                if let Some(id) = pick_category(workspace, theme)? {
                    let name: String = Input::with_theme(theme)
                        .with_prompt("new name")
                        .interact_text()?;
                    present(
                        CategoryService::rename(store, workspace, id, name)
                            .map(|_| "Category renamed"),
                    );
                }
            }
            3 => {
                if let Some(id) = pick_category(workspace, theme)? {
                    present(CategoryService::remove(store, workspace, id).map(|_| "Category deleted"));
                }
            }
            _ => return Ok(()),
        }
    }
}

fn pick_category(workspace: &Workspace, theme: &ColorfulTheme) -> Result<Option<Uuid>, CliError> {
    if workspace.categories.is_empty() {
        output::warn("No categories yet.");
        return Ok(None);
    }
    let labels: Vec<String> = workspace
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    let choice = Select::with_theme(theme)
        .with_prompt("which category")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(workspace.categories[choice].id))
}

fn depositors_menu(
    store: &dyn DataStore,
    workspace: &mut Workspace,
    theme: &ColorfulTheme,
) -> Result<(), CliError> {
    loop {
        let items = ["List", "Add", "Delete", "Back"];
        let choice = Select::with_theme(theme)
            .with_prompt("depositors")
            .items(&items)
            .default(0)
            .interact()?;
        match choice {
            0 => {
                for depositor in DepositorService::list(workspace) {
                    println!("{}", depositor.display_label());
                }
            }
            1 => {
                let name: String = Input::with_theme(theme)
                    .with_prompt("display name")
                    .interact_text()?;
                let mut depositor = Depositor::new(name.trim());
                let city: String = Input::with_theme(theme)
                    .with_prompt("city (optional)")
                    .allow_empty(true)
                    .interact_text()?;
                if !city.trim().is_empty() {
                    depositor.city = Some(city.trim().to_string());
                }
                present(
                    DepositorService::add(store, workspace, depositor).map(|_| "Depositor added"),
                );
            }
            2 => {
                if workspace.depositors.is_empty() {
                    output::warn("No depositors yet.");
                    continue;
                }
                let labels: Vec<String> = workspace
                    .depositors
                    .iter()
                    .map(|depositor| depositor.display_label())
                    .collect();
                let choice = Select::with_theme(theme)
                    .with_prompt("which depositor")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let id = workspace.depositors[choice].id;
                present(DepositorService::remove(store, workspace, id).map(|_| "Depositor deleted"));
            }
            _ => return Ok(()),
        }
    }
}

fn export_flow(workspace: &Workspace, theme: &ColorfulTheme) -> Result<(), CliError> {
    let path: String = Input::with_theme(theme)
        .with_prompt("output file")
        .with_initial_text("contas.csv")
        .interact_text()?;
    let matched = BillFilter::new().apply(&workspace.bills);
    let rows = build_rows(&matched);
    match write_csv_file(&rows, std::path::Path::new(path.trim())) {
        Ok(()) => output::success(format!("Exported {} bills to {}", rows.len(), path.trim())),
        Err(err) => output::error(err),
    }
    Ok(())
}

/// Prints the outcome of a service call without propagating it: failures
/// are notifications, not session aborts.
fn present<T: std::fmt::Display>(result: ServiceResult<T>) {
    match result {
        Ok(message) => output::success(message),
        Err(err) => output::error(err),
    }
}
