//! Terminal rendering helpers.

use std::fmt;

use chrono::NaiveDate;
use colored::Colorize;

use crate::core::services::DashboardSummary;
use crate::domain::{Bill, DisplayStatus};

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green().bold(), message);
}

pub fn warn(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red().bold(), message);
}

pub fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

fn status_badge(status: DisplayStatus) -> String {
    match status {
        DisplayStatus::Paid => "paid".green().to_string(),
        DisplayStatus::Overdue => "overdue".red().bold().to_string(),
        DisplayStatus::DueSoon => "due soon".yellow().to_string(),
        DisplayStatus::Current => "current".normal().to_string(),
    }
}

pub fn bill_line(bill: &Bill, today: NaiveDate) -> String {
    format!(
        "{:<32} R$ {:>10}  due {}  [{}]  {}",
        truncated(&bill.counterparty_name, 32),
        bill.amount.round_dp(2),
        bill.due_date.format("%d/%m/%Y"),
        status_badge(bill.display_status(today)),
        bill.category
    )
}

pub fn print_bill_table(bills: &[&Bill], today: NaiveDate) {
    if bills.is_empty() {
        warn("No bills match.");
        return;
    }
    for bill in bills {
        println!("{}", bill_line(bill, today));
    }
    println!("{}", format!("{} bill(s)", bills.len()).dimmed());
}

pub fn print_dashboard(summary: &DashboardSummary) {
    section("Summary");
    println!("Total due:  R$ {}", summary.total_due.round_dp(2));
    println!("Total paid: R$ {}", summary.total_paid.round_dp(2));

    section(&format!("Overdue ({})", summary.overdue_count));
    if summary.overdue.is_empty() {
        println!("{}", "nothing overdue".dimmed());
    }
    for bill in &summary.overdue {
        println!(
            "{} - R$ {} (due {})",
            bill.counterparty_name,
            bill.amount.round_dp(2),
            bill.due_date.format("%d/%m/%Y")
        );
    }

    section(&format!("Due soon ({})", summary.due_soon_count));
    if summary.due_soon.is_empty() {
        println!("{}", "nothing coming up".dimmed());
    }
    for bill in &summary.due_soon {
        println!(
            "{} - R$ {} (due {})",
            bill.counterparty_name,
            bill.amount.round_dp(2),
            bill.due_date.format("%d/%m/%Y")
        );
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
