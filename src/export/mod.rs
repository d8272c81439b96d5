//! Builds export rows from a filtered bill list and writes them as CSV.
//!
//! Document rendering beyond CSV (PDF and friends) stays with external
//! collaborators; they receive the same ordered rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::Bill;

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One exported line. Column order is fixed: name, amount, due date,
/// category, status.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    pub status: String,
}

/// Maps an already-filtered, already-ordered list into rows. Order is
/// preserved; filtering decisions belong to the caller.
pub fn build_rows(bills: &[&Bill]) -> Vec<ExportRow> {
    bills
        .iter()
        .map(|bill| ExportRow {
            name: bill.counterparty_name.clone(),
            amount: bill.amount.round_dp(2),
            due_date: bill.due_date,
            category: bill.category.clone(),
            status: bill.status.to_string(),
        })
        .collect()
}

pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["name", "amount", "due_date", "category", "status"])?;
    for row in rows {
        let record = [
            row.name.clone(),
            row.amount.to_string(),
            row.due_date.format(DATE_FORMAT).to_string(),
            row.category.clone(),
            row.status.clone(),
        ];
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file(rows: &[ExportRow], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(rows, file)
}
