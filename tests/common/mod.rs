// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use expense_ledger::application::ExpenseLedger;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test ledger backed by a file in a temporary directory
pub fn test_ledger() -> Result<(ExpenseLedger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let ledger = ExpenseLedger::open_path(data_file(&temp_dir));
    Ok((ledger, temp_dir))
}

/// Path of the backing file used by `test_ledger`
pub fn data_file(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.json")
}

/// Test fixture: the two-expense scenario used across tests
pub struct SampleExpenses;

impl SampleExpenses {
    /// Lunch (Food, 12.50, 2024-03-01) then Taxi (Transport, 40.00, 2024-02-15)
    pub fn create_basic(ledger: &mut ExpenseLedger) -> Result<()> {
        ledger.add(12.50, "Food", "Lunch", Some("2024-03-01".into()))?;
        ledger.add(40.00, "Transport", "Taxi", Some("2024-02-15".into()))?;
        Ok(())
    }

    /// Basic expenses plus a spread of categories, dates and casings
    pub fn create_mixed(ledger: &mut ExpenseLedger) -> Result<()> {
        Self::create_basic(ledger)?;
        ledger.add(8.25, "food", "Coffee beans", Some("2024-03-01".into()))?;
        ledger.add(950.00, "Rent", "March rent", Some("2024-03-01".into()))?;
        ledger.add(15.75, "Entertainment", "Cinema", Some("2024-01-20".into()))?;
        ledger.add(3.50, "FOOD", "Bakery", Some("2024-02-28".into()))?;
        Ok(())
    }
}
