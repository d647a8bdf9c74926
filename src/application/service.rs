use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::{
    Amount, CategorySummary, Expense, ExpenseId, ExpenseUpdate, categories, matches_category,
    summary_by_category, total,
};
use crate::storage::Repository;

use super::AppError;

/// The expense ledger: owns every expense, mints identifiers and persists
/// the whole set after each mutation.
/// This is the primary interface for any client (CLI, interactive menu, HTTP API).
///
/// The ledger is not synchronized. Callers sharing it between tasks must
/// serialize access themselves.
pub struct ExpenseLedger {
    repo: Repository,
    expenses: Vec<Expense>,
    next_id: ExpenseId,
}

impl ExpenseLedger {
    /// Create a ledger over the given repository and load its contents.
    pub fn open(repo: Repository) -> Self {
        let mut ledger = Self {
            repo,
            expenses: Vec::new(),
            next_id: 1,
        };
        ledger.load();
        ledger
    }

    /// Open the ledger backed by the JSON file at `path`.
    pub fn open_path(path: impl Into<PathBuf>) -> Self {
        Self::open(Repository::new(path))
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Reload from the backing store.
    /// An unreadable store, or one whose largest id leaves no room for
    /// another, is treated as empty and only logged.
    pub fn load(&mut self) {
        let loaded = self.repo.load().and_then(|expenses| {
            let next_id = match expenses.iter().map(|e| e.id).max() {
                Some(max) => max
                    .checked_add(1)
                    .with_context(|| format!("Expense id {max} is the largest possible id"))?,
                None => 1,
            };
            Ok((expenses, next_id))
        });

        (self.expenses, self.next_id) = match loaded {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(
                    "Could not load data from {}: {err:#}",
                    self.repo.path().display()
                );
                (Vec::new(), 1)
            }
        };
        tracing::debug!(
            count = self.expenses.len(),
            next_id = self.next_id,
            "loaded expenses"
        );
    }

    fn persist(&self) -> Result<(), AppError> {
        self.repo.save(&self.expenses)?;
        Ok(())
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense. A missing or empty date becomes today.
    /// Fails without recording anything once ids run out.
    pub fn add(
        &mut self,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<String>,
    ) -> Result<Expense, AppError> {
        let next_id = self.next_id.checked_add(1).ok_or(AppError::IdsExhausted)?;
        let expense = Expense::new(self.next_id, amount, category, description, date);
        self.expenses.push(expense.clone());
        self.next_id = next_id;
        self.persist()?;

        tracing::debug!(id = expense.id, "added expense");
        Ok(expense)
    }

    /// Apply a partial update. Returns false, without persisting, when no
    /// expense has the given id.
    pub fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<bool, AppError> {
        let Some(expense) = self.expenses.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };

        update.apply(expense);
        self.persist()?;

        tracing::debug!(id, "updated expense");
        Ok(true)
    }

    /// Remove an expense. Returns false when no expense has the given id.
    /// The id is never handed out again by this ledger.
    pub fn delete(&mut self, id: ExpenseId) -> Result<bool, AppError> {
        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        self.expenses.remove(index);
        self.persist()?;

        tracing::debug!(id, "deleted expense");
        Ok(true)
    }

    // ========================
    // Queries
    // ========================

    pub fn get_by_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Like `get_by_id`, but a missing expense is an error.
    pub fn expense(&self, id: ExpenseId) -> Result<&Expense, AppError> {
        self.get_by_id(id).ok_or(AppError::ExpenseNotFound(id))
    }

    /// All expenses, newest date first. Expenses sharing a date keep
    /// insertion order.
    pub fn get_all(&self) -> Vec<Expense> {
        let mut expenses = self.expenses.clone();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    /// Expenses whose category matches ignoring case, in insertion order.
    pub fn get_by_category(&self, category: &str) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| matches_category(e, category))
            .cloned()
            .collect()
    }

    pub fn get_total(&self, category: Option<&str>) -> Amount {
        total(&self.expenses, category)
    }

    /// Distinct categories, sorted. Unlike `get_by_category`, this is
    /// case-sensitive.
    pub fn get_categories(&self) -> Vec<String> {
        categories(&self.expenses)
    }

    pub fn get_summary_by_category(&self) -> CategorySummary {
        summary_by_category(&self.expenses)
    }
}
