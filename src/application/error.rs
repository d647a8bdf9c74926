use thiserror::Error;

use crate::domain::{ExpenseId, ParseAmountError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("No expense ids left to assign")]
    IdsExhausted,

    /// The backing store could not be written. In-memory state is kept as is,
    /// so memory and disk may disagree after this error.
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
