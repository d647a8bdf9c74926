//! Expense API endpoints.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::{NOT_FOUND_MESSAGE, ServerError, server::ServerState};
use crate::domain::{
    Amount, CategorySummary, Expense, ExpenseId, ExpenseUpdate, ParseAmountError, parse_amount,
};

/// An amount as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    pub fn parse(&self) -> Result<Amount, ParseAmountError> {
        match self {
            AmountField::Number(amount) => Ok(*amount),
            AmountField::Text(text) => parse_amount(text),
        }
    }
}

/// Body of `POST /api/expenses`. Fields are optional here so that a missing
/// one yields our own 400 response instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseNew {
    pub amount: Option<AmountField>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Body of `PUT /api/expenses/{id}`; any subset of fields.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensePatch {
    pub amount: Option<AmountField>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

struct ValidExpense {
    amount: Amount,
    category: String,
    description: String,
    date: Option<String>,
}

impl ExpenseNew {
    fn validate(self) -> Result<ValidExpense, ServerError> {
        let amount = self.amount.ok_or_else(|| missing("amount"))?;
        let amount = amount.parse().map_err(invalid_amount)?;
        let category = self.category.ok_or_else(|| missing("category"))?;
        let description = self.description.ok_or_else(|| missing("description"))?;

        Ok(ValidExpense {
            amount,
            category,
            description,
            date: self.date,
        })
    }
}

impl ExpensePatch {
    fn validate(self) -> Result<ExpenseUpdate, ServerError> {
        let amount = self
            .amount
            .map(|amount| amount.parse())
            .transpose()
            .map_err(invalid_amount)?;

        Ok(ExpenseUpdate {
            amount,
            category: self.category,
            description: self.description,
            date: self.date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub success: bool,
    pub expense: Expense,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: CategorySummary,
    pub total: Amount,
}

fn missing(field: &str) -> ServerError {
    ServerError::BadRequest(format!("Missing field: {field}"))
}

fn invalid_amount(err: ParseAmountError) -> ServerError {
    ServerError::BadRequest(format!("Invalid amount: {err}"))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

// Non-numeric ids cannot name an expense.
fn expense_id(id: Result<Path<ExpenseId>, PathRejection>) -> Result<ExpenseId, ServerError> {
    id.map(|Path(id)| id)
        .map_err(|_| ServerError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

pub async fn list(State(state): State<ServerState>) -> Json<Vec<Expense>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.get_all())
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ServerError> {
    let new = body(payload)?.validate()?;

    let mut ledger = state.ledger.lock().await;
    let expense = ledger.add(new.amount, new.category, new.description, new.date)?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            success: true,
            expense,
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpensePatch>, JsonRejection>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = expense_id(id)?;
    let update = body(payload)?.validate()?;

    let mut ledger = state.ledger.lock().await;
    if !ledger.update(id, update)? {
        return Err(ServerError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }
    let expense = ledger.expense(id)?.clone();

    Ok(Json(ExpenseResponse {
        success: true,
        expense,
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<SuccessResponse>, ServerError> {
    let id = expense_id(id)?;

    let mut ledger = state.ledger.lock().await;
    if !ledger.delete(id)? {
        return Err(ServerError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn summary(State(state): State<ServerState>) -> Json<SummaryResponse> {
    let ledger = state.ledger.lock().await;
    Json(SummaryResponse {
        summary: ledger.get_summary_by_category(),
        total: ledger.get_total(None),
    })
}

pub async fn categories(State(state): State<ServerState>) -> Json<Vec<String>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.get_categories())
}
