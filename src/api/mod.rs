//! HTTP/JSON front end.
//!
//! Every handler locks the shared [`ExpenseLedger`](crate::application::ExpenseLedger)
//! for the duration of the request, so ledger access is fully serialized.
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::application::AppError;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod expenses;
mod server;

pub const NOT_FOUND_MESSAGE: &str = "Expense not found";

#[derive(Debug)]
pub enum ServerError {
    App(AppError),
    BadRequest(String),
    NotFound(String),
}

#[derive(Serialize)]
struct Error {
    success: bool,
    error: String,
}

fn status_for_app_error(err: &AppError) -> StatusCode {
    match err {
        AppError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
        AppError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        AppError::IdsExhausted | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_app_error(err: AppError) -> String {
    match err {
        AppError::Storage(storage_err) => {
            tracing::error!("storage error: {storage_err:#}");
            "internal server error".to_string()
        }
        AppError::ExpenseNotFound(_) => NOT_FOUND_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::App(err) => (status_for_app_error(&err), message_for_app_error(err)),
            ServerError::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
        };

        (
            status,
            Json(Error {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

impl From<AppError> for ServerError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}
