use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tokio::sync::Mutex;

use crate::api::expenses;
use crate::application::ExpenseLedger;
use crate::settings::ServerSettings;

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<Mutex<ExpenseLedger>>,
}

impl ServerState {
    pub fn new(ledger: ExpenseLedger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/{id}", put(expenses::update).delete(expenses::delete))
        .route("/api/summary", get(expenses::summary))
        .route("/api/categories", get(expenses::categories))
        .with_state(state)
}

pub async fn run(ledger: ExpenseLedger, settings: &ServerSettings) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(settings.address()).await?;
    run_with_listener(ledger, listener).await
}

pub async fn run_with_listener(
    ledger: ExpenseLedger,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(
        "Server listening on {}, data file {}",
        addr,
        ledger.path().display()
    );

    axum::serve(listener, router(ServerState::new(ledger))).await
}

pub fn spawn_with_listener(
    ledger: ExpenseLedger,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(ledger, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
