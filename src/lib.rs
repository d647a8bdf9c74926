pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod settings;
pub mod storage;
pub mod telemetry;

pub use application::ExpenseLedger;
pub use domain::*;
pub use storage::Repository;
