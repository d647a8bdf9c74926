// Application layer - the expense ledger shared by every front end

pub mod error;
mod service;

pub use error::*;
pub use service::*;
