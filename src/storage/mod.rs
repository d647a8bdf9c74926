mod repository;

pub use repository::*;

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "expenses.json";
