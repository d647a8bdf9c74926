use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Expense;

/// Repository persisting expenses as a JSON array in a single file.
///
/// The file is read whole on load and rewritten whole on every save.
/// There is no atomic rename: a crash during `save` can leave a truncated file.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository backed by the file at `path`.
    /// Nothing is touched on disk until `load` or `save` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every expense from the backing file.
    /// A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Vec<Expense>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read expense file {}", self.path.display())
                });
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid expense data in {}", self.path.display()))
    }

    /// Overwrite the backing file with the given expenses, pretty-printed.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, expenses)
            .context("Failed to serialize expenses")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write expenses to {}", self.path.display()))?;

        Ok(())
    }
}
