//! JSON file fact store

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{
    BudgetRecord, FactStore, InMemoryStore, NewBudget, NewTransaction, TransactionRecord,
    TransactionScope,
};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, Period, Transaction};

/// On-disk layout of a data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub transactions: Vec<TransactionRecord>,
    pub budgets: Vec<BudgetRecord>,
}

/// A data file loaded into memory. Writes go to memory until `save`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    store: InMemoryStore,
}

impl JsonFileStore {
    /// Create a new data file seeded with the default categories.
    ///
    /// Fails if the file already exists.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(Error::InvalidData(format!(
                "Data file already exists: {}",
                path.display()
            )));
        }

        let mut store = InMemoryStore::new();
        let seeded = store.seed_default_categories()?;
        let file = Self { path, store };
        file.save()?;

        tracing::info!(path = %file.path.display(), categories = seeded, "Initialized data file");
        Ok(file)
    }

    /// Load an existing data file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::NotFound(format!("Data file {}", path.display())));
        }

        let contents = std::fs::read_to_string(&path)?;
        let dataset: Dataset = serde_json::from_str(&contents)?;
        let store = InMemoryStore::from_dataset(dataset)?;

        tracing::debug!(path = %path.display(), "Opened data file");
        Ok(Self { path, store })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Write the dataset back to disk, replacing the file atomically
    pub fn save(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self.store.dataset())?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), "Saved data file");
        Ok(())
    }

    pub fn add_category(&mut self, name: &str, color: &str, icon: &str) -> Result<Category> {
        self.store.add_category(name, color, icon)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.store.add_transaction(new)
    }

    pub fn upsert_budget(&mut self, new: NewBudget) -> Result<Budget> {
        self.store.upsert_budget(new)
    }
}

impl FactStore for JsonFileStore {
    fn categories(&self) -> Result<Vec<Category>> {
        self.store.categories()
    }

    fn transactions(&self, scope: TransactionScope) -> Result<Vec<Transaction>> {
        self.store.transactions(scope)
    }

    fn budgets(&self, period: Period) -> Result<Vec<Budget>> {
        self.store.budgets(period)
    }
}
