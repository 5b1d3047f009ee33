//! # File-Backed Store
//!
//! Applications are kept as pretty-printed JSON files, one per application,
//! in a state directory (`.lpa/applications` by default). Events and search
//! updates have no transport here; they are logged instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use lpa_core::LpaId;
use lpa_donor::{DataClient, DonorStore, EventClient, Provided, SearchClient};

/// Validate that an application id is safe for use as a file name.
pub fn validate_lpa_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("application id must not be empty");
    }
    if id.contains('/') || id.contains('\\') || id.contains('\0') {
        bail!("application id contains invalid path characters: {id:?}");
    }
    if id == "." || id == ".." {
        bail!("application id must not be a relative path: {id:?}");
    }
    Ok(())
}

/// Stores each application as `<dir>/<lpa_id>.json`.
#[derive(Debug, Clone)]
pub struct FileDataClient {
    dir: PathBuf,
}

impl FileDataClient {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, lpa_id: &LpaId) -> Result<PathBuf> {
        validate_lpa_id(lpa_id.as_str())?;
        Ok(self.dir.join(format!("{lpa_id}.json")))
    }

    fn write(&self, provided: &Provided) -> Result<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create state directory {}", self.dir.display())
        })?;
        let file = self.file(&provided.lpa_id)?;
        let json = serde_json::to_string_pretty(provided)?;
        std::fs::write(&file, json)
            .with_context(|| format!("failed to write {}", file.display()))?;
        Ok(())
    }

    fn read(&self, lpa_id: &LpaId) -> Result<Option<Provided>> {
        let file = self.file(lpa_id)?;
        if !file.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let provided = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        Ok(Some(provided))
    }

    /// Ids of every stored application, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl DataClient for FileDataClient {
    fn put(&self, provided: &Provided) -> Result<(), String> {
        self.write(provided).map_err(|e| format!("{e:#}"))
    }

    fn get(&self, lpa_id: &LpaId) -> Result<Option<Provided>, String> {
        self.read(lpa_id).map_err(|e| format!("{e:#}"))
    }
}

/// Logs application-updated events instead of publishing them.
#[derive(Debug, Default)]
pub struct LogEventClient;

impl EventClient for LogEventClient {
    fn send_application_updated(&self, provided: &Provided) -> Result<(), String> {
        tracing::info!(
            lpa_id = %provided.lpa_id,
            lpa_uid = provided.lpa_uid.as_deref().unwrap_or_default(),
            "application-updated"
        );
        Ok(())
    }
}

/// Logs search index updates instead of sending them.
#[derive(Debug, Default)]
pub struct LogSearchClient;

impl SearchClient for LogSearchClient {
    fn index(&self, provided: &Provided) -> Result<(), String> {
        tracing::debug!(lpa_id = %provided.lpa_id, "search index updated");
        Ok(())
    }
}

/// A [`DonorStore`] over `state_dir`.
pub fn open_store(state_dir: &Path) -> DonorStore {
    DonorStore::new(
        Arc::new(FileDataClient::new(state_dir)),
        Arc::new(LogEventClient),
        Arc::new(LogSearchClient),
    )
}

/// Load an application that must exist.
pub fn load(store: &DonorStore, id: &str) -> Result<Provided> {
    validate_lpa_id(id)?;
    let lpa_id = LpaId(id.to_string());
    store
        .get(&lpa_id)?
        .with_context(|| format!("application not found: {id}"))
}
