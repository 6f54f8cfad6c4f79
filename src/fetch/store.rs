//! Card stores: where raw card documents come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;
use crate::types::RawRecord;

/// A source of raw card documents keyed by document id.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn fetch(&self, document: &str) -> Result<RawRecord, FetchError>;
}

/// In-process store with optional latency and injected failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, Result<RawRecord, FetchError>>,
    latency: HashMap<String, Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, document: impl Into<String>, record: impl Into<RawRecord>) {
        self.documents.insert(document.into(), Ok(record.into()));
    }

    /// Make every fetch of `document` fail with `error`.
    pub fn fail(&mut self, document: impl Into<String>, error: FetchError) {
        self.documents.insert(document.into(), Err(error));
    }

    /// Delay every fetch of `document` by `latency`.
    pub fn set_latency(&mut self, document: impl Into<String>, latency: Duration) {
        self.latency.insert(document.into(), latency);
    }

    pub fn with(mut self, document: impl Into<String>, record: impl Into<RawRecord>) -> Self {
        self.insert(document, record);
        self
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn fetch(&self, document: &str) -> Result<RawRecord, FetchError> {
        if let Some(latency) = self.latency.get(document) {
            tokio::time::sleep(*latency).await;
        }

        self.documents
            .get(document)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(document.to_string())))
    }
}

/// Store backed by a directory of `<document>.json` files.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a document id, or `None` if the id could escape the root.
    fn document_path(&self, document: &str) -> Option<PathBuf> {
        let valid = !document.is_empty()
            && document != "."
            && document != ".."
            && !document.contains(['/', '\\']);
        valid.then(|| self.root.join(format!("{}.json", document)))
    }
}

#[async_trait]
impl CardStore for JsonDirStore {
    async fn fetch(&self, document: &str) -> Result<RawRecord, FetchError> {
        let path = self
            .document_path(document)
            .ok_or_else(|| FetchError::NotFound(document.to_string()))?;

        debug!(document, path = %path.display(), "reading card document");

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(document.to_string())
            } else {
                FetchError::Transport(format!("{}: {}", path.display(), e))
            }
        })?;

        serde_json::from_str(&content).map_err(|e| FetchError::Decode {
            document: document.to_string(),
            message: e.to_string(),
        })
    }
}
