//! Project manifest (manacard.yaml) parsing.
//!
//! The manifest names the card store, the fetch tasks to run and how their
//! publishes are treated. Every field has a default, so an empty file (or no
//! file at all) runs the stock four-card refresh against `./cards`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};
use crate::fetch::{FetchTask, PublishPolicy};
use crate::types::{CardRecord, RawRecord};

/// Manifest file name looked up by [`Manifest::find`].
pub const MANIFEST_FILE: &str = "manacard.yaml";

/// Project manifest loaded from manacard.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory of `<document>.json` card files.
    #[serde(default = "default_store")]
    pub store: PathBuf,

    /// Fetch tasks, launched in order.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskSpec>,

    /// How out-of-order publishes are treated.
    #[serde(default)]
    pub policy: PublishPolicy,

    /// Per-fetch timeout in milliseconds. No timeout when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// JSON card shown before any fetch completes. Defaults to the
    /// built-in sample card.
    #[serde(default)]
    pub initial: Option<PathBuf>,
}

/// A fetch task as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub label: String,
    pub document: String,
    #[serde(default)]
    pub delay_ms: u64,
}

impl TaskSpec {
    fn new(label: &str, document: &str, delay_ms: u64) -> Self {
        Self {
            label: label.to_string(),
            document: document.to_string(),
            delay_ms,
        }
    }

    pub fn to_task(&self) -> FetchTask {
        FetchTask::new(&self.label, &self.document, Duration::from_millis(self.delay_ms))
    }
}

fn default_store() -> PathBuf {
    PathBuf::from("cards")
}

fn default_tasks() -> Vec<TaskSpec> {
    vec![
        TaskSpec::new("Sarkhan", "CCH001", 5_000),
        TaskSpec::new("Glider", "RE001", 10_000),
        TaskSpec::new("Prodigy", "CHH", 15_000),
        TaskSpec::new("Trench", "E001", 20_000),
    ]
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            store: default_store(),
            tasks: default_tasks(),
            policy: PublishPolicy::default(),
            timeout_ms: None,
            initial: None,
        }
    }
}

impl Manifest {
    /// Load manifest from a manacard.yaml file.
    ///
    /// Relative `store` and `initial` paths are resolved against the
    /// manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CardError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let mut manifest = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            manifest.store = base.join(&manifest.store);
            manifest.initial = manifest.initial.map(|p| base.join(p));
        }

        Ok(manifest)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Self = serde_yaml::from_str(content).map_err(|e| CardError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILE)),
        })?;
        manifest.validate()?;

        Ok(manifest)
    }

    /// Walk up from `start` looking for a manifest file.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILE))
            .find(|candidate| candidate.is_file())
    }

    fn validate(&self) -> Result<()> {
        for (i, task) in self.tasks.iter().enumerate() {
            if task.document.trim().is_empty() {
                return Err(CardError::Config {
                    message: format!("Task {} ({:?}) has no document id", i + 1, task.label),
                    help: Some("Set `document:` to the card's id in the store".to_string()),
                });
            }
        }
        Ok(())
    }

    /// Fetch tasks in launch order.
    pub fn fetch_tasks(&self) -> Vec<FetchTask> {
        self.tasks.iter().map(TaskSpec::to_task).collect()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The card shown before any fetch completes.
    pub fn initial_card(&self) -> Result<CardRecord> {
        let Some(path) = &self.initial else {
            return Ok(CardRecord::sample());
        };

        let content = std::fs::read_to_string(path).map_err(|e| CardError::Io {
            path: path.clone(),
            message: format!("Failed to read initial card: {}", e),
        })?;

        let raw: RawRecord = serde_json::from_str(&content).map_err(|e| CardError::Parse {
            message: format!("Invalid card {}: {}", path.display(), e),
            help: None,
        })?;

        Ok(raw.sanitize())
    }
}
