//! Bounded project history persisted as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Result};
use crate::types::AdProject;

const HISTORY_FILE: &str = "history.json";
/// Entries kept when the serialized history outgrows its quota.
pub const EMERGENCY_KEEP: usize = 2;

/// Storage abstraction for saved projects, newest first.
pub trait HistoryStore: Send + Sync {
    fn list(&self) -> Result<Vec<AdProject>>;
    /// Insert or replace a project and return the resulting list.
    fn save(&self, project: &AdProject) -> Result<Vec<AdProject>>;
    /// Remove a project by id and return the resulting list.
    fn delete(&self, id: &str) -> Result<Vec<AdProject>>;
}

#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub base_dir: PathBuf,
    pub max_items: usize,
    pub quota_bytes: usize,
}

impl HistoryConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        let defaults = AdcraftConfig::default();
        Self {
            base_dir,
            max_items: defaults.history_max_items,
            quota_bytes: defaults.history_quota_bytes,
        }
    }

    pub fn from_config(base_dir: PathBuf, config: &AdcraftConfig) -> Self {
        Self {
            base_dir,
            max_items: config.history_max_items,
            quota_bytes: config.history_quota_bytes,
        }
    }

    pub fn default_dir() -> PathBuf {
        default_adcraft_dir()
    }
}

/// File-backed history.
///
/// # Example
/// ```no_run
/// use adcraft::history::{FileHistoryStore, HistoryStore};
///
/// let store = FileHistoryStore::new_default();
/// for project in store.list()? {
///     println!("{} {}", project.id, project.title);
/// }
/// # Ok::<(), adcraft::error::AdcraftError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
    max_items: usize,
    quota_bytes: usize,
}

impl FileHistoryStore {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            path: config.base_dir.join(HISTORY_FILE),
            max_items: config.max_items.max(1),
            quota_bytes: config.quota_bytes,
        }
    }

    pub fn new_default() -> Self {
        Self::new(HistoryConfig::new(default_adcraft_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, projects: &[AdProject]) -> Result<()> {
        let serialized = encode(projects)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn list(&self) -> Result<Vec<AdProject>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let file: HistoryFile = serde_json::from_str(&raw)?;
        Ok(file.projects)
    }

    fn save(&self, project: &AdProject) -> Result<Vec<AdProject>> {
        let mut projects = self.list()?;
        projects.retain(|p| p.id != project.id);
        projects.insert(0, project.clone());
        projects.truncate(self.max_items);

        let size = encode(&projects)?.len();
        if size > self.quota_bytes {
            warn!(bytes = size, quota = self.quota_bytes, "History over quota, keeping newest entries only");
            projects.truncate(EMERGENCY_KEEP);
            let trimmed = encode(&projects)?.len();
            if trimmed > self.quota_bytes {
                return Err(AdcraftError::HistoryQuotaExceeded {
                    bytes: trimmed,
                    quota: self.quota_bytes,
                });
            }
        }

        self.write(&projects)?;
        debug!(entries = projects.len(), path = %self.path.display(), "History saved");
        Ok(projects)
    }

    fn delete(&self, id: &str) -> Result<Vec<AdProject>> {
        let mut projects = self.list()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() != before {
            self.write(&projects)?;
        }
        Ok(projects)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryFile {
    version: u32,
    saved_at: DateTime<Utc>,
    projects: Vec<AdProject>,
}

fn encode(projects: &[AdProject]) -> Result<String> {
    let file = HistoryFile {
        version: 1,
        saved_at: Utc::now(),
        projects: projects.to_vec(),
    };
    Ok(serde_json::to_string(&file)?)
}

fn default_adcraft_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".adcraft"))
        .unwrap_or_else(|| PathBuf::from(".adcraft"))
}
