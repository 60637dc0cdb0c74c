//! Configuration: a small toml + env layer over a data directory.
//!
//! Everything the CLI persists (records, queue, artifacts, index) lives
//! under one data directory so a pipeline run is self-contained and easy to
//! inspect.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file name looked up inside the data directory.
pub const CONFIG_FILE: &str = "docuflow.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DOCUFLOW_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory for all local state.
    pub data_dir: PathBuf,
    /// Search index name used for every upsert and query.
    pub index_name: String,
    /// Page size the fixture analysis client serves results in.
    pub results_page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            index_name: "documents".to_string(),
            results_page_size: 100,
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docuflow")
}

impl Settings {
    /// Load settings: explicit config file, else `<data-dir>/docuflow.toml`,
    /// else defaults. A `--target` directory overrides the data dir from
    /// either source.
    pub fn load(config: Option<&Path>, target: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match config {
            Some(path) => Self::from_file(path)?,
            None => {
                let dir = target.map(Path::to_path_buf).unwrap_or_else(default_data_dir);
                let candidate = dir.join(CONFIG_FILE);
                if candidate.exists() {
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };
        if let Some(target) = target {
            settings.data_dir = target.to_path_buf();
        }
        Ok(settings)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
        Ok(toml::from_str(&raw)?)
    }

    /// JSON file holding document records.
    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join("documents.json")
    }

    /// JSON file holding output records.
    pub fn outputs_path(&self) -> PathBuf {
        self.data_dir.join("outputs.json")
    }

    /// JSON-lines file backing the job queue.
    pub fn queue_path(&self) -> PathBuf {
        self.data_dir.join("queue.jsonl")
    }

    /// Root directory of the local artifact store.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.data_dir.join("artifacts")
    }

    /// Root directory of the local search index.
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("index")
    }
}
