//! Competitor URL history persisted as a JSON array of strings
//!
//! The file is read in full and rewritten in full. Two processes recording at
//! the same time can race and drop one entry.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::GeneratorResult;
use crate::traits::HistoryStore;

/// JSON file backed history store
pub struct RealHistoryStore {
    path: PathBuf,
}

impl RealHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_all(&self, urls: &[String]) -> GeneratorResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Write next to the target, then rename over it
        let tmp_path = self.path.with_extension("json.tmp");
        let contents = serde_json::to_vec(urls)?;
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for RealHistoryStore {
    async fn load(&self) -> Vec<String> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!("failed to read competitor history at {}: {err}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&contents) {
            Ok(urls) => urls,
            Err(err) => {
                warn!("ignoring invalid competitor history at {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    async fn record(&self, url: &str) -> GeneratorResult<bool> {
        let mut urls = self.load().await;
        if urls.iter().any(|known| known == url) {
            debug!(url = url, "Competitor URL already in history");
            return Ok(false);
        }

        urls.push(url.to_string());
        self.write_all(&urls).await?;
        debug!(url = url, total = urls.len(), "Recorded competitor URL");
        Ok(true)
    }
}
