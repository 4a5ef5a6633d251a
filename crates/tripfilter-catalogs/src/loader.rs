use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::Catalog;

/// Collection files either hold a bare array or the backend's
/// `{ "data": [...] }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Payload<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Payload::Bare(items) | Payload::Wrapped { data: items } => items,
        }
    }
}

/// Reads catalog collections from `<data_dir>/<catalog>.json`.
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    data_dir: PathBuf,
}

impl CollectionLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, catalog: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", catalog))
    }

    /// Load a catalog's collection. A missing file is an empty collection.
    pub fn load<C: Catalog>(&self) -> Result<Vec<C::Item>> {
        let path = self.path_for(C::NAME);
        if !path.exists() {
            tracing::warn!(catalog = C::NAME, path = %path.display(), "no collection file, starting empty");
            return Ok(Vec::new());
        }
        load_file(&path)
    }

    /// Collection files under the data directory, sorted by path.
    pub fn list_collections(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.data_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        files.sort();
        files
    }
}

pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let payload: Payload<T> =
        serde_json::from_str(&raw).with_context(|| format!("parsing collection {}", path.display()))?;
    let items = payload.into_items();
    tracing::info!(path = %path.display(), items = items.len(), "loaded collection");
    Ok(items)
}
