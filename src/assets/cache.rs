//! Offline cache for the game's sprite assets
//!
//! Keeps a versioned, on-disk copy of a fixed asset manifest so the game can
//! run without its origin available. Lookups are cache-first with an origin
//! fallback; activating a cache version purges every sibling version. The
//! cache shares no state with the game logic.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Version tag carried in the cache directory name. Bump it to invalidate
/// previously installed caches on the next activation.
pub const CACHE_VERSION: &str = "sprites-v1";

/// Fixed manifest of assets kept offline
pub const MANIFEST: &[&str] = &[
    "icon.png",
    "head.png",
    "body.png",
    "bush.png",
    "tree.png",
    "rock.png",
    "food1.png",
    "food2.png",
    "food3.png",
    "food4.png",
    "food5.png",
];

/// Where assets come from when the cache cannot serve them
pub trait AssetSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

/// Directory-backed asset origin
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        fs::read(&path).with_context(|| format!("Failed to fetch asset {:?}", path))
    }
}

/// Sidecar describing an installed cache version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub version: String,
    pub files: Vec<String>,
}

/// A single named cache version under a shared cache root
pub struct OfflineCache {
    root: PathBuf,
    version: String,
}

impl OfflineCache {
    pub fn new(root: impl Into<PathBuf>, version: &str) -> Self {
        Self {
            root: root.into(),
            version: version.to_string(),
        }
    }

    /// Cache at the current built-in version tag
    pub fn open_default(root: impl Into<PathBuf>) -> Self {
        Self::new(root, CACHE_VERSION)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.version)
    }

    fn cached_path(&self, name: &str) -> PathBuf {
        self.cache_dir().join(name)
    }

    /// Fetch every manifest entry from the origin into this cache version.
    /// Fails as a whole if any single asset cannot be fetched. Returns the
    /// number of assets written.
    pub fn install(&self, source: &dyn AssetSource, manifest: &[&str]) -> Result<usize> {
        let dir = self.cache_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory {:?}", dir))?;

        info!(version = %self.version, assets = manifest.len(), "caching asset manifest");

        for name in manifest {
            let bytes = source.fetch(name)?;
            let path = self.cached_path(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write cached asset {:?}", path))?;
        }

        let metadata = CacheMetadata {
            version: self.version.clone(),
            files: manifest.iter().map(|s| s.to_string()).collect(),
        };
        let meta_json =
            serde_json::to_string_pretty(&metadata).context("Failed to serialize cache metadata")?;
        let meta_path = dir.join("metadata.json");
        fs::write(&meta_path, meta_json)
            .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

        Ok(manifest.len())
    }

    /// Delete every sibling cache version whose name does not match this
    /// one. Returns the number of versions removed.
    pub fn activate(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut purged = 0;
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read cache root {:?}", self.root))?;

        for entry in entries {
            let entry = entry.context("Failed to read cache root entry")?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy() != self.version {
                info!(stale = ?entry.file_name(), "clearing old cache version");
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove stale cache {:?}", path))?;
                purged += 1;
            }
        }

        info!(version = %self.version, purged, "cache activated");
        Ok(purged)
    }

    /// Cache-first lookup: serve the cached copy when present, otherwise
    /// fall back to the origin. Fallback reads are not written back.
    pub fn fetch(&self, name: &str, source: &dyn AssetSource) -> Result<Vec<u8>> {
        let path = self.cached_path(name);
        if path.exists() {
            debug!(asset = name, "cache hit");
            return fs::read(&path)
                .with_context(|| format!("Failed to read cached asset {:?}", path));
        }

        debug!(asset = name, "cache miss, fetching from origin");
        source.fetch(name)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cached_path(name).exists()
    }

    /// Read back the metadata sidecar of an installed cache
    pub fn metadata(&self) -> Result<CacheMetadata> {
        let meta_path = self.cache_dir().join("metadata.json");
        let meta_json = fs::read_to_string(&meta_path)
            .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
        serde_json::from_str(&meta_json).context("Failed to deserialize cache metadata")
    }
}
