//! Asset sync mode
//!
//! Installs the fixed sprite manifest from an origin directory into the
//! versioned offline cache, then activates the cache so stale versions get
//! purged. Runs standalone; the game itself never blocks on it.

use anyhow::Result;
use std::path::PathBuf;

use crate::assets::{DirSource, OfflineCache, CACHE_VERSION, MANIFEST};

pub struct SyncMode {
    origin: PathBuf,
    cache_root: PathBuf,
}

impl SyncMode {
    pub fn new(origin: PathBuf, cache_root: PathBuf) -> Self {
        Self { origin, cache_root }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", "=".repeat(60));
        println!("Asset sync - Garden Snake");
        println!("{}", "=".repeat(60));
        println!("Origin: {:?}", self.origin);
        println!("Cache root: {:?}", self.cache_root);
        println!("Cache version: {}", CACHE_VERSION);

        let source = DirSource::new(self.origin.clone());
        let cache = OfflineCache::open_default(self.cache_root.clone());

        let installed = cache.install(&source, MANIFEST)?;
        println!("Cached {} assets", installed);

        let purged = cache.activate()?;
        println!("Purged {} stale cache version(s)", purged);

        Ok(())
    }
}
