pub mod cache;

pub use cache::{AssetSource, CacheMetadata, DirSource, OfflineCache, CACHE_VERSION, MANIFEST};
