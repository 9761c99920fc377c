//! Cache Module
//!
//! Repository analysis cache: a remote Redis tier with a local file fallback,
//! fronted by `CacheRouter`.

#[cfg(test)]
mod entry;
mod fallback;
mod file;
mod key;
#[cfg(test)]
mod memory;
mod redis_store;
mod router;
mod stats;
mod store;


// Re-export public types
#[cfg(test)]
pub use entry::CacheEntry;
pub use fallback::FallbackStore;
pub use file::FileStore;
pub use key::RepoKey;
#[cfg(test)]
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use router::{Backend, CacheRouter};
pub use stats::CacheStats;
pub use store::Store;

// == Public Constants ==
/// Maximum allowed owner or repository name length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
