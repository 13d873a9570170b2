//! In-memory session backend
//!
//! Process-local `SessionStore` implementation for development and
//! tests. Records expire lazily: an entry past its deadline is treated
//! as a miss and dropped on the access that finds it.
//!
//! # Example
//! ```no_run
//! # use sessa_memory::MemoryStore;
//! # use sessa_core::SessionRegistry;
//! # async fn example() -> sessa_core::Result<()> {
//! let store = MemoryStore::new().with_key_prefix("dev:");
//! let mut registry = SessionRegistry::new();
//! let headers = http::HeaderMap::new();
//! let _session = registry.get(&store, &headers, "sid").await?;
//! # Ok(())
//! # }
//! ```

mod memory_session_store;

pub use memory_session_store::MemoryStore;
