//! Valkey/Redis session backend
//!
//! This crate implements the `SessionStore` trait over a Valkey or
//! Redis instance. Records live under `key_prefix + id` with a native
//! TTL equal to the session's `max_age`; expiry is entirely the
//! server's job. Each operation is a single awaited command —
//! reconnects and multiplexing are the connection manager's concern,
//! retries are nobody's.
//!
//! # Example
//! ```no_run
//! # use sessa_valkey::ValkeyStore;
//! # use sessa_core::SessionStore;
//! # async fn example() -> sessa_core::Result<()> {
//! let store = ValkeyStore::connect("redis://127.0.0.1:6379")
//!     .await?
//!     .with_key_prefix("myapp:");
//! let _session = store.new_session(&http::HeaderMap::new(), "sid").await?;
//! # Ok(())
//! # }
//! ```

mod valkey_session_store;

pub use valkey_session_store::ValkeyStore;
