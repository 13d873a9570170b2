//! Core types and traits for cookie-backed session persistence
//!
//! This crate provides the pieces every session backend shares:
//! - The [`Session`] value map and its cookie [`SessionOptions`]
//! - The [`SessionStore`] trait with the request-level lifecycle
//!   (`new_session` / `save_session`) built in
//! - Pluggable [`Serializer`] implementations (JSON and MessagePack)
//! - Cookie parsing/issuance helpers and random session-id generation
//!
//! Backends only implement the three storage operations (load, store,
//! destroy); everything cookie-shaped lives here.

pub mod cookies;
pub mod error;
pub mod keygen;
pub mod options;
pub mod registry;
pub mod serializer;
pub mod session;
pub mod store;

pub use error::{Error, Result};
pub use keygen::KeyGenFn;
pub use options::{SameSite, SessionOptions};
pub use registry::SessionRegistry;
pub use serializer::{JsonSerializer, MessagePackSerializer, Serializer};
pub use session::Session;
pub use store::{DEFAULT_KEY_PREFIX, SessionStore};
