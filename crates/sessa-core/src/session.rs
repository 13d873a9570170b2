//! The in-memory session value map

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::SessionOptions;

/// Per-request session state keyed by an identifier stored in a cookie.
///
/// The `id` is empty until the first save assigns one. `values` is what
/// gets serialized into the backend; everything else describes the
/// cookie that references it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque backend identifier; empty until the first save
    pub id: String,

    name: String,

    /// String-keyed session state
    pub values: HashMap<String, Value>,

    /// Cookie attributes and record TTL
    pub options: SessionOptions,

    /// True until the session has been loaded from a backend
    pub is_new: bool,
}

impl Session {
    /// Create a fresh session for the given cookie name.
    pub fn new(name: impl Into<String>, options: SessionOptions) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            values: HashMap::new(),
            options,
            is_new: true,
        }
    }

    /// Cookie name this session is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a value, deserialized into `T`.
    ///
    /// Returns `None` when the key is absent or the stored value does
    /// not decode into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Insert a value under `key`, replacing any previous value.
    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.values.insert(key.into(), value);
        Ok(())
    }

    /// Remove a value, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
