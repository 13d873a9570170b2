//! Pluggable encodings for the session value map

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::session::Session;

/// Encode/decode strategy for session state.
///
/// `deserialize` merges decoded entries into the session's existing
/// map rather than replacing it, so values set before a load survive.
pub trait Serializer: Send + Sync {
    fn serialize(&self, session: &Session) -> Result<Vec<u8>>;
    fn deserialize(&self, bytes: &[u8], session: &mut Session) -> Result<()>;
}

/// Textual encoding via JSON.
///
/// Human-readable in the backend, handy when other services read the
/// same keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, session: &Session) -> Result<Vec<u8>> {
        serde_json::to_vec(&session.values).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8], session: &mut Session) -> Result<()> {
        let decoded: HashMap<String, Value> =
            serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        session.values.extend(decoded);
        Ok(())
    }
}

/// Binary encoding via MessagePack; the default.
///
/// Self-describing, so dynamic values round-trip without a schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessagePackSerializer;

impl Serializer for MessagePackSerializer {
    fn serialize(&self, session: &Session) -> Result<Vec<u8>> {
        rmp_serde::to_vec(&session.values).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8], session: &mut Session) -> Result<()> {
        let decoded: HashMap<String, Value> =
            rmp_serde::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        session.values.extend(decoded);
        Ok(())
    }
}
