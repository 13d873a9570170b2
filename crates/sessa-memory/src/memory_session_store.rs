//! MemoryStore - SessionStore over a process-local map

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use sessa_core::{
    DEFAULT_KEY_PREFIX, Error, KeyGenFn, MessagePackSerializer, Result, Serializer, Session,
    SessionOptions, SessionStore,
};

struct StoredRecord {
    payload: Vec<u8>,
    expires_at: Instant,
}

/// In-memory session store with lazy TTL expiry.
#[derive(Clone)]
pub struct MemoryStore {
    options: SessionOptions,
    key_prefix: String,
    key_gen: Option<KeyGenFn>,
    serializer: Arc<dyn Serializer>,
    records: Arc<RwLock<HashMap<String, StoredRecord>>>,
}

impl MemoryStore {
    /// Create a store with default options, the `session:` key prefix
    /// and the MessagePack serializer.
    pub fn new() -> Self {
        Self {
            options: SessionOptions::default(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            key_gen: None,
            serializer: Arc::new(MessagePackSerializer),
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set the default options applied to new sessions.
    pub fn with_session_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the record key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Override session-id generation.
    pub fn with_key_gen(mut self, key_gen: KeyGenFn) -> Self {
        self.key_gen = Some(key_gen);
        self
    }

    /// Swap the serializer.
    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    /// Number of live records (expired entries excluded).
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.records
            .read()
            .await
            .values()
            .filter(|record| record.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn storage_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    fn session_options(&self) -> &SessionOptions {
        &self.options
    }

    fn generate_id(&self) -> Result<String> {
        match &self.key_gen {
            Some(key_gen) => key_gen(),
            None => sessa_core::keygen::random_id(),
        }
    }

    async fn load_session(&self, session: &mut Session) -> Result<()> {
        let key = self.storage_key(&session.id);
        let payload = {
            let mut records = self.records.write().await;
            match records.get(&key) {
                Some(record) if record.expires_at <= Instant::now() => {
                    records.remove(&key);
                    tracing::warn!(session_id = %session.id, "dropping expired session record");
                    None
                }
                Some(record) => Some(record.payload.clone()),
                None => None,
            }
        };

        let Some(payload) = payload else {
            return Err(Error::SessionNotFound(session.id.clone()));
        };
        tracing::debug!(session_id = %session.id, bytes = payload.len(), "loaded session");
        self.serializer.deserialize(&payload, session)
    }

    async fn store_session(&self, session: &Session) -> Result<()> {
        let ttl = session.options.ttl_seconds()?;
        let payload = self.serializer.serialize(session)?;
        let key = self.storage_key(&session.id);

        self.records.write().await.insert(
            key,
            StoredRecord {
                payload,
                expires_at: Instant::now() + Duration::from_secs(ttl),
            },
        );
        tracing::debug!(session_id = %session.id, ttl, "stored session");
        Ok(())
    }

    async fn destroy_session(&self, session: &Session) -> Result<()> {
        let key = self.storage_key(&session.id);
        self.records.write().await.remove(&key);
        tracing::debug!(session_id = %session.id, "destroyed session");
        Ok(())
    }
}
