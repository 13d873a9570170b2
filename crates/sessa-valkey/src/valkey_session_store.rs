//! ValkeyStore - SessionStore trait implementation for Valkey/Redis

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use sessa_core::{
    DEFAULT_KEY_PREFIX, Error, KeyGenFn, MessagePackSerializer, Result, Serializer, Session,
    SessionOptions, SessionStore,
};

/// Valkey/Redis-backed session store.
///
/// Holds a cloned multiplexed connection, the default session options,
/// the record key prefix, an optional id-generation override and the
/// serializer. Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct ValkeyStore {
    conn: ConnectionManager,
    options: SessionOptions,
    key_prefix: String,
    key_gen: Option<KeyGenFn>,
    serializer: Arc<dyn Serializer>,
}

impl ValkeyStore {
    /// Connect to the given URL (e.g. `redis://127.0.0.1:6379`) and
    /// verify the server answers a PING.
    ///
    /// # Errors
    /// - `Error::Backend` if the URL is invalid, the connection cannot
    ///   be established, or the PING fails
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| Error::Backend(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        let store = Self::new(conn);
        store.ping().await?;
        Ok(store)
    }

    /// Wrap an existing connection manager. No I/O is performed.
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            options: SessionOptions::default(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            key_gen: None,
            serializer: Arc::new(MessagePackSerializer),
        }
    }

    /// Set the default options applied to new sessions.
    pub fn with_session_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the record key prefix (default `session:`).
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Override session-id generation.
    pub fn with_key_gen(mut self, key_gen: KeyGenFn) -> Self {
        self.key_gen = Some(key_gen);
        self
    }

    /// Swap the serializer (default MessagePack).
    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    /// Liveness check against the server.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;
        Ok(())
    }

    fn storage_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl SessionStore for ValkeyStore {
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
        let mut conn = self.conn.clone();

        let payload: Option<Vec<u8>> = conn
            .get(&key)
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;
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
        let mut conn = self.conn.clone();

        let _: () = conn
            .set_ex(&key, payload, ttl)
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        tracing::debug!(session_id = %session.id, ttl, "stored session");
        Ok(())
    }

    async fn destroy_session(&self, session: &Session) -> Result<()> {
        let key = self.storage_key(&session.id);
        let mut conn = self.conn.clone();

        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        tracing::debug!(session_id = %session.id, "destroyed session");
        Ok(())
    }
}
