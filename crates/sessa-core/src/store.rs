//! The `SessionStore` trait and the request-level session lifecycle

use async_trait::async_trait;
use http::HeaderMap;

use crate::cookies;
use crate::error::{Error, Result};
use crate::keygen;
use crate::options::SessionOptions;
use crate::session::Session;

/// Default prefix for backend record keys.
pub const DEFAULT_KEY_PREFIX: &str = "session:";

/// Session persistence backend.
///
/// Implementations:
/// - `MemoryStore` (sessa-memory): in-process map with lazy TTL expiry
/// - `ValkeyStore` (sessa-valkey): Valkey/Redis with native TTL
///
/// Backends implement the three storage operations; the cookie-driven
/// lifecycle (`new_session` / `save_session`) is provided on top and
/// behaves the same across backends.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Default options applied to sessions created by this store.
    fn session_options(&self) -> &SessionOptions;

    /// Generate an id for a session about to be saved for the first
    /// time. The default is 64 random bytes, base64-encoded.
    fn generate_id(&self) -> Result<String> {
        keygen::random_id()
    }

    /// Load persisted values into `session` (looked up by its id).
    ///
    /// # Errors
    /// - `Error::SessionNotFound` if no record exists for the id
    /// - `Error::Serialization` if the record does not decode
    /// - `Error::Backend` for transport failures, unmodified
    async fn load_session(&self, session: &mut Session) -> Result<()>;

    /// Persist the session with a TTL of `session.options.max_age`.
    ///
    /// # Errors
    /// - `Error::Config` if `max_age` is non-positive
    /// - `Error::Serialization` / `Error::Backend` otherwise
    async fn store_session(&self, session: &Session) -> Result<()>;

    /// Remove the session record from the backend.
    async fn destroy_session(&self, session: &Session) -> Result<()>;

    /// Create a session for the cookie `name`, resuming state if the
    /// request carries a matching cookie.
    ///
    /// A request without the cookie yields a fresh session with
    /// `is_new = true` and this store's default options. A cookie
    /// whose record has expired out of the backend also yields a
    /// fresh session; any other load failure propagates.
    async fn new_session(&self, headers: &HeaderMap, name: &str) -> Result<Session> {
        let mut session = Session::new(name, self.session_options().clone());

        let Some(id) = cookies::session_id(headers, name) else {
            return Ok(session);
        };
        session.id = id;

        match self.load_session(&mut session).await {
            Ok(()) => {
                session.is_new = false;
                Ok(session)
            }
            Err(Error::SessionNotFound(_)) => {
                tracing::debug!(name, "session cookie refers to expired state, starting fresh");
                Ok(session)
            }
            Err(e) => Err(e),
        }
    }

    /// Write the session through to the backend and append the
    /// matching `Set-Cookie` header.
    ///
    /// A session whose `max_age` is non-positive is destroyed instead
    /// and a removal cookie is emitted, so the record never outlives
    /// the cookie.
    async fn save_session(&self, headers: &mut HeaderMap, session: &mut Session) -> Result<()> {
        if session.options.max_age <= 0 {
            if !session.id.is_empty() {
                self.destroy_session(session).await?;
            }
            return cookies::append_removal_cookie(headers, session.name(), &session.options);
        }

        if session.id.is_empty() {
            session.id = self.generate_id()?;
        }

        self.store_session(session).await?;
        cookies::append_session_cookie(headers, session.name(), &session.id, &session.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::{JsonSerializer, Serializer};
    use cookie::Cookie;
    use http::HeaderValue;
    use http::header::{COOKIE, SET_COOKIE};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal backend over a plain map, enough to exercise the
    /// provided lifecycle methods.
    struct MapStore {
        options: SessionOptions,
        records: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MapStore {
        fn new() -> Self {
            Self {
                options: SessionOptions::default(),
                records: Mutex::new(HashMap::new()),
            }
        }

        fn with_options(options: SessionOptions) -> Self {
            Self {
                options,
                records: Mutex::new(HashMap::new()),
            }
        }

        fn contains(&self, id: &str) -> bool {
            self.records.lock().unwrap().contains_key(id)
        }
    }

    #[async_trait]
    impl SessionStore for MapStore {
        fn session_options(&self) -> &SessionOptions {
            &self.options
        }

        async fn load_session(&self, session: &mut Session) -> Result<()> {
            let payload = self
                .records
                .lock()
                .unwrap()
                .get(&session.id)
                .cloned()
                .ok_or_else(|| Error::SessionNotFound(session.id.clone()))?;
            JsonSerializer.deserialize(&payload, session)
        }

        async fn store_session(&self, session: &Session) -> Result<()> {
            session.options.ttl_seconds()?;
            let payload = JsonSerializer.serialize(session)?;
            self.records
                .lock()
                .unwrap()
                .insert(session.id.clone(), payload);
            Ok(())
        }

        async fn destroy_session(&self, session: &Session) -> Result<()> {
            self.records.lock().unwrap().remove(&session.id);
            Ok(())
        }
    }

    fn request_with_cookie(name: &str, id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("{}={}", name, id);
        headers.append(COOKIE, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[tokio::test]
    async fn new_session_without_cookie_is_new() {
        let store = MapStore::new();
        let session = store.new_session(&HeaderMap::new(), "sid").await.unwrap();

        assert!(session.is_new);
        assert!(session.id.is_empty());
        assert_eq!(session.options, SessionOptions::default());
    }

    #[tokio::test]
    async fn custom_store_options_propagate_to_new_sessions() {
        let options = SessionOptions {
            path: "/path".to_string(),
            max_age: 99_999,
            ..SessionOptions::default()
        };
        let store = MapStore::with_options(options.clone());

        let session = store.new_session(&HeaderMap::new(), "sid").await.unwrap();
        assert_eq!(session.options.path, options.path);
        assert_eq!(session.options.max_age, options.max_age);
    }

    #[tokio::test]
    async fn save_assigns_id_persists_and_sets_cookie() {
        let store = MapStore::new();
        let mut session = store.new_session(&HeaderMap::new(), "sid").await.unwrap();
        session.insert("key", "value").unwrap();

        let mut response = HeaderMap::new();
        store.save_session(&mut response, &mut session).await.unwrap();

        assert!(!session.id.is_empty());
        assert!(store.contains(&session.id));

        let raw = response.get(SET_COOKIE).unwrap().to_str().unwrap();
        let cookie = Cookie::parse(raw).unwrap();
        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), session.id);
    }

    #[tokio::test]
    async fn saved_session_resumes_from_cookie() {
        let store = MapStore::new();
        let mut session = store.new_session(&HeaderMap::new(), "sid").await.unwrap();
        session.insert("user", "alice").unwrap();

        let mut response = HeaderMap::new();
        store.save_session(&mut response, &mut session).await.unwrap();

        let request = request_with_cookie("sid", &session.id);
        let resumed = store.new_session(&request, "sid").await.unwrap();

        assert!(!resumed.is_new);
        assert_eq!(resumed.id, session.id);
        assert_eq!(resumed.get::<String>("user"), Some("alice".to_string()));
    }

    #[tokio::test]
    async fn negative_max_age_destroys_record_and_removes_cookie() {
        let store = MapStore::new();
        let mut session = store.new_session(&HeaderMap::new(), "sid").await.unwrap();
        session.insert("key", "value").unwrap();

        let mut response = HeaderMap::new();
        store.save_session(&mut response, &mut session).await.unwrap();
        assert!(store.contains(&session.id));

        session.options.max_age = -1;
        let mut response = HeaderMap::new();
        store.save_session(&mut response, &mut session).await.unwrap();

        assert!(!store.contains(&session.id));

        let raw = response.get(SET_COOKIE).unwrap().to_str().unwrap();
        let cookie = Cookie::parse(raw).unwrap();
        assert_eq!(cookie.value(), "");
    }

    #[tokio::test]
    async fn expired_cookie_yields_fresh_session() {
        let store = MapStore::new();
        let request = request_with_cookie("sid", "gone");

        let session = store.new_session(&request, "sid").await.unwrap();
        assert!(session.is_new);
        assert!(session.values.is_empty());
    }
}
