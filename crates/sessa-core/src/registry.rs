//! Per-request session registry

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use http::HeaderMap;

use crate::error::Result;
use crate::session::Session;
use crate::store::SessionStore;

/// Caches sessions for the duration of one request so that every
/// handler asking for the same cookie name sees the same session.
///
/// Callers create one registry per request, `get` sessions through it,
/// and `save_all` when building the response.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `name`, loading it through `store` on
    /// first access and returning the cached instance afterwards.
    pub async fn get<S>(
        &mut self,
        store: &S,
        headers: &HeaderMap,
        name: &str,
    ) -> Result<&mut Session>
    where
        S: SessionStore + ?Sized,
    {
        match self.sessions.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let session = store.new_session(headers, name).await?;
                Ok(slot.insert(session))
            }
        }
    }

    /// Save every registered session, appending its cookie to
    /// `headers`.
    pub async fn save_all<S>(&mut self, store: &S, headers: &mut HeaderMap) -> Result<()>
    where
        S: SessionStore + ?Sized,
    {
        for session in self.sessions.values_mut() {
            store.save_session(headers, session).await?;
        }
        Ok(())
    }
}
