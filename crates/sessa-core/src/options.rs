//! Cookie options carried by every session

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attributes of the session cookie and the record's lifetime.
///
/// `max_age` doubles as the TTL of the persisted record: a session
/// saved with `max_age <= 0` is deleted from the backend instead of
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Cookie `Path` attribute
    pub path: String,

    /// Cookie `Domain` attribute (host-only cookie when `None`)
    pub domain: Option<String>,

    /// Lifetime in seconds; non-positive values delete the session
    pub max_age: i64,

    /// Cookie `Secure` attribute
    pub secure: bool,

    /// Cookie `HttpOnly` attribute
    pub http_only: bool,

    /// Cookie `SameSite` attribute
    pub same_site: Option<SameSite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
            max_age: 86_400 * 30,
            secure: false,
            http_only: true,
            same_site: None,
        }
    }
}

impl SessionOptions {
    /// TTL to store the record with.
    ///
    /// # Errors
    /// - `Error::Config` if `max_age` is non-positive; callers are
    ///   expected to delete instead of store in that case.
    pub fn ttl_seconds(&self) -> Result<u64> {
        u64::try_from(self.max_age)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                Error::Config(format!(
                    "cannot store a session with non-positive max_age {}",
                    self.max_age
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = SessionOptions::default();
        assert_eq!(options.path, "/");
        assert_eq!(options.max_age, 86_400 * 30);
        assert!(options.http_only);
        assert!(!options.secure);
        assert_eq!(options.domain, None);
    }

    #[test]
    fn ttl_requires_positive_max_age() {
        let mut options = SessionOptions::default();
        options.max_age = 99;
        assert_eq!(options.ttl_seconds().unwrap(), 99);

        options.max_age = 0;
        assert!(options.ttl_seconds().is_err());

        options.max_age = -1;
        assert!(options.ttl_seconds().is_err());
    }
}
