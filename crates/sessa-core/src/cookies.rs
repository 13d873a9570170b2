//! Cookie plumbing between `http` header maps and sessions

use cookie::Cookie;
use cookie::time::Duration;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

use crate::error::{Error, Result};
use crate::options::{SameSite, SessionOptions};

/// Extract the session id for `name` from the request `Cookie`
/// headers, if one was sent.
pub fn session_id(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(raw) {
            let Ok(cookie) = cookie else {
                continue;
            };
            if cookie.name() == name {
                return Some(cookie.value().to_owned());
            }
        }
    }
    None
}

/// Append a `Set-Cookie` header carrying the session id.
pub fn append_session_cookie(
    headers: &mut HeaderMap,
    name: &str,
    id: &str,
    options: &SessionOptions,
) -> Result<()> {
    append(headers, build_cookie(name, id, options, options.max_age))
}

/// Append a `Set-Cookie` header that removes the session cookie
/// (empty value, zero max-age).
pub fn append_removal_cookie(
    headers: &mut HeaderMap,
    name: &str,
    options: &SessionOptions,
) -> Result<()> {
    append(headers, build_cookie(name, "", options, 0))
}

fn append(headers: &mut HeaderMap, cookie: Cookie<'static>) -> Result<()> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| Error::Cookie(e.to_string()))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

fn build_cookie(
    name: &str,
    value: &str,
    options: &SessionOptions,
    max_age: i64,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), value.to_owned());
    cookie.set_path(options.path.clone());
    if let Some(domain) = &options.domain {
        cookie.set_domain(domain.clone());
    }
    cookie.set_max_age(Duration::seconds(max_age.max(0)));
    cookie.set_secure(options.secure);
    cookie.set_http_only(options.http_only);
    if let Some(same_site) = options.same_site {
        cookie.set_same_site(match same_site {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        });
    }
    cookie
}
