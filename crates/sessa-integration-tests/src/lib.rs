//! Shared helpers for the behavioral tests in `tests/`

use cookie::Cookie;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

/// Parse every `Set-Cookie` header in a response header map.
pub fn set_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_owned()).ok())
        .collect()
}

/// Build request headers that echo a response's session cookie back,
/// the way a browser would on the next request.
pub fn follow_up_request(response: &HeaderMap) -> HeaderMap {
    let mut request = HeaderMap::new();
    for cookie in set_cookies(response) {
        let pair = format!("{}={}", cookie.name(), cookie.value());
        if let Ok(value) = HeaderValue::from_str(&pair) {
            request.append(COOKIE, value);
        }
    }
    request
}
