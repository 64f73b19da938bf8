//! The `lms_session` cookie.
//!
//! Browsers that log in through the API receive the access token as an
//! HttpOnly cookie so page requests authenticate without script access to
//! the token.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

pub const SESSION_COOKIE: &str = "lms_session";

/// `Set-Cookie` value carrying `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> HeaderValue {
    let secure_attr = if secure { "; Secure" } else { "" };
    let value = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}{secure_attr}"
    );
    // JWTs and the fixed attributes are visible ASCII.
    HeaderValue::from_str(&value).unwrap_or_else(|_| clear_session_cookie(secure))
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(
            "lms_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure",
        )
    } else {
        HeaderValue::from_static("lms_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Read the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; lms_session=abc.def.ghi; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn empty_or_missing_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("lms_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        let value = session_cookie("tok", 900, true);
        let text = value.to_str().unwrap();
        assert!(text.starts_with("lms_session=tok;"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Max-Age=900"));
        assert!(text.ends_with("; Secure"));

        let cleared = clear_session_cookie(false);
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }
}
