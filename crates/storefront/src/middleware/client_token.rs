//! Extractor for the caller's own API token.
//!
//! Logged-in browsers keep their API token either in an `Authorization`
//! header (fetch requests from the page builder) or in the `auth_token`
//! cookie (plain navigations). The token is forwarded to the page API so
//! private pages resolve for the people allowed to see them.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use secrecy::SecretString;

/// Cookie that carries the client's API token.
pub const TOKEN_COOKIE: &str = "auth_token";

/// The caller's bearer token, if it sent one.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(ClientToken(token): ClientToken) -> impl IntoResponse {
///     let page = client.fetch(&slug, token.as_ref()).await;
///     ...
/// }
/// ```
pub struct ClientToken(pub Option<SecretString>);

impl<S> FromRequestParts<S> for ClientToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_headers(&parts.headers)))
    }
}

fn token_from_headers(headers: &HeaderMap) -> Option<SecretString> {
    bearer_header(headers)
        .or_else(|| token_cookie(headers))
        .map(SecretString::from)
}

fn bearer_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

fn token_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use secrecy::ExposeSecret;

    use super::*;

    fn token(headers: &HeaderMap) -> Option<String> {
        token_from_headers(headers).map(|t| t.expose_secret().to_string())
    }

    #[test]
    fn test_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_non_bearer_scheme_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(token(&headers), None);
    }

    #[test]
    fn test_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=tok-9; lang=en"),
        );
        assert_eq!(token(&headers).as_deref(), Some("tok-9"));
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("auth_token=from-cookie"));
        assert_eq!(token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("auth_token="));
        assert_eq!(token(&headers), None);
    }
}
