use axum::http::header;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::config::CookieConfig;

/// Attributes of the cookie that carries the access token.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_seconds: i64,
}

impl CookieSettings {
    pub fn new(config: &CookieConfig, max_age_seconds: i64) -> Self {
        Self {
            name: config.name.clone(),
            secure: config.secure,
            max_age_seconds,
        }
    }

    /// HttpOnly, SameSite=Strict cookie holding `token` for the token lifetime.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::seconds(self.max_age_seconds))
            .build()
    }

    /// Expired, empty cookie that makes the client drop the stored token.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.name.clone(), ""))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .build();
        cookie.make_removal();
        cookie
    }

    /// Token from the session cookie, falling back to `Authorization: Bearer`.
    pub fn extract_token(&self, jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
        if let Some(cookie) = jar.get(&self.name) {
            if !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }

        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn settings() -> CookieSettings {
        CookieSettings {
            name: "auth_token".to_string(),
            secure: true,
            max_age_seconds: 86_400,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let rendered = settings().session_cookie("abc.def.ghi".to_string()).to_string();

        assert!(rendered.starts_with("auth_token=abc.def.ghi"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=86400"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = settings().removal_cookie().to_string();

        assert!(rendered.starts_with("auth_token=;"));
        assert!(rendered.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(
            settings().extract_token(&jar, &headers),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(
            settings().extract_token(&jar, &headers),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(settings().extract_token(&jar, &headers), None);
    }
}
