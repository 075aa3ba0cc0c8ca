use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::AppError;
use crate::extract::parse_id;
use crate::state::AppState;

/// Session token of a registered client, read from the session cookie.
///
/// Rejects with 401 when the cookie is missing, is not a UUID, or no user was
/// ever registered under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for SessionId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = cookie_token(&jar, &state.config.session)
            .ok_or_else(|| AppError::Unauthorized("missing or malformed session cookie".into()))?;

        if !state.storage.session_exists(token).await? {
            warn!("request with unknown session cookie");
            return Err(AppError::Unauthorized("unknown session".into()));
        }
        Ok(SessionId(token))
    }
}

/// Token carried by the request, if any. Only the canonical hyphenated form
/// counts, the same one path ids must use.
pub fn cookie_token(jar: &CookieJar, cfg: &SessionConfig) -> Option<Uuid> {
    jar.get(&cfg.cookie_name)
        .and_then(|c| parse_id(c.value()).ok())
}

/// Reuses the request's token or mints one; the returned jar carries the
/// `Set-Cookie` only in the minted case.
pub fn resolve_or_mint(jar: CookieJar, cfg: &SessionConfig) -> (Uuid, CookieJar) {
    match cookie_token(&jar, cfg) {
        Some(token) => (token, jar),
        None => {
            let token = Uuid::new_v4();
            (token, jar.add(session_cookie(cfg, token)))
        }
    }
}

pub fn session_cookie(cfg: &SessionConfig, token: Uuid) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), token.to_string()))
        .path("/")
        .max_age(time::Duration::days(cfg.ttl_days))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.secure)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};
    use axum::response::IntoResponse;

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    fn set_cookies(jar: CookieJar) -> Vec<String> {
        jar.into_response()
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn cookie_carries_seven_day_max_age() {
        let cfg = SessionConfig::default();
        let token = Uuid::new_v4();
        let c = session_cookie(&cfg, token);
        assert_eq!(c.name(), "sessionId");
        assert_eq!(c.value(), token.to_string());
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.max_age(), Some(time::Duration::days(7)));
        assert_eq!(c.http_only(), Some(true));
    }

    #[test]
    fn existing_token_is_reused_without_set_cookie() {
        let cfg = SessionConfig::default();
        let token = Uuid::new_v4();
        let (resolved, jar) = resolve_or_mint(jar_with(&format!("sessionId={token}")), &cfg);
        assert_eq!(resolved, token);
        assert!(set_cookies(jar).is_empty());
    }

    #[test]
    fn malformed_or_missing_token_mints_a_new_one() {
        let cfg = SessionConfig::default();
        for raw in ["sessionId=not-a-uuid", "other=1"] {
            let (minted, jar) = resolve_or_mint(jar_with(raw), &cfg);
            let added = set_cookies(jar);
            assert_eq!(added.len(), 1);
            assert!(added[0].starts_with(&format!("sessionId={minted}")));
        }
    }

    #[test]
    fn non_canonical_uuid_cookie_is_replaced() {
        let cfg = SessionConfig::default();
        let token = Uuid::new_v4();
        for raw in [
            token.simple().to_string(),
            token.braced().to_string(),
            token.urn().to_string(),
        ] {
            let jar = jar_with(&format!("sessionId={raw}"));
            assert_eq!(cookie_token(&jar, &cfg), None, "{raw} should not be accepted");

            let (minted, jar) = resolve_or_mint(jar, &cfg);
            assert_ne!(minted, token);
            assert_eq!(set_cookies(jar).len(), 1);
        }
    }
}
