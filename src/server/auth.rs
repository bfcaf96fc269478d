//! Admin session authentication.
//!
//! The admin password is only ever stored as an Argon2 PHC string. A
//! successful login yields a stateless token of the form
//! `{expires_unix}.{hex(HMAC-SHA256(secret, "admin:{expires_unix}"))}`,
//! accepted from the `gamelog_session` cookie or an `Authorization: Bearer`
//! header.

use std::convert::Infallible;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use super::error::ApiError;
use super::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "gamelog_session";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Admin login is not configured")]
    NotConfigured,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Session expired")]
    Expired,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password into a PHC string for the `admin_password_hash` setting.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Issued session token.
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Password verification and token signing.
#[derive(Clone)]
pub struct Authenticator {
    password_hash: Option<String>,
    secret: Vec<u8>,
    ttl: Duration,
    secure_cookie: bool,
}

impl Authenticator {
    pub fn new(
        password_hash: Option<String>,
        secret: impl Into<Vec<u8>>,
        ttl_hours: u32,
        secure_cookie: bool,
    ) -> Self {
        Self {
            password_hash: password_hash.filter(|h| !h.trim().is_empty()),
            secret: secret.into(),
            ttl: Duration::hours(i64::from(ttl_hours)),
            secure_cookie,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Check the password and issue a session token.
    pub fn login(&self, password: &str, now: DateTime<Utc>) -> Result<SessionToken, AuthError> {
        let hash = self.password_hash.as_deref().ok_or(AuthError::NotConfigured)?;
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidPassword)?;

        self.issue(now)
    }

    pub fn issue(&self, now: DateTime<Utc>) -> Result<SessionToken, AuthError> {
        let expires_at = now + self.ttl;
        let expires = expires_at.timestamp();
        let signature = hex::encode(self.mac(expires)?.finalize().into_bytes());

        Ok(SessionToken {
            token: format!("{}.{}", expires, signature),
            expires_at,
        })
    }

    /// Verify a token's signature (in constant time) and expiry.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let (expires, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let expires: i64 = expires.parse().map_err(|_| AuthError::InvalidToken)?;
        let signature = hex::decode(signature).map_err(|_| AuthError::InvalidToken)?;

        self.mac(expires)?
            .verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken)?;

        if expires <= now.timestamp() {
            return Err(AuthError::Expired);
        }
        Ok(())
    }

    fn mac(&self, expires: i64) -> Result<HmacSha256, AuthError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|e| AuthError::Hash(e.to_string()))?;
        mac.update(format!("admin:{}", expires).as_bytes());
        Ok(mac)
    }

    /// `Set-Cookie` value carrying a session token.
    pub fn session_cookie(&self, session: &SessionToken) -> String {
        let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            SESSION_COOKIE,
            session.token,
            max_age,
            if self.secure_cookie { "; Secure" } else { "" }
        )
    }

    /// `Set-Cookie` value that clears the session.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            SESSION_COOKIE,
            if self.secure_cookie { "; Secure" } else { "" }
        )
    }
}

/// Pull a session token from the bearer header or the session cookie.
pub fn token_from_parts(parts: &Parts) -> Option<&str> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    if bearer.is_some() {
        return bearer;
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// Extractor that only succeeds for requests carrying a valid admin session.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AuthError::MissingToken)?;
        state.auth.verify(token, Utc::now())?;
        Ok(AdminSession)
    }
}

/// Whether the request carries a valid admin session, for page rendering.
pub fn is_admin(parts: &Parts, auth: &Authenticator) -> bool {
    token_from_parts(parts).is_some_and(|token| auth.verify(token, Utc::now()).is_ok())
}

/// Page visitor; never rejects, only records whether the admin is looking.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub is_admin: bool,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Viewer {
            is_admin: is_admin(parts, &state.auth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn authenticator(password: Option<&str>) -> Authenticator {
        let hash = password.map(|p| hash_password(p).unwrap());
        Authenticator::new(hash, "test-secret", 12, false)
    }

    #[test]
    fn test_login_round_trip() {
        let auth = authenticator(Some("hunter2"));
        let now = Utc::now();

        let session = auth.login("hunter2", now).unwrap();
        assert_eq!(session.expires_at, now + Duration::hours(12));
        assert!(auth.verify(&session.token, now).is_ok());

        assert!(matches!(
            auth.login("wrong", now),
            Err(AuthError::InvalidPassword)
        ));
    }

    #[test]
    fn test_login_without_hash_rejected() {
        let auth = authenticator(None);
        assert!(!auth.is_configured());
        assert!(matches!(
            auth.login("anything", Utc::now()),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = authenticator(None);
        let issued_at = Utc::now() - Duration::hours(13);
        let session = auth.issue(issued_at).unwrap();
        assert!(matches!(
            auth.verify(&session.token, Utc::now()),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = authenticator(None);
        let now = Utc::now();
        let session = auth.issue(now).unwrap();
        let (expires, signature) = session.token.split_once('.').unwrap();

        // Extending the expiry invalidates the signature.
        let forged = format!("{}.{}", expires.parse::<i64>().unwrap() + 3600, signature);
        assert!(matches!(
            auth.verify(&forged, now),
            Err(AuthError::InvalidToken)
        ));

        // A different secret does not accept the token.
        let other = Authenticator::new(None, "other-secret", 12, false);
        assert!(other.verify(&session.token, now).is_err());

        for junk in ["", "abc", "123.zz", "notanumber.00"] {
            assert!(auth.verify(junk, now).is_err(), "{junk}");
        }
    }

    #[test]
    fn test_token_sources() {
        let (parts, _) = Request::builder()
            .header(COOKIE, "theme=dark; gamelog_session=abc.def")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(token_from_parts(&parts), Some("abc.def"));

        let (parts, _) = Request::builder()
            .header(AUTHORIZATION, "Bearer tok.en")
            .header(COOKIE, "gamelog_session=cookie.value")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(token_from_parts(&parts), Some("tok.en"));

        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(token_from_parts(&parts), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let auth = Authenticator::new(None, "s", 1, true);
        let session = auth.issue(Utc::now()).unwrap();
        let cookie = auth.session_cookie(&session);
        assert!(cookie.starts_with("gamelog_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));
        assert!(auth.clear_cookie().contains("Max-Age=0"));
    }
}
