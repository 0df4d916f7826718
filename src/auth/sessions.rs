use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use std::{
    collections::HashMap,
    convert::Infallible,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use super::Session;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "folio_session";
/// Session lifetime (24 hours, sliding).
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

struct Entry {
    session: Session,
    touched: Instant,
    /// One-shot notice shown on the next page render.
    flash: Option<String>,
}

/// In-memory sessions keyed by cookie token. Lost on restart.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SessionRegistry {
    /// Look up a live session and slide its expiry. Expired entries are
    /// dropped on the way.
    pub async fn get(&self, token: &str) -> Option<Session> {
        // Single write lock for the check and the slide, so a concurrent
        // logout cannot land in between.
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(token)?;
        if entry.touched.elapsed() < SESSION_TTL {
            entry.touched = Instant::now();
            Some(entry.session.clone())
        } else {
            entries.remove(token);
            None
        }
    }

    /// Store `session` under `token`. Expired entries are swept first.
    pub async fn put(&self, token: &str, session: Session) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.touched.elapsed() < SESSION_TTL);
        let entry = entries.entry(token.to_string()).or_insert_with(|| Entry {
            session: Session::default(),
            touched: Instant::now(),
            flash: None,
        });
        entry.session = session;
        entry.touched = Instant::now();
    }

    pub async fn set_flash(&self, token: &str, message: impl Into<String>) {
        if let Some(entry) = self.entries.write().await.get_mut(token) {
            entry.flash = Some(message.into());
        }
    }

    pub async fn take_flash(&self, token: &str) -> Option<String> {
        self.entries.write().await.get_mut(token)?.flash.take()
    }

    pub async fn remove(&self, token: &str) {
        self.entries.write().await.remove(token);
    }

    /// Number of stored sessions, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn new_token() -> String {
        use rand::RngCore;
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// The visitor's session, or a fresh non-admin one if they have none.
pub struct CurrentSession {
    pub token: Option<String>,
    pub session: Session,
}

impl CurrentSession {
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    SessionRegistry: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = SessionRegistry::from_ref(state);
        if let Some(token) = extract_cookie(&parts.headers, SESSION_COOKIE) {
            if let Some(session) = registry.get(&token).await {
                return Ok(Self {
                    token: Some(token),
                    session,
                });
            }
        }
        Ok(Self {
            token: None,
            session: Session::default(),
        })
    }
}

pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(str::trim)
        .find_map(|part| part.strip_prefix(&prefix))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn unknown_token_has_no_session() {
        let registry = SessionRegistry::default();
        assert!(registry.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn flash_is_taken_once() {
        let registry = SessionRegistry::default();
        registry.put("t", Session::default()).await;
        registry.set_flash("t", "hello").await;

        assert_eq!(registry.take_flash("t").await.as_deref(), Some("hello"));
        assert_eq!(registry.take_flash("t").await, None);
    }

    #[tokio::test]
    async fn put_replaces_existing_entry() {
        let registry = SessionRegistry::default();
        registry.put("t", Session::default()).await;
        registry.put("t", Session::default()).await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let registry = SessionRegistry::default();
        registry.put("t", Session::default()).await;
        registry.remove("t").await;
        assert!(registry.get("t").await.is_none());
    }

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; folio_session=abc123; g_csrf_token=x"),
        );
        assert_eq!(
            extract_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc123")
        );
        assert_eq!(extract_cookie(&headers, "g_csrf_token").as_deref(), Some("x"));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn tokens_are_random_hex() {
        let a = SessionRegistry::new_token();
        let b = SessionRegistry::new_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
