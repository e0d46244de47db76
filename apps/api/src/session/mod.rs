//! Per-session storage of the candidate's submission.
//!
//! Each browser gets an opaque id in a cookie; its context is isolated from
//! every other session and dropped when the session ends or idles past the TTL.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::candidate::models::CandidateSubmission;

pub const SESSION_COOKIE: &str = "talentscout_session";

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub candidate: Option<CandidateSubmission>,
    pub last_seen: DateTime<Utc>,
}

impl SessionContext {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            candidate: None,
            last_seen: now,
        }
    }
}

/// Outcome of resolving a request to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: Uuid,
    /// True when the id was just issued and the cookie must be set.
    pub is_new: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the live session named by the request cookie, or opens a new one.
    pub async fn resolve(&self, headers: &HeaderMap) -> SessionHandle {
        self.resolve_at(session_id_from_headers(headers), Utc::now())
            .await
    }

    pub(crate) async fn resolve_at(&self, requested: Option<Uuid>, now: DateTime<Utc>) -> SessionHandle {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, ctx| now - ctx.last_seen <= self.ttl);

        if let Some(id) = requested {
            if let Some(ctx) = sessions.get_mut(&id) {
                ctx.last_seen = now;
                return SessionHandle { id, is_new: false };
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(id, SessionContext::new(now));
        debug!("Opened session {id} ({} live)", sessions.len());
        SessionHandle { id, is_new: true }
    }

    /// Records the submission for this session, replacing any earlier one.
    pub async fn store_candidate(&self, id: Uuid, candidate: CandidateSubmission) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let ctx = sessions
            .entry(id)
            .or_insert_with(|| SessionContext::new(now));
        ctx.candidate = Some(candidate);
        ctx.last_seen = now;
    }

    /// Reads this session's submission, counting the read as activity.
    /// Expired sessions are dropped first and never answer.
    pub async fn candidate(&self, id: Uuid) -> Option<CandidateSubmission> {
        self.candidate_at(id, Utc::now()).await
    }

    pub(crate) async fn candidate_at(&self, id: Uuid, now: DateTime<Utc>) -> Option<CandidateSubmission> {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, ctx| now - ctx.last_seen <= self.ttl);

        let ctx = sessions.get_mut(&id)?;
        ctx.last_seen = now;
        ctx.candidate.clone()
    }

    /// Discards the session. Returns whether it existed.
    pub async fn end(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    pub(crate) async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, ctx| now - ctx.last_seen <= self.ttl);
        before - sessions.len()
    }

    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Extracts the session id from the `Cookie` header, ignoring malformed values.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::models::Language;
    use axum::http::HeaderValue;

    fn submission(name: &str) -> CandidateSubmission {
        CandidateSubmission {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            years_of_experience: 3,
            desired_position: String::new(),
            location: String::new(),
            tech_stack: "Rust".to_string(),
            language: Language::English,
        }
    }

    #[test]
    fn test_cookie_parsing_finds_session_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_cookie_parsing_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("talentscout_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_a_fresh_session() {
        let store = SessionStore::new(Duration::minutes(30));
        let stale = Uuid::new_v4();
        let handle = store.resolve_at(Some(stale), Utc::now()).await;
        assert!(handle.is_new);
        assert_ne!(handle.id, stale);

        let again = store.resolve_at(Some(handle.id), Utc::now()).await;
        assert_eq!(again, SessionHandle { id: handle.id, is_new: false });
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::minutes(30));
        let a = store.resolve_at(None, Utc::now()).await.id;
        let b = store.resolve_at(None, Utc::now()).await.id;

        store.store_candidate(a, submission("Ada")).await;
        assert_eq!(store.candidate(a).await.map(|c| c.name), Some("Ada".to_string()));
        assert!(store.candidate(b).await.is_none());
    }

    #[tokio::test]
    async fn test_ended_session_forgets_candidate() {
        let store = SessionStore::new(Duration::minutes(30));
        let id = store.resolve_at(None, Utc::now()).await.id;
        store.store_candidate(id, submission("Grace")).await;

        assert!(store.end(id).await);
        assert!(store.candidate(id).await.is_none());
        assert!(!store.end(id).await);
    }

    #[tokio::test]
    async fn test_expired_session_does_not_return_candidate() {
        let store = SessionStore::new(Duration::minutes(30));
        let now = Utc::now();
        let id = store.resolve_at(None, now - Duration::hours(5)).await.id;
        {
            let mut sessions = store.sessions.write().await;
            let ctx = sessions.get_mut(&id).unwrap();
            ctx.candidate = Some(submission("Ada"));
        }

        assert!(store.candidate_at(id, now).await.is_none());
        assert_eq!(store.live_count().await, 0);
    }

    #[tokio::test]
    async fn test_reading_candidate_keeps_session_alive() {
        let store = SessionStore::new(Duration::minutes(30));
        let start = Utc::now();
        let id = store.resolve_at(None, start).await.id;
        store.store_candidate(id, submission("Ada")).await;
        {
            // Pin the write time so the reads below are measured from `start`.
            let mut sessions = store.sessions.write().await;
            sessions.get_mut(&id).unwrap().last_seen = start;
        }

        for minutes in [20, 40, 60] {
            let read = store.candidate_at(id, start + Duration::minutes(minutes)).await;
            assert_eq!(read.map(|c| c.name), Some("Ada".to_string()), "at +{minutes}m");
        }
        assert!(store
            .candidate_at(id, start + Duration::minutes(95))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::new(Duration::minutes(30));
        let start = Utc::now();
        let old = store.resolve_at(None, start).await.id;
        let fresh = store.resolve_at(None, start + Duration::minutes(20)).await.id;

        let purged = store.purge_expired_at(start + Duration::minutes(45)).await;
        assert_eq!(purged, 1);
        assert_eq!(store.live_count().await, 1);

        let handle = store.resolve_at(Some(old), start + Duration::minutes(45)).await;
        assert!(handle.is_new);
        let handle = store.resolve_at(Some(fresh), start + Duration::minutes(45)).await;
        assert!(!handle.is_new);
    }
}
