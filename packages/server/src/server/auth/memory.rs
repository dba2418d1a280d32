use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{require_session_cookie, SessionStore};
use crate::common::{SessionAttributes, SessionError};

/// Opaque session id stored in the cookie (random UUID)
pub type SessionId = String;

#[derive(Clone, Debug)]
struct StoredSession {
    attributes: SessionAttributes,
    created_at: DateTime<Utc>,
}

/// In-memory, server-side session store
///
/// The cookie only carries a [`SessionId`]. Sessions expire `ttl` after
/// creation; expired entries stay in memory until the host calls
/// [`MemorySessionStore::cleanup_expired`].
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
    ttl: chrono::Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a new session and return its id
    pub async fn create_session(&self, attributes: SessionAttributes) -> SessionId {
        self.create_session_at(attributes, Utc::now()).await
    }

    async fn create_session_at(
        &self,
        attributes: SessionAttributes,
        created_at: DateTime<Utc>,
    ) -> SessionId {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            id.clone(),
            StoredSession {
                attributes,
                created_at,
            },
        );
        id
    }

    /// Get session attributes by id
    pub async fn lookup(&self, id: &str) -> Result<SessionAttributes, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id).ok_or(SessionError::NotFound)?;

        if self.is_expired(session, Utc::now()) {
            return Err(SessionError::Expired);
        }

        Ok(session.attributes.clone())
    }

    /// Delete session (logout)
    pub async fn delete_session(&self, id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();

        sessions.retain(|_, session| !self.is_expired(session, now));

        before - sessions.len()
    }

    fn is_expired(&self, session: &StoredSession, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.created_at) >= self.ttl
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(chrono::Duration::hours(24))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(
        &self,
        headers: &HeaderMap,
        session_name: &str,
    ) -> Result<SessionAttributes, SessionError> {
        let id = require_session_cookie(headers, session_name)?;
        self.lookup(&id).await
    }
}
