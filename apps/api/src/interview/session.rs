//! Session store: bounded LRU of interview sessions with a creation-time TTL.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::interview::models::Question;

/// Everything later calls need to correlate with the questions they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub job_position: String,
    /// Self-introduction the questions were generated from.
    #[allow(dead_code)]
    pub source_text: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session with a fresh v4 UUID.
    pub fn new(job_position: &str, source_text: &str, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_position: job_position.to_string(),
            source_text: source_text.to_string(),
            questions,
            created_at: Utc::now(),
        }
    }

    /// First question carrying `question_id`.
    pub fn question(&self, question_id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: Arc<Session>,
    inserted_at: Instant,
}

/// LRU-bounded session store with TTL.
pub struct SessionStore {
    cache: Mutex<LruCache<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    /// * `capacity` - Maximum number of live sessions; the least recently used is evicted
    /// * `ttl` - Lifetime of a session, measured from creation
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Stores `session` and returns the shared handle to it.
    pub async fn insert(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        let mut cache = self.cache.lock().await;
        let evicted = cache.push(
            session.id.clone(),
            SessionEntry {
                session: Arc::clone(&session),
                inserted_at: Instant::now(),
            },
        );
        if let Some((id, _)) = evicted.filter(|(id, _)| *id != session.id) {
            debug!("Session store at capacity, evicted session {id}");
        }
        session
    }

    /// Live session for `id`. Expired entries are dropped and reported as absent.
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let expired = match cache.get(id) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                return Some(Arc::clone(&entry.session));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            cache.pop(id);
            debug!("Session {id} expired");
        }
        None
    }

    /// Removes a session. Returns whether a live session was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut cache = self.cache.lock().await;
        match cache.pop(id) {
            Some(entry) => Instant::now().duration_since(entry.inserted_at) < self.ttl,
            None => false,
        }
    }

    /// Drops every expired session. Returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let expired_ids: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.inserted_at) >= self.ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired_ids {
            cache.pop(id);
        }
        expired_ids.len()
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
