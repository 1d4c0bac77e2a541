//! Per-session display state
//!
//! Each session holds the last result shown on every screen. A new result
//! replaces the previous one for the same screen; nothing else is kept.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use nlp_examples_shared::{
    Operation, OperationOutput, ScreenResponse, SessionSnapshot, TextAnalysisReport,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SessionConfig;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: Uuid,
    pub text_analysis: Option<ScreenResponse<TextAnalysisReport>>,
    pub translation: Option<ScreenResponse<OperationOutput>>,
    pub sentiment: Option<ScreenResponse<OperationOutput>>,
    pub last_operation: Option<ScreenResponse<OperationOutput>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            text_analysis: None,
            translation: None,
            sentiment: None,
            last_operation: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            text_analysis: self.text_analysis.clone(),
            translation: self.translation.clone(),
            sentiment: self.sentiment.clone(),
            last_operation: self.last_operation.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub struct SessionStore {
    sessions: DashMap<Uuid, SessionState>,
    ttl: chrono::Duration,
    sweep_interval: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: chrono::Duration::seconds(config.ttl_seconds as i64),
            sweep_interval: Duration::from_secs(config.sweep_interval_seconds),
            max_sessions: config.max_sessions.max(1),
        }
    }

    /// Known session for the id a client sent; `None` when the id is
    /// missing, malformed or expired. Never creates a session.
    pub fn find(&self, session_id: Option<&str>) -> Option<Uuid> {
        session_id
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .filter(|id| self.sessions.contains_key(id))
    }

    pub fn create(&self) -> Uuid {
        if self.sessions.len() >= self.max_sessions {
            self.evict_least_recent();
        }

        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionState::new(id));
        debug!("Created session {}", id);
        id
    }

    fn evict_least_recent(&self) {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.updated_at)
            .map(|entry| *entry.key());

        if let Some(id) = oldest {
            self.sessions.remove(&id);
            info!("Session limit reached, evicted session {}", id);
        }
    }

    fn update<F>(&self, id: Uuid, apply: F)
    where
        F: FnOnce(&mut SessionState),
    {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            apply(&mut session);
            session.updated_at = Utc::now();
        }
    }

    pub fn record_text_analysis(&self, id: Uuid, response: ScreenResponse<TextAnalysisReport>) {
        self.update(id, |session| session.text_analysis = Some(response));
    }

    /// Store an operation result in the slot of the screen it belongs to
    pub fn record_operation(
        &self,
        id: Uuid,
        operation: Operation,
        response: ScreenResponse<OperationOutput>,
    ) {
        self.update(id, |session| {
            match operation {
                Operation::Translate => session.translation = Some(response.clone()),
                Operation::Sentiment => session.sentiment = Some(response.clone()),
                _ => {}
            }
            session.last_operation = Some(response);
        });
    }

    pub fn snapshot(&self, id: Uuid) -> Option<SessionSnapshot> {
        self.sessions.get(&id).map(|session| session.snapshot())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than the ttl; returns how many were dropped
    pub fn sweep_expired(&self) -> usize {
        self.sweep_idle_since(Utc::now() - self.ttl)
    }

    fn sweep_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.updated_at >= cutoff);
        before.saturating_sub(self.sessions.len())
    }

    /// Periodically sweep expired sessions until the runtime shuts down
    pub fn spawn_sweeper(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.sweep_interval);
            loop {
                interval.tick().await;
                let removed = self.sweep_expired();
                if removed > 0 {
                    info!(
                        "Expired {} idle sessions, {} active",
                        removed,
                        self.sessions.len()
                    );
                }
            }
        })
    }
}
