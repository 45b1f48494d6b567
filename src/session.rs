//! Session state
//!
//! Each browser session owns an isolated copy of the profile, expense
//! ledger, and chat transcript, held in memory for the lifetime of the
//! session only. The store is plain shared state owned by whoever embeds
//! it (the API state or a binary) rather than a process-wide singleton.

use crate::expenses::ExpenseLedger;
use crate::models::{ChatRole, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single turn in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered transcript bounded to a maximum turn count.
/// Oldest turns are dropped first, purely to bound memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    turns: VecDeque<ChatTurn>,
    max_turns: usize,
}

impl Transcript {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// The N most recent turns, newest last
    pub fn recent(&self, count: usize) -> Vec<&ChatTurn> {
        let skip = self.turns.len().saturating_sub(count);
        self.turns.iter().skip(skip).collect()
    }
}

/// One user's isolated session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    /// Short hex tag for logs
    pub tag: String,
    pub created_at: DateTime<Utc>,
    pub profile: Option<UserProfile>,
    pub ledger: ExpenseLedger,
    pub transcript: Transcript,
}

impl Session {
    pub fn new(session_id: Uuid, max_turns: usize) -> Self {
        Self {
            session_id,
            tag: session_tag(session_id),
            created_at: Utc::now(),
            profile: None,
            ledger: ExpenseLedger::new(),
            transcript: Transcript::new(max_turns),
        }
    }
}

/// Short hex identifier derived from the session id, for log lines
pub fn session_tag(session_id: Uuid) -> String {
    let hash = Sha256::digest(session_id.as_bytes());
    hex::encode(&hash[..4])
}

/// In-memory session store
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    max_turns: usize,
}

impl SessionStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_turns,
        }
    }

    /// Load a copy of a session, creating it if missing.
    /// Mutations happen on the copy and are written back with `save`.
    pub async fn load_or_create(&self, session_id: Uuid) -> Session {
        {
            let locked = self.sessions.read().await;
            if let Some(session) = locked.get(&session_id) {
                return session.clone();
            }
        }

        let mut locked = self.sessions.write().await;
        locked
            .entry(session_id)
            .or_insert_with(|| Session::new(session_id, self.max_turns))
            .clone()
    }

    /// Load a copy of an existing session
    pub async fn get(&self, session_id: Uuid) -> crate::Result<Session> {
        let locked = self.sessions.read().await;
        locked
            .get(&session_id)
            .cloned()
            .ok_or(crate::error::AdvisorError::UnknownSession(session_id))
    }

    pub async fn save(&self, session: Session) {
        let mut locked = self.sessions.write().await;
        locked.insert(session.session_id, session);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_truncation() {
        let mut transcript = Transcript::new(5);

        for i in 0..10 {
            transcript.push(ChatTurn::user(format!("question {}", i)));
        }

        assert_eq!(transcript.len(), 5);
        // Oldest turns were dropped first
        let first = transcript.turns().next().unwrap();
        assert_eq!(first.text, "question 5");
    }

    #[test]
    fn test_transcript_recent() {
        let mut transcript = Transcript::new(10);
        for i in 0..6 {
            transcript.push(ChatTurn::user(format!("q{}", i)));
        }

        let recent = transcript.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].text, "q5");
    }

    #[test]
    fn test_session_tag_is_stable() {
        let id = Uuid::new_v4();
        assert_eq!(session_tag(id), session_tag(id));
        assert_eq!(session_tag(id).len(), 8);
    }

    #[tokio::test]
    async fn test_store_load_save_roundtrip() {
        let store = SessionStore::new(50);
        let id = Uuid::new_v4();

        let mut session = store.load_or_create(id).await;
        session.transcript.push(ChatTurn::user("hello"));
        store.save(session).await;

        let reloaded = store.get(id).await.unwrap();
        assert_eq!(reloaded.transcript.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_errors() {
        let store = SessionStore::new(50);
        assert!(store.get(Uuid::new_v4()).await.is_err());
    }
}
