//! Session registry: the single source of truth for who is connected
//!
//! This module tracks every live session and its last-known state:
//! - Session identity generation (unique among live sessions)
//! - Position bookkeeping (last-write-wins, updated by the router)
//! - Per-session outbound queues for decoupled delivery
//! - Roster snapshots for the connect-time `players` frame
//!
//! The registry itself is plain synchronous state; callers share it behind
//! an `Arc<RwLock<...>>` so every insert, remove, position update and
//! snapshot iteration is one atomic step under the lock.

use rand::Rng;
use shared::{PlayerEntry, Position, SESSION_ID_ALPHABET, SESSION_ID_LEN};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Sender half of a session's outbound frame queue. The paired receiver is
/// drained by that session's writer task, which exclusively owns the
/// WebSocket sink.
pub type OutboundSender = mpsc::UnboundedSender<String>;

/// Represents a connected client session and its last reported state
///
/// Each session holds:
/// - Its process-unique identifier
/// - The last position its client reported (starts at the origin)
/// - The sender half of its outbound frame queue
#[derive(Debug)]
pub struct Session {
    /// Unique session identifier assigned by the server
    pub id: String,
    /// Last position reported by this session's client
    pub position: Position,
    /// Queue of serialized frames awaiting transmission
    outbound: OutboundSender,
}

impl Session {
    /// Creates a new session at the origin with the given outbound queue
    pub fn new(id: String, outbound: OutboundSender) -> Self {
        Self {
            id,
            position: Position::default(),
            outbound,
        }
    }

    /// Queues a serialized frame for transmission to this session
    ///
    /// Enqueueing never blocks; the frame is handed to the session's writer
    /// task. Returns false if the writer side is already gone (the session
    /// is tearing down), which callers treat as a skip, not an error.
    pub fn send(&self, frame: &str) -> bool {
        self.outbound.send(frame.to_string()).is_ok()
    }

    /// One `players`-snapshot entry for this session
    pub fn entry(&self) -> PlayerEntry {
        PlayerEntry::new(self.id.clone(), self.position)
    }
}

/// Registry of all live sessions, keyed by session id
///
/// Membership mirrors the set of open connections exactly: the lifecycle
/// manager inserts on accept and removes when the transport closes, under
/// the same lock that broadcast snapshots are taken with. No two sessions
/// ever share an id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Registers a new session and returns its generated id
    ///
    /// The id is unique among currently live sessions; on the (negligible,
    /// 36^-7) chance of a collision a fresh id is drawn. The session starts
    /// at position (0, 0).
    pub fn register(&mut self, outbound: OutboundSender) -> String {
        let id = self.generate_session_id();
        self.sessions
            .insert(id.clone(), Session::new(id.clone(), outbound));
        id
    }

    /// Removes a session from the registry
    ///
    /// Returns true if the session was present, false if it was already
    /// gone. Callers use the return value to keep disconnect idempotent.
    pub fn remove(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Overwrites the stored position for an existing session
    ///
    /// Returns false if the id is unknown (the session raced its own
    /// teardown); the caller drops the frame in that case.
    pub fn update_position(&mut self, id: &str, x: f32, y: f32) -> bool {
        if let Some(session) = self.sessions.get_mut(id) {
            session.position = Position { x, y };
            true
        } else {
            false
        }
    }

    /// Looks up a session by id
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Returns true if a session with the given id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Iterates all live sessions in unspecified order
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    /// Builds the `players` snapshot for a newly connected session
    ///
    /// Contains every registered session except `excluded` (the new session
    /// never sees itself). Taken under the same lock as the insertion, so
    /// the snapshot is consistent with the new session's own registration.
    pub fn roster_excluding(&self, excluded: &str) -> HashMap<String, PlayerEntry> {
        self.sessions
            .values()
            .filter(|session| session.id != excluded)
            .map(|session| (session.id.clone(), session.entry()))
            .collect()
    }

    /// Returns the number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are registered
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Draws a random 7-character base-36 id not currently in the registry
    fn generate_session_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let candidate: String = (0..SESSION_ID_LEN)
                .map(|_| {
                    let idx = rng.gen_range(0..SESSION_ID_ALPHABET.len());
                    SESSION_ID_ALPHABET[idx] as char
                })
                .collect();

            if !self.sessions.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
