//! Session lifecycle: registration on connect, teardown on disconnect
//!
//! The manager owns the shared registry handle and is the only component
//! that structurally mutates it. Connect performs the initial handshake
//! (`init`, then `players`) and announces the newcomer; disconnect removes
//! the session and announces the departure. Both are single atomic steps
//! under the registry write lock, safe under concurrent connection tasks.

use crate::broadcast::broadcast;
use crate::registry::{OutboundSender, SessionRegistry};
use log::{debug, error, info};
use shared::ServerMessage;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Queues one frame on a single session, fire-and-forget.
fn send_to(registry: &SessionRegistry, id: &str, message: &ServerMessage) {
    let frame = match serde_json::to_string(message) {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to serialize frame for session {}: {}", id, e);
            return;
        }
    };

    if let Some(session) = registry.get(id) {
        if !session.send(&frame) {
            debug!("Outbound queue for session {} already closed", id);
        }
    }
}

/// Manages session membership in the shared registry.
///
/// Cheap to clone; every per-connection task holds one.
#[derive(Clone, Default)]
pub struct SessionManager {
    registry: Arc<RwLock<SessionRegistry>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(SessionRegistry::new())),
        }
    }

    /// Shared registry handle, used by the router and by tests.
    pub fn registry(&self) -> &Arc<RwLock<SessionRegistry>> {
        &self.registry
    }

    /// Registers a new session and runs the connect handshake.
    ///
    /// Under one write lock: generates the id, inserts the session at
    /// (0, 0), queues `init` and then `players` (a snapshot of everyone
    /// else, consistent with the insertion) to the newcomer, and broadcasts
    /// `join` to every other session. Returns the assigned id.
    pub async fn connect(&self, outbound: OutboundSender) -> String {
        let mut registry = self.registry.write().await;
        let id = registry.register(outbound);

        send_to(&registry, &id, &ServerMessage::Init { id: id.clone() });
        send_to(
            &registry,
            &id,
            &ServerMessage::Players {
                players: registry.roster_excluding(&id),
            },
        );

        let position = registry
            .get(&id)
            .map(|session| session.position)
            .unwrap_or_default();
        broadcast(
            &registry,
            &ServerMessage::Join {
                id: id.clone(),
                x: position.x,
                y: position.y,
            },
            Some(&id),
        );

        info!("Player {} connected", id);
        id
    }

    /// Removes a session and announces the departure.
    ///
    /// Idempotent: a second call for the same id finds nothing to remove
    /// and emits no duplicate `leave`.
    pub async fn disconnect(&self, id: &str) {
        let mut registry = self.registry.write().await;
        if !registry.remove(id) {
            return;
        }

        broadcast(
            &registry,
            &ServerMessage::Leave { id: id.to_string() },
            None,
        );
        info!("Player {} disconnected", id);
    }
}
