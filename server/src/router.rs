//! Inbound frame routing for established sessions
//!
//! Decodes one text frame at a time, in receipt order, and applies its
//! effects. `update` is the only recognized inbound kind; everything else
//! is dropped without disturbing the session.

use crate::broadcast::broadcast;
use crate::session::SessionManager;
use log::debug;
use shared::{ClientMessage, ServerMessage};

/// Handles one raw inbound frame from the session identified by `origin`.
///
/// A well-formed `update` overwrites the originating session's registry
/// position (last-write-wins; the relay trusts the reporting client) and
/// fans the same payload out to everyone else. Malformed frames, and frames
/// arriving after the session's own teardown, are dropped silently.
pub async fn handle_frame(manager: &SessionManager, origin: &str, frame: &str) {
    let message = match serde_json::from_str::<ClientMessage>(frame) {
        Ok(message) => message,
        Err(e) => {
            debug!("Dropping malformed frame from session {}: {}", origin, e);
            return;
        }
    };

    match message {
        ClientMessage::Update { id, x, y } => {
            let mut registry = manager.registry().write().await;
            if !registry.update_position(origin, x, y) {
                debug!("Dropping update from unregistered session {}", origin);
                return;
            }
            broadcast(&registry, &ServerMessage::Update { id, x, y }, Some(origin));
        }
    }
}
