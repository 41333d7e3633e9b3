//! Best-effort fan-out of one frame to every registered session
//!
//! Delivery is at-most-once with no acknowledgement: the frame is serialized
//! once and enqueued on each session's outbound queue. A peer whose queue is
//! already closed is skipped; its own disconnect path handles the cleanup.

use crate::registry::SessionRegistry;
use log::{debug, error};
use shared::ServerMessage;

/// Delivers `message` to every session in the registry except `exclude`.
///
/// Enqueueing never blocks, so a slow or dead peer cannot stall delivery to
/// the others. Failures are observed per peer and never surface to the
/// caller. Callers hold the registry lock for the duration, which is the
/// snapshot the fan-out iterates.
pub fn broadcast(registry: &SessionRegistry, message: &ServerMessage, exclude: Option<&str>) {
    let frame = match serde_json::to_string(message) {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to serialize broadcast frame: {}", e);
            return;
        }
    };

    for session in registry.sessions() {
        if exclude == Some(session.id.as_str()) {
            continue;
        }

        if !session.send(&frame) {
            debug!("Skipping session {} with closed outbound queue", session.id);
        }
    }
}
