//! # Position Relay Server Library
//!
//! This library implements the multiplayer session relay for the tile game:
//! it accepts client connections over WebSocket, assigns each a unique
//! session identity, tracks the last position every client reported, and
//! fans position deltas out to all other connected clients. The relay is
//! deliberately unauthoritative — clients own their reported coordinates
//! and the server never validates physics or collisions.
//!
//! ## Core Responsibilities
//!
//! ### Session Lifecycle
//! Handles the complete lifecycle of client connections:
//! - WebSocket handshake and session registration
//! - Unique identifier assignment (7 characters of base 36)
//! - Initial handshake frames (`init`, then a `players` roster snapshot)
//! - Disconnection cleanup and the departure broadcast
//!
//! ### State Relay
//! Applies each client's `update` frames to its registry entry
//! (last-write-wins, per-session order preserved) and rebroadcasts them to
//! every other session, best-effort and at-most-once.
//!
//! ## Architecture Design
//!
//! ### Task Per Connection
//! The listener task only accepts. Every connection runs a reader task that
//! processes inbound frames strictly in receipt order, plus a writer task
//! that exclusively owns the WebSocket sink and drains that session's
//! outbound queue. Different sessions proceed concurrently; no session can
//! block another.
//!
//! ### Single Shared Registry
//! The session registry is the only shared mutable state, guarded by one
//! `RwLock`. Connect, disconnect, position update and broadcast snapshot
//! are each a single atomic step under the lock, which keeps the connect
//! handshake consistent: a joining client's roster snapshot can never mix
//! pre- and post-insertion state.
//!
//! ### Decoupled Delivery
//! Broadcasts enqueue onto per-session unbounded queues instead of writing
//! sockets directly, so a slow or dead peer never stalls fan-out to the
//! rest. A failed delivery is that peer's problem, observed and cleaned up
//! by its own disconnect path.
//!
//! ## Module Organization
//!
//! ### Registry Module (`registry`)
//! Session state and the id-to-session map: identifier generation, position
//! bookkeeping, roster snapshots, outbound queue handles.
//!
//! ### Session Module (`session`)
//! Lifecycle manager: registration with the `init`/`players`/`join`
//! handshake, idempotent disconnect with the `leave` broadcast.
//!
//! ### Router Module (`router`)
//! Inbound frame decoding and dispatch. Malformed frames are dropped
//! without disturbing the session.
//!
//! ### Broadcast Module (`broadcast`)
//! Fire-and-forget fan-out of one serialized frame to every session except
//! an optional originator.
//!
//! ### Network Module (`network`)
//! The TCP/WebSocket listener, per-connection reader and writer tasks, and
//! transport-level error containment.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::RelayServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = RelayServer::bind("0.0.0.0:8080").await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod broadcast;
pub mod network;
pub mod registry;
pub mod router;
pub mod session;
