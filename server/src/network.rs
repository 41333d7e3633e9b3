//! Transport layer: WebSocket listener and per-connection tasks
//!
//! The listener accepts TCP connections and upgrades each to a WebSocket in
//! its own task, so no connection's handshake or traffic can block another.
//! Each connection gets two tasks: a reader that feeds inbound frames to the
//! router one at a time (preserving per-session order), and a writer that
//! exclusively owns the sink and drains the session's outbound queue.

use crate::router;
use crate::session::SessionManager;
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use futures_util::{SinkExt, StreamExt};

/// The relay server: a bound listener plus the shared session state.
pub struct RelayServer {
    listener: TcpListener,
    sessions: SessionManager,
}

impl RelayServer {
    /// Binds the listener. A bind failure is fatal and propagates to the
    /// caller; everything after this point is per-connection and contained.
    pub async fn bind(addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Relay listening on ws://{}", listener.local_addr()?);

        Ok(Self {
            listener,
            sessions: SessionManager::new(),
        })
    }

    /// Address the listener actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Shared session state, exposed for tests.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Accepts connections until the process shuts down.
    ///
    /// Every accepted stream is handed to its own task immediately; a
    /// failed accept is logged and the loop continues.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let sessions = self.sessions.clone();
                    tokio::spawn(handle_connection(stream, peer, sessions));
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}

/// Drives one client connection from handshake to teardown.
///
/// Registration happens after a successful WebSocket handshake. From then
/// on the session is ACTIVE until the transport closes (cleanly or not),
/// at which point disconnect runs exactly once.
async fn handle_connection(stream: TcpStream, peer: SocketAddr, sessions: SessionManager) {
    let ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", peer, e);
            return;
        }
    };

    let (mut sink, mut source) = ws.split();
    let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
    let id = sessions.connect(outbound).await;
    debug!("Session {} established from {}", id, peer);

    // The registry entry holds the only sender, so this task drains any
    // queued frames and exits once the session is removed.
    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(Message::text(frame)).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                router::handle_frame(&sessions, &id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            // Binary frames carry no application traffic; ping/pong are
            // answered by the protocol layer.
            Ok(_) => {}
            Err(e) => {
                debug!("Transport error on session {}: {}", id, e);
                break;
            }
        }
    }

    sessions.disconnect(&id).await;
    let _ = writer.await;
}
