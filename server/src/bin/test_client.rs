use futures_util::{SinkExt, StreamExt};
use shared::{ClientMessage, ServerMessage, DEFAULT_PORT};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server address
    let url = format!("ws://127.0.0.1:{}", DEFAULT_PORT);

    println!("Connecting to {}", url);
    let (ws, _) = connect_async(&url).await?;
    let (mut sink, mut source) = ws.split();

    // Wait for the assigned session id
    println!("Waiting for init frame...");
    let my_id;
    match source.next().await {
        Some(Ok(Message::Text(text))) => match serde_json::from_str::<ServerMessage>(&text)? {
            ServerMessage::Init { id } => {
                println!("Assigned session id: {}", id);
                my_id = id;
            }
            other => {
                println!("Expected init but got: {:?}", other);
                return Ok(());
            }
        },
        other => {
            println!("Unexpected frame: {:?}", other);
            return Ok(());
        }
    }

    // The roster snapshot arrives immediately after init
    if let Some(Ok(Message::Text(text))) = source.next().await {
        match serde_json::from_str::<ServerMessage>(&text)? {
            ServerMessage::Players { players } => {
                println!("{} other player(s) online", players.len());
                for (id, entry) in players {
                    println!(
                        "  Player {}: x={}, y={}",
                        id, entry.position.x, entry.position.y
                    );
                }
            }
            other => println!("Expected players but got: {:?}", other),
        }
    }

    // Walk a small circle, reporting position once a second
    for i in 0..10 {
        let x = 100.0 + 50.0 * (i as f32 / 5.0).sin();
        let y = 100.0 + 50.0 * (i as f32 / 5.0).cos();

        let update = ClientMessage::Update {
            id: my_id.clone(),
            x,
            y,
        };
        println!("Sending update: x={:.1}, y={:.1}", x, y);
        sink.send(Message::text(serde_json::to_string(&update)?))
            .await?;

        // Print whatever the relay forwarded from other players meanwhile
        while let Ok(Some(Ok(Message::Text(text)))) =
            timeout(Duration::from_millis(200), source.next()).await
        {
            match serde_json::from_str::<ServerMessage>(&text) {
                Ok(ServerMessage::Join { id, x, y }) => {
                    println!("  Player {} joined at x={}, y={}", id, x, y)
                }
                Ok(ServerMessage::Update { id, x, y }) => {
                    println!("  Player {} moved to x={}, y={}", id, x, y)
                }
                Ok(ServerMessage::Leave { id }) => println!("  Player {} left", id),
                Ok(other) => println!("  Unexpected frame: {:?}", other),
                Err(e) => println!("  Failed to decode frame: {}", e),
            }
        }

        sleep(Duration::from_secs(1)).await;
    }

    println!("Closing connection");
    sink.close().await?;
    println!("Test client finished");

    Ok(())
}
