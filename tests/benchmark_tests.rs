//! Performance benchmarks for the relay's hot paths

use server::broadcast::broadcast;
use server::registry::SessionRegistry;
use shared::ServerMessage;
use std::collections::HashSet;
use std::time::Instant;
use tokio::sync::mpsc;

/// Benchmarks session id generation and verifies uniqueness at scale
#[test]
fn benchmark_id_generation() {
    let mut registry = SessionRegistry::new();
    let mut receivers = Vec::new();
    let mut seen = HashSet::new();

    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let (tx, rx) = mpsc::unbounded_channel();
        receivers.push(rx);
        let id = registry.register(tx);
        assert!(seen.insert(id), "duplicate session id generated");
    }

    let duration = start.elapsed();
    println!(
        "Id generation: {} registrations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    assert_eq!(registry.len(), iterations);
    // Should complete in under 2 seconds
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks broadcast fan-out enqueue latency at 100 peers
#[test]
fn benchmark_broadcast_fanout() {
    let mut registry = SessionRegistry::new();
    let mut receivers = Vec::new();

    for _ in 0..100 {
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(tx);
        receivers.push(rx);
    }

    let message = ServerMessage::Update {
        id: "bench00".to_string(),
        x: 123.0,
        y: 456.0,
    };

    let iterations = 1_000;
    let start = Instant::now();

    for _ in 0..iterations {
        broadcast(&registry, &message, None);
    }

    let duration = start.elapsed();
    println!(
        "Broadcast fan-out: {} iterations × {} peers in {:?} ({:.2} μs/iter)",
        iterations,
        registry.len(),
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Every peer received every frame.
    for rx in &mut receivers {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, iterations);
    }

    // Should complete in under 5 seconds
    assert!(duration.as_millis() < 5000);
}

/// Benchmarks frame encoding performance
#[test]
fn benchmark_frame_encoding() {
    let message = ServerMessage::Update {
        id: "bench00".to_string(),
        x: 1024.5,
        y: -768.25,
    };

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let _ = serde_json::to_string(&message).unwrap();
    }

    let duration = start.elapsed();
    println!(
        "Frame encoding: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}
