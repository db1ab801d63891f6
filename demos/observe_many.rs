//! Several independent observers over one store.
//!
//! Spawns three `get_and_observe` subscriptions on different keys, writes
//! to each key a few times, then cancels everything by dropping the
//! consumer tasks. Run with `cargo run --example observe_many`.

use futures::StreamExt;
use prefstream::{MemoryStore, Prefs, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let prefs = Prefs::new(MemoryStore::new());
    prefs.put("one", &"initial".to_string())?;

    let mut consumers = Vec::new();
    for key in ["one", "two", "three"] {
        let stream = prefs.get_and_observe(key, String::new())?;
        consumers.push(tokio::spawn(async move {
            futures::pin_mut!(stream);
            while let Some(value) = stream.next().await {
                match value {
                    Ok(value) => info!(key, value = %value, "observed"),
                    Err(e) => info!(key, error = %e, "observation failed"),
                }
            }
        }));
    }

    for round in 0..3 {
        for key in ["one", "two", "three"] {
            prefs.put(key, &format!("{key}-{round}"))?;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    info!(entries = prefs.len(), "done writing; dropping consumers");
    for consumer in consumers {
        consumer.abort();
    }

    Ok(())
}
