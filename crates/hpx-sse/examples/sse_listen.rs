//! SSE Listen Example
//!
//! Connects to an event stream, prints every event and reconnects on
//! failure until interrupted.
//!
//! Run with: `cargo run -p hpx-sse --example sse_listen -- <url> [event-name...]`
//!
//! Set `RUST_LOG=hpx_sse=debug` to watch the connection state machine.

use std::time::Duration;

use hpx_sse::{EventSource, EventSourceConfig, http::HttpTransport};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hpx_sse=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .unwrap_or_else(|| "http://127.0.0.1:8080/events".to_string());
    let names: Vec<String> = args.collect();

    let transport = HttpTransport::builder(&url)
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    let config = EventSourceConfig::new()
        .event_timeout(Some(Duration::from_secs(45)))
        .retry_interval(Duration::from_secs(2));

    let source = EventSource::new(config, transport)?;
    source.on_open(move || println!("connected to {url}"));
    source.on_error(|err| match err {
        Some(err) => eprintln!("connection lost: {err}"),
        None => eprintln!("stream ended"),
    });
    source.on_message(|event| {
        println!(
            "[{}] id={} {}",
            event.event_type().unwrap_or("message"),
            event.id().unwrap_or("-"),
            event.data().unwrap_or(""),
        );
    });
    for name in names {
        let label = name.clone();
        source.add_event_listener(name, move |event| {
            println!("  -> {label} listener: {} bytes", event.data().map_or(0, str::len));
        });
    }

    source.connect();
    tokio::signal::ctrl_c().await?;
    source.close();
    Ok(())
}
