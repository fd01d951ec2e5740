//! Album view demo.
//!
//! Plays the renderer role: subscribes to a [`FetchController`], draws a
//! loading line for Pending, the record fields for Success, and the error
//! plus a retry for Failure.
//!
//! Run with `RUST_LOG=placard=debug` to see the fetch lifecycle, and pass an
//! endpoint URL as the first argument to fetch something other than the
//! default record.

// Demo-specific lint allowances
#![allow(clippy::print_stdout)]

use placard::prelude::*;
use tracing_subscriber::EnvFilter;

fn render(state: &FetchState) {
    match state {
        FetchState::Idle => {}
        FetchState::Pending => println!("loading..."),
        FetchState::Success(record) => {
            println!("album #{} (user {})", record.id, record.user_id);
            println!("  {}", record.title);
        }
        FetchState::Failure(error) => {
            println!("something went wrong: {error}");
        }
    }
}

#[tokio::main]
async fn main() -> placard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(endpoint) => FetcherConfig::builder().endpoint_str(endpoint)?.build(),
        None => FetcherConfig::default(),
    };
    println!("fetching {}", config.endpoint);

    let controller = FetchController::new(HttpFetcher::new(config));
    controller.subscribe(render);

    controller.start().await;

    // Stand-in for a user tapping the retry control.
    for attempt in 1..=2 {
        if controller.current_state().error().is_none() {
            break;
        }
        println!("retry {attempt}...");
        controller.retry().await;
    }

    Ok(())
}
