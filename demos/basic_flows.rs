// Copyright (c) 2025 - Cowboy AI, Inc.
//! Basic Flow Example
//!
//! Demonstrates constructing flows and singles, subscribing to them, and
//! collecting their output.
//!
//! Run with: `cargo run --example basic_flows`
//!
//! Set `RUST_LOG=debug` to see the signals emitted by the `log` operator.

use cim_streams::{Flow, Single};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Flow Basics ===\n");

    // A flow performs no work until subscribed
    let subjects = Flow::from_iter(vec!["workflow", "agent", "graph"]).log("subjects");

    println!("--- subscribe ---");
    subjects.subscribe_with(|subject| println!("subject: {subject}")).await;

    println!("--- collect_to_list ---");
    let collected = subjects.collect_to_list().await?;
    println!("collected: {collected:?}\n");

    // Operators return new definitions; the source is unchanged
    let uppercased = subjects.map(str::to_uppercase);
    println!("uppercased: {:?}", uppercased.collect_to_list().await?);
    println!("source:     {:?}\n", subjects.collect_to_list().await?);

    println!("=== Flattening ===\n");

    let letters = Flow::from_iter(vec!["event", "graph"])
        .concat_map(|word| Flow::from_iter(word.chars().collect::<Vec<_>>()));
    println!("concat_map letters: {:?}\n", letters.collect_to_list().await?);

    println!("=== Singles ===\n");

    let subject = Single::just("jetstream").log("subject");
    println!("resolved: {:?}", subject.resolve().await?);

    let normalized = subject.flat_map(|s| Single::just(s.to_uppercase()));
    println!("and-then: {:?}", normalized.resolve().await?);

    let letters = subject.flat_map_many(|s| Flow::from_iter(s.chars().collect::<Vec<_>>()));
    println!("flat_map_many: {:?}", letters.collect_to_list().await?);

    Ok(())
}
