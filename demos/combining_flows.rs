// Copyright (c) 2025 - Cowboy AI, Inc.
//! Combination Operator Example
//!
//! Shows how subscription timing and output order differ across concat,
//! merge, merge_sequential, and zip when sources emit with delays.
//!
//! Run with: `cargo run --example combining_flows`

use std::time::Duration;

use cim_streams::{combinators, Flow};
use tracing_subscriber::EnvFilter;

fn letters_abc() -> Flow<&'static str> {
    Flow::from_iter(vec!["A", "B", "C"]).delay_elements(Duration::from_millis(100))
}

fn letters_def() -> Flow<&'static str> {
    Flow::from_iter(vec!["D", "E", "F"]).delay_elements(Duration::from_millis(125))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== concat: sequential subscription, source order ===");
    let concatenated = combinators::concat(vec![letters_abc(), letters_def()]);
    println!("{:?}\n", concatenated.collect_to_list().await?);

    println!("=== merge: concurrent subscription, arrival order ===");
    let merged = combinators::merge(vec![letters_abc(), letters_def()]);
    println!("{:?}\n", merged.collect_to_list().await?);

    println!("=== merge_sequential: concurrent subscription, source order ===");
    let sequential = combinators::merge_sequential(vec![letters_abc(), letters_def()]);
    println!("{:?}\n", sequential.collect_to_list().await?);

    println!("=== zip: pairwise combination, truncated at the shortest ===");
    let zipped = combinators::zip(letters_abc(), letters_def(), |a, b| format!("{a}{b}"));
    println!("{:?}\n", zipped.collect_to_list().await?);

    let four_way = combinators::zip4(
        letters_abc(),
        letters_def(),
        Flow::from_iter(vec!["1", "2", "3"]),
        Flow::from_iter(vec!["4", "5", "6"]),
        |a, b, c, d| format!("{a}{b}{c}{d}"),
    );
    println!("zip4: {:?}", four_way.collect_to_list().await?);

    Ok(())
}
