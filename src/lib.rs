// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reactive stream primitives for the Composable Information Machine
//!
//! This crate provides a lazy, multi-value asynchronous sequence
//! ([`Flow`]), a single-value specialization ([`Single`]), operator families
//! over both (transformation, flattening, combination, sequencing), and a
//! step-by-step expectation verifier ([`StepVerifier`]) for tests.
//!
//! # Core Concepts
//!
//! ## Flow<T>
//!
//! Zero or more values over time, produced only when subscribed. Every
//! subscription is an independent run.
//!
//! ## Single<T>
//!
//! At most one value before completion. Composes sequentially via
//! `flat_map` and upgrades to a [`Flow`] via `flat_map_many`.
//!
//! ## Combinators
//!
//! `concat`, `merge`, `merge_sequential`, and `zip` combine several flows,
//! differing in subscription timing and output order.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_streams::{Flow, StepVerifier};
//!
//! let words = Flow::from_iter(vec!["event", "graph"]);
//! let letters = words.concat_map(|word| {
//!     Flow::from_iter(word.chars().collect::<Vec<_>>())
//! });
//!
//! StepVerifier::create(letters)
//!     .expect_next_count(10)
//!     .verify_complete()
//!     .await;
//! ```

pub mod combinators;
pub mod errors;
pub mod flow;
pub mod single;
pub mod subscriber;
pub mod verify;

// Re-export commonly used types
pub use combinators::{concat, merge, merge_sequential, zip, zip3, zip4};
pub use errors::{StreamError, StreamResult};
pub use flow::Flow;
pub use single::Single;
pub use subscriber::{FnSubscriber, Subscriber};
pub use verify::StepVerifier;
