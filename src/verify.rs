// Copyright (c) 2025 - Cowboy AI, Inc.
//! Step-by-step expectation verifier for flows
//!
//! `StepVerifier` drives one subscription and asserts the emitted signal
//! sequence step by step. Expectations are declared first, then
//! [`StepVerifier::verify_complete`] or [`StepVerifier::verify_error`] runs
//! the subscription and panics on the first mismatch, which makes the
//! verifier suitable for test assertions.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_streams::{Flow, StepVerifier};
//!
//! StepVerifier::create(Flow::from_iter(vec!["A", "B", "C"]))
//!     .expect_next(["A", "B"])
//!     .expect_next_count(1)
//!     .verify_complete()
//!     .await;
//! ```

use std::fmt::Debug;

use futures::stream::StreamExt;

use crate::errors::StreamError;
use crate::flow::{Flow, RunStream};
use crate::single::Single;

/// One declared expectation
enum Step<T> {
    ExpectNext(Vec<T>),
    ExpectNextCount(usize),
}

/// Declarative verifier for a flow's signal sequence
pub struct StepVerifier<T> {
    flow: Flow<T>,
    steps: Vec<Step<T>>,
}

impl<T> StepVerifier<T>
where
    T: PartialEq + Debug + Send + 'static,
{
    /// Verify the given flow definition
    ///
    /// The subscription starts when one of the `verify_*` methods runs.
    pub fn create(flow: Flow<T>) -> Self {
        Self {
            flow,
            steps: Vec::new(),
        }
    }

    /// Verify the given single-value definition
    pub fn create_single(single: Single<T>) -> Self {
        Self::create(single.to_flow())
    }

    /// Expect exactly these values next, in order
    pub fn expect_next<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.steps.push(Step::ExpectNext(values.into_iter().collect()));
        self
    }

    /// Expect `count` further values without inspecting them
    pub fn expect_next_count(mut self, count: usize) -> Self {
        self.steps.push(Step::ExpectNextCount(count));
        self
    }

    /// Run the subscription and assert it completes after the expected values
    ///
    /// # Panics
    ///
    /// Panics on any unexpected value, error, or early completion.
    pub async fn verify_complete(self) {
        let mut run = self.flow.open();
        drain_steps(&mut run, self.steps).await;
        match run.next().await {
            None => {}
            Some(Ok(value)) => panic!("expected completion but got value {value:?}"),
            Some(Err(e)) => panic!("expected completion but got error: {e}"),
        }
    }

    /// Run the subscription and assert it errors after the expected values
    ///
    /// Returns the terminal error for further assertions.
    ///
    /// # Panics
    ///
    /// Panics on any unexpected value or on completion without an error.
    pub async fn verify_error(self) -> StreamError {
        let mut run = self.flow.open();
        drain_steps(&mut run, self.steps).await;
        match run.next().await {
            Some(Err(e)) => e,
            Some(Ok(value)) => panic!("expected an error but got value {value:?}"),
            None => panic!("expected an error but the flow completed"),
        }
    }
}

async fn drain_steps<T>(run: &mut RunStream<T>, steps: Vec<Step<T>>)
where
    T: PartialEq + Debug + Send + 'static,
{
    for step in steps {
        match step {
            Step::ExpectNext(expected) => {
                for expected_value in expected {
                    match run.next().await {
                        Some(Ok(value)) => {
                            assert_eq!(value, expected_value, "unexpected value")
                        }
                        Some(Err(e)) => {
                            panic!("expected value {expected_value:?} but got error: {e}")
                        }
                        None => {
                            panic!("expected value {expected_value:?} but the flow completed")
                        }
                    }
                }
            }
            Step::ExpectNextCount(count) => {
                for seen in 0..count {
                    match run.next().await {
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            panic!("expected {count} values but got error after {seen}: {e}")
                        }
                        None => {
                            panic!("expected {count} values but the flow completed after {seen}")
                        }
                    }
                }
            }
        }
    }
}
