// Copyright (c) 2025 - Cowboy AI, Inc.
//! Single - Single-Value Asynchronous Sequences
//!
//! A `Single<T>` is a [`Flow<T>`] constrained to emit at most one value
//! before completing.
//!
//! ```text
//! Time: ────────────────────────────→
//! Single:          ●                ✓
//!                value           complete
//! ```
//!
//! # Cardinality
//!
//! Constructors uphold the constraint directly (`just`, `empty`, `error`).
//! [`Single::from_flow`] gates an arbitrary flow: a run that offers a second
//! value is terminated with [`StreamError::Cardinality`].
//!
//! # Composition
//!
//! - [`Single::flat_map`] sequences two single-value computations
//!   ("and-then")
//! - [`Single::flat_map_many`] upgrades cardinality from one to many
//! - [`Single::zip_with`] waits for both values and combines them pairwise

use std::fmt;

use futures::future::ready;
use futures::stream::{self, StreamExt};

use crate::combinators;
use crate::errors::{StreamError, StreamResult};
use crate::flow::{until_error, Flow, RunStream};
use crate::subscriber::Subscriber;

/// A flow constrained to at most one value
pub struct Single<T> {
    flow: Flow<T>,
}

impl<T> Clone for Single<T> {
    fn clone(&self) -> Self {
        Self {
            flow: self.flow.clone(),
        }
    }
}

impl<T> fmt::Debug for Single<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Single<{}>", std::any::type_name::<T>())
    }
}

impl<T: Send + 'static> Single<T> {
    /// Create a single emitting one value
    pub fn just(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self {
            flow: Flow::from_source(move || stream::once(ready(Ok(value.clone()))).boxed()),
        }
    }

    /// Create a single that completes without a value
    pub fn empty() -> Self {
        Self {
            flow: Flow::empty(),
        }
    }

    /// Create a single that signals the given error to every subscriber
    pub fn error(error: StreamError) -> Self {
        Self {
            flow: Flow::error(error),
        }
    }

    /// Constrain a flow to at most one value
    ///
    /// A run offering a second value is terminated with
    /// [`StreamError::Cardinality`].
    pub fn from_flow(flow: Flow<T>) -> Self {
        Self {
            flow: Flow::from_source(move || enforce_single(flow.open())),
        }
    }

    /// Transform the value, if one is emitted
    pub fn map<U, F>(&self, f: F) -> Single<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Single {
            flow: self.flow.map(f),
        }
    }

    /// Sequence another single-value computation after this one
    ///
    /// The function runs once this single's value is available and its
    /// result is flattened into the output ("and-then").
    pub fn flat_map<U, F>(&self, f: F) -> Single<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Single<U> + Send + Sync + 'static,
    {
        Single {
            flow: self.flow.concat_map(move |value| f(value).flow),
        }
    }

    /// Flatten into a multi-value flow
    ///
    /// Upgrades cardinality from one to many: the value, if any, is mapped
    /// to a flow and the output is that flow's sequence.
    pub fn flat_map_many<U, F>(&self, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Flow<U> + Send + Sync + 'static,
    {
        self.flow.concat_map(f)
    }

    /// Wait for both values and combine them pairwise
    pub fn zip_with<U, V, F>(&self, other: &Single<U>, combiner: F) -> Single<V>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        Single {
            flow: combinators::zip(self.flow.clone(), other.flow.clone(), combiner),
        }
    }

    /// Emit this value, then the other single's value
    pub fn concat_with(&self, other: &Single<T>) -> Flow<T> {
        combinators::concat(vec![self.flow.clone(), other.flow.clone()])
    }

    /// Merge with another single, interleaving by arrival
    pub fn merge_with(&self, other: &Single<T>) -> Flow<T> {
        combinators::merge(vec![self.flow.clone(), other.flow.clone()])
    }

    /// Log every signal of each run under the given label
    pub fn log(&self, label: &str) -> Single<T>
    where
        T: fmt::Debug,
    {
        Single {
            flow: self.flow.log(label),
        }
    }

    /// View this single as a flow
    pub fn to_flow(&self) -> Flow<T> {
        self.flow.clone()
    }

    /// Drive one run, delivering every signal to the subscriber
    pub async fn subscribe<S>(&self, subscriber: &mut S)
    where
        S: Subscriber<T>,
    {
        self.flow.subscribe(subscriber).await;
    }

    /// Run one subscription to completion and resolve the value
    ///
    /// `Ok(None)` means the single completed empty.
    pub async fn resolve(&self) -> StreamResult<Option<T>> {
        let mut values = self.flow.collect_to_list().await?;
        Ok(values.pop())
    }
}

/// Terminate a run with a cardinality error on its second value
fn enforce_single<T: Send + 'static>(run: RunStream<T>) -> RunStream<T> {
    let gated = run.scan(0usize, |seen, item| {
        let item = match item {
            Ok(value) => {
                *seen += 1;
                if *seen > 1 {
                    Err(StreamError::Cardinality(
                        "single-value flow emitted more than one value".to_string(),
                    ))
                } else {
                    Ok(value)
                }
            }
            Err(e) => Err(e),
        };
        ready(Some(item))
    });
    until_error(gated.boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_just_resolves_the_value() {
        let single = Single::just(42);

        assert_eq!(single.resolve().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_empty_resolves_none() {
        let single: Single<i32> = Single::empty();

        assert_eq!(single.resolve().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_map_transforms_the_value() {
        let single = Single::just("graph").map(str::to_uppercase);

        assert_eq!(single.resolve().await.unwrap(), Some("GRAPH".to_string()));
    }

    #[tokio::test]
    async fn test_flat_map_sequences_computations() {
        let single = Single::just(2).flat_map(|x| Single::just(x * 10));

        assert_eq!(single.resolve().await.unwrap(), Some(20));
    }

    #[tokio::test]
    async fn test_from_flow_rejects_a_second_value() {
        let single = Single::from_flow(Flow::from_iter(vec![1, 2]));

        let result = single.resolve().await;
        assert!(matches!(result, Err(StreamError::Cardinality(_))));
    }

    #[tokio::test]
    async fn test_from_flow_accepts_one_value() {
        let single = Single::from_flow(Flow::from_iter(vec![7]));

        assert_eq!(single.resolve().await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_zip_with_combines_pairwise() {
        let left = Single::just("A");
        let right = Single::just("D");

        let zipped = left.zip_with(&right, |a, b| format!("{a}{b}"));
        assert_eq!(zipped.resolve().await.unwrap(), Some("AD".to_string()));
    }
}
