// Copyright (c) 2025 - Cowboy AI, Inc.
//! Flow Combinators
//!
//! Free functions combining several flows into one. All combinators are pure
//! compositions of flow definitions; subscription timing and output order
//! differ per combinator:
//!
//! | Combinator | Subscription timing | Output order |
//! |---|---|---|
//! | [`concat`] | sequential, next source after previous completes | source order |
//! | [`merge`] | all sources at run start | arrival order |
//! | [`merge_sequential`] | all sources at run start, buffered | source order |
//! | [`zip`] | all sources at run start | one combined value per index |
//!
//! # Examples
//!
//! ```rust,ignore
//! use cim_streams::{combinators, Flow};
//!
//! let first = Flow::from_iter(vec!["A", "B", "C"]);
//! let second = Flow::from_iter(vec!["D", "E", "F"]);
//!
//! let combined = combinators::concat(vec![first.clone(), second.clone()]);
//! // A, B, C, D, E, F
//!
//! let zipped = combinators::zip(first, second, |a, b| format!("{a}{b}"));
//! // AD, BE, CF
//! ```

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::flow::{until_error, Flow};

/// Concatenate flows, one after another
///
/// Each source is subscribed only once the previous source has completed, so
/// the output is all of source 1's values, then all of source 2's, and so on.
pub fn concat<T: Send + 'static>(flows: Vec<Flow<T>>) -> Flow<T> {
    Flow::from_source(move || {
        let runs = stream::iter(flows.clone()).map(|flow| flow.open());
        until_error(runs.flatten().boxed())
    })
}

/// Merge flows, interleaving values by arrival
///
/// Every source is subscribed at run start; values are forwarded in the
/// order they arrive across sources. Completes after all sources complete.
pub fn merge<T: Send + 'static>(flows: Vec<Flow<T>>) -> Flow<T> {
    Flow::from_source(move || {
        let runs: Vec<_> = flows.iter().map(|flow| flow.open()).collect();
        until_error(stream::select_all(runs).boxed())
    })
}

/// Merge flows concurrently while preserving source order
///
/// Every source is subscribed at run start and drained into a run-local
/// buffer, but the output replays the buffers in source order, so the result
/// matches [`concat`] regardless of per-source delays. Runs must execute
/// inside a tokio runtime.
pub fn merge_sequential<T: Send + 'static>(flows: Vec<Flow<T>>) -> Flow<T> {
    Flow::from_source(move || {
        let buffered: Vec<_> = flows
            .iter()
            .map(|flow| {
                let (tx, rx) = mpsc::unbounded_channel();
                let mut run = flow.open();
                tokio::spawn(async move {
                    while let Some(item) = run.next().await {
                        // Receiver dropped on early unsubscribe
                        if tx.send(item).is_err() {
                            break;
                        }
                    }
                });
                UnboundedReceiverStream::new(rx)
            })
            .collect();
        until_error(stream::iter(buffered).flatten().boxed())
    })
}

/// Combine two flows pairwise by index position
///
/// Both sources are subscribed at run start. The i-th output is
/// `combiner(a[i], b[i])`; the output ends when the shorter source
/// completes, discarding surplus values of the longer one.
pub fn zip<A, B, V, F>(left: Flow<A>, right: Flow<B>, combiner: F) -> Flow<V>
where
    A: Send + 'static,
    B: Send + 'static,
    V: Send + 'static,
    F: Fn(A, B) -> V + Send + Sync + 'static,
{
    let combiner = Arc::new(combiner);
    Flow::from_source(move || {
        let combiner = Arc::clone(&combiner);
        let zipped = left.open().zip(right.open()).map(move |pair| match pair {
            (Ok(a), Ok(b)) => Ok(combiner(a, b)),
            (Err(e), _) | (_, Err(e)) => Err(e),
        });
        until_error(zipped.boxed())
    })
}

/// Combine three flows pairwise by index position
pub fn zip3<A, B, C, V, F>(a: Flow<A>, b: Flow<B>, c: Flow<C>, combiner: F) -> Flow<V>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    V: Send + 'static,
    F: Fn(A, B, C) -> V + Send + Sync + 'static,
{
    let paired = zip(a, b, |a, b| (a, b));
    zip(paired, c, move |(a, b), c| combiner(a, b, c))
}

/// Combine four flows pairwise by index position
pub fn zip4<A, B, C, D, V, F>(
    a: Flow<A>,
    b: Flow<B>,
    c: Flow<C>,
    d: Flow<D>,
    combiner: F,
) -> Flow<V>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    V: Send + 'static,
    F: Fn(A, B, C, D) -> V + Send + Sync + 'static,
{
    let left = zip(a, b, |a, b| (a, b));
    let right = zip(c, d, |c, d| (c, d));
    zip(left, right, move |(a, b), (c, d)| combiner(a, b, c, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concat_emits_sources_in_order() {
        let first = Flow::from_iter(vec!["A", "B", "C"]);
        let second = Flow::from_iter(vec!["D", "E", "F"]);

        let values = concat(vec![first, second]).collect_to_list().await.unwrap();
        assert_eq!(values, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[tokio::test]
    async fn test_merge_emits_every_source_value() {
        let first = Flow::from_iter(vec![1, 2]);
        let second = Flow::from_iter(vec![3, 4]);

        let mut values = merge(vec![first, second]).collect_to_list().await.unwrap();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_merge_sequential_matches_concat() {
        let first = Flow::from_iter(vec!["A", "B"]);
        let second = Flow::from_iter(vec!["C", "D"]);

        let values = merge_sequential(vec![first, second])
            .collect_to_list()
            .await
            .unwrap();
        assert_eq!(values, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_zip_combines_pairwise() {
        let left = Flow::from_iter(vec!["A", "B", "C"]);
        let right = Flow::from_iter(vec!["D", "E", "F"]);

        let values = zip(left, right, |a, b| format!("{a}{b}"))
            .collect_to_list()
            .await
            .unwrap();
        assert_eq!(values, vec!["AD", "BE", "CF"]);
    }

    #[tokio::test]
    async fn test_zip_truncates_to_the_shortest_source() {
        let left = Flow::from_iter(vec![1, 2, 3]);
        let right = Flow::from_iter(vec![10, 20]);

        let values = zip(left, right, |a, b| a + b).collect_to_list().await.unwrap();
        assert_eq!(values, vec![11, 22]);
    }

    #[tokio::test]
    async fn test_zip3_combines_three_sources() {
        let a = Flow::from_iter(vec!["A", "B"]);
        let b = Flow::from_iter(vec!["C", "D"]);
        let c = Flow::from_iter(vec!["E", "F"]);

        let values = zip3(a, b, c, |a, b, c| format!("{a}{b}{c}"))
            .collect_to_list()
            .await
            .unwrap();
        assert_eq!(values, vec!["ACE", "BDF"]);
    }
}
