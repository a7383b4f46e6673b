// Copyright (c) 2025 - Cowboy AI, Inc.
//! Flow - Lazy Multi-Value Asynchronous Sequences
//!
//! A `Flow<T>` is an ordered, lazy source of zero or more values of type `T`,
//! terminating in exactly one of a completion or an error signal.
//!
//! ```text
//! Time: ────────────────────────────→
//! Flow:      ●     ●   ●        ●   ✓
//!          next  next next    next complete
//! ```
//!
//! # Characteristics
//!
//! - **Lazy**: a flow definition performs no work until subscribed
//! - **Immutable**: operators return new flows, the source is never mutated
//! - **Isolated runs**: every subscription re-runs the production logic
//!   independently, with no state shared across runs
//!
//! # Implementation
//!
//! Each flow owns a subscription factory
//! (`Arc<dyn Fn() -> RunStream<T> + Send + Sync>`). Invoking the factory
//! starts one production run as a [`futures::Stream`] of
//! `Result<T, StreamError>` items: `Ok` values are emissions, the first `Err`
//! is the error signal, and the end of the stream is completion. Operators
//! compose factories, so the operator chain is evaluated once per
//! subscription.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_streams::Flow;
//!
//! let subjects = Flow::from_iter(vec!["workflow", "agent", "graph"]);
//! let upper = subjects.map(str::to_uppercase);
//!
//! let values = upper.collect_to_list().await?;
//! assert_eq!(values, vec!["WORKFLOW", "AGENT", "GRAPH"]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;

use futures::future::ready;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, error};

use crate::errors::{StreamError, StreamResult};
use crate::subscriber::Subscriber;

/// One production run of a flow
///
/// `Ok` items are emissions, the first `Err` item is the error signal, and
/// the end of the stream is the completion signal.
pub(crate) type RunStream<T> = BoxStream<'static, StreamResult<T>>;

/// Lazy, time-ordered source of zero or more values
///
/// Applying an operator produces a new `Flow`; nothing executes until a
/// consumer subscribes. Cloning a flow clones the definition, not a run.
pub struct Flow<T> {
    /// Factory invoked once per subscription to start an independent run
    source: Arc<dyn Fn() -> RunStream<T> + Send + Sync>,
}

impl<T> Clone for Flow<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Flow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flow<{}>", std::any::type_name::<T>())
    }
}

impl<T: Send + 'static> Flow<T> {
    /// Create a flow from a subscription factory
    pub(crate) fn from_source<F>(source: F) -> Self
    where
        F: Fn() -> RunStream<T> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
        }
    }

    /// Create a flow emitting every value of an iterable, in order
    ///
    /// The iterable is cloned for each subscription, so every run observes
    /// the full sequence.
    pub fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(move || stream::iter(values.clone().into_iter().map(Ok)).boxed())
    }

    /// Create a flow that completes without emitting
    pub fn empty() -> Self {
        Self::from_source(|| stream::empty().boxed())
    }

    /// Create a flow that signals the given error to every subscriber
    pub fn error(error: StreamError) -> Self {
        Self::from_source(move || stream::once(ready(Err(error.clone()))).boxed())
    }

    /// Create a flow from a sequence of emission results
    ///
    /// An `Err` in the sequence terminates the run at that position. Useful
    /// for sources that can fail partway through production.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = StreamResult<T>> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(move || stream::iter(results.clone()).boxed())
    }

    /// Start one independent production run
    pub(crate) fn open(&self) -> RunStream<T> {
        (self.source)()
    }

    /// Transform each value, preserving order and count
    pub fn map<U, F>(&self, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        let f = Arc::new(f);
        Flow::from_source(move || {
            let f = Arc::clone(&f);
            source().map(move |item| item.map(|value| f(value))).boxed()
        })
    }

    /// Transform each value with a fallible function
    ///
    /// A returned `Err` terminates the run with an error signal at the point
    /// of application.
    pub fn try_map<U, F>(&self, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> StreamResult<U> + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        let f = Arc::new(f);
        Flow::from_source(move || {
            let f = Arc::clone(&f);
            let run = source().map(move |item| item.and_then(|value| f(value)));
            until_error(run.boxed())
        })
    }

    /// Keep only values matching the predicate, preserving order
    pub fn filter<P>(&self, predicate: P) -> Flow<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        let predicate = Arc::new(predicate);
        Flow::from_source(move || {
            let predicate = Arc::clone(&predicate);
            source()
                .filter(move |item| {
                    ready(match item {
                        Ok(value) => predicate(value),
                        Err(_) => true,
                    })
                })
                .boxed()
        })
    }

    /// Flatten inner flows as their values arrive (unordered flatten)
    ///
    /// Every upstream value is mapped to an inner flow. All inner flows run
    /// concurrently and their values are forwarded in arrival order, not
    /// source order. The result completes only after the upstream and all
    /// inner flows have completed.
    pub fn flat_map<U, F>(&self, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Flow<U> + Send + Sync + 'static,
    {
        self.flatten_runs(f, None)
    }

    /// [`Flow::flat_map`] with a bound on concurrently running inner flows
    pub fn flat_map_with<U, F>(&self, concurrency: usize, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Flow<U> + Send + Sync + 'static,
    {
        self.flatten_runs(f, Some(concurrency))
    }

    /// Flatten inner flows strictly one at a time (ordered flatten)
    ///
    /// The next inner flow is not subscribed until the previous one has
    /// completed, so the output order exactly matches source order: all
    /// values of inner flow 1, then all values of inner flow 2, and so on.
    /// Trades latency for ordering compared to [`Flow::flat_map`].
    pub fn concat_map<U, F>(&self, f: F) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Flow<U> + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        let f = Arc::new(f);
        Flow::from_source(move || {
            let f = Arc::clone(&f);
            let runs = source().map(move |item| match item {
                Ok(value) => f(value).open(),
                Err(e) => stream::once(ready(Err(e))).boxed(),
            });
            until_error(runs.flatten().boxed())
        })
    }

    fn flatten_runs<U, F>(&self, f: F, limit: Option<usize>) -> Flow<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Flow<U> + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        let f = Arc::new(f);
        Flow::from_source(move || {
            let f = Arc::clone(&f);
            let runs = source().map(move |item| match item {
                Ok(value) => f(value).open(),
                Err(e) => stream::once(ready(Err(e))).boxed(),
            });
            until_error(runs.flatten_unordered(limit).boxed())
        })
    }

    /// Apply a function to the whole flow definition
    ///
    /// Enables reusable, named operator chains:
    ///
    /// ```rust,ignore
    /// fn normalize(flow: Flow<String>) -> Flow<String> {
    ///     flow.map(|s| s.to_uppercase()).filter(|s| s.len() > 3)
    /// }
    ///
    /// let normalized = subjects.transform(normalize);
    /// ```
    pub fn transform<U, F>(self, f: F) -> Flow<U>
    where
        F: FnOnce(Flow<T>) -> Flow<U>,
    {
        f(self)
    }

    /// Delay every element by the given duration
    ///
    /// Uses the tokio timer, so runs must execute inside a tokio runtime.
    /// Under a paused test clock the delays are logical rather than
    /// wall-clock.
    pub fn delay_elements(&self, delay: Duration) -> Flow<T> {
        let source = Arc::clone(&self.source);
        Flow::from_source(move || {
            source()
                .then(move |item| async move {
                    tokio::time::sleep(delay).await;
                    item
                })
                .boxed()
        })
    }

    /// Log every signal of each run under the given label
    ///
    /// Emits `tracing` events for subscription, values, errors, and
    /// completion.
    pub fn log(&self, label: &str) -> Flow<T>
    where
        T: fmt::Debug,
    {
        let source = Arc::clone(&self.source);
        let label = label.to_string();
        Flow::from_source(move || {
            debug!(flow = %label, "subscribed");
            let errored = Arc::new(AtomicBool::new(false));
            let seen_error = Arc::clone(&errored);
            let next_label = label.clone();
            let tail_label = label.clone();
            let mut logged_terminal = false;
            source()
                .inspect(move |item| match item {
                    Ok(value) => debug!(flow = %next_label, value = ?value, "next"),
                    Err(e) => {
                        seen_error.store(true, Ordering::Relaxed);
                        error!(flow = %next_label, error = %e, "error");
                    }
                })
                .chain(stream::poll_fn(move |_| {
                    if !logged_terminal {
                        logged_terminal = true;
                        if !errored.load(Ordering::Relaxed) {
                            debug!(flow = %tail_label, "completed");
                        }
                    }
                    Poll::Ready(None)
                }))
                .boxed()
        })
    }

    /// Concatenate another flow after this one
    ///
    /// The other flow is subscribed only once this one has completed.
    pub fn concat_with(&self, other: &Flow<T>) -> Flow<T> {
        crate::combinators::concat(vec![self.clone(), other.clone()])
    }

    /// Merge another flow with this one, interleaving by arrival
    ///
    /// Both flows are subscribed at run start.
    pub fn merge_with(&self, other: &Flow<T>) -> Flow<T> {
        crate::combinators::merge(vec![self.clone(), other.clone()])
    }

    /// Combine this flow with another pairwise by index position
    pub fn zip_with<U, V, F>(&self, other: &Flow<U>, combiner: F) -> Flow<V>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        crate::combinators::zip(self.clone(), other.clone(), combiner)
    }

    /// Drive one run, delivering every signal to the subscriber
    ///
    /// Calls `on_next` zero or more times in emission order, then exactly one
    /// terminal callback. Dropping the returned future mid-run cancels the
    /// run; no further signals are delivered.
    pub async fn subscribe<S>(&self, subscriber: &mut S)
    where
        S: Subscriber<T>,
    {
        let mut run = self.open();
        while let Some(item) = run.next().await {
            match item {
                Ok(value) => subscriber.on_next(value).await,
                Err(e) => {
                    subscriber.on_error(e).await;
                    return;
                }
            }
        }
        subscriber.on_complete().await;
    }

    /// Drive one run, passing every value to a closure
    pub async fn subscribe_with<F>(&self, on_next: F)
    where
        F: FnMut(T) + Send,
    {
        let mut subscriber = crate::subscriber::FnSubscriber::new(on_next);
        self.subscribe(&mut subscriber).await;
    }

    /// Run one subscription to completion and collect the emitted values
    ///
    /// Resolves only after the run terminates; an error signal surfaces as
    /// `Err`.
    pub async fn collect_to_list(&self) -> StreamResult<Vec<T>> {
        let mut run = self.open();
        let mut values = Vec::new();
        while let Some(item) = run.next().await {
            values.push(item?);
        }
        Ok(values)
    }
}

/// Cut a run off after its first error signal
///
/// Operators that interleave several inner runs (flatten, merge, zip) forward
/// the first `Err` and must then stop producing.
pub(crate) fn until_error<T: Send + 'static>(run: RunStream<T>) -> RunStream<T> {
    run.scan(false, |errored, item| {
        if *errored {
            return ready(None);
        }
        if item.is_err() {
            *errored = true;
        }
        ready(Some(item))
    })
    .boxed()
}
