// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subscriber capability set for consuming flows

use async_trait::async_trait;
use tracing::error;

use crate::errors::StreamError;

/// Consumer of a flow's signals
///
/// A run calls `on_next` zero or more times in emission order, then exactly
/// one of `on_complete` or `on_error`. After a terminal signal no further
/// calls occur.
#[async_trait]
pub trait Subscriber<T: Send + 'static>: Send {
    /// Receive the next value
    async fn on_next(&mut self, value: T);

    /// The run completed normally
    async fn on_complete(&mut self) {}

    /// The run terminated with an error
    async fn on_error(&mut self, error: StreamError) {
        error!(error = %error, "unhandled stream error");
    }
}

/// Closure-based subscriber
///
/// Observes values only; completion is implicit in the driving future
/// resolving, and errors fall through to the default logging handler.
pub struct FnSubscriber<F> {
    on_next: F,
}

impl<F> FnSubscriber<F> {
    /// Create a subscriber from an `on_next` closure
    pub fn new(on_next: F) -> Self {
        Self { on_next }
    }
}

#[async_trait]
impl<T, F> Subscriber<T> for FnSubscriber<F>
where
    T: Send + 'static,
    F: FnMut(T) + Send,
{
    async fn on_next(&mut self, value: T) {
        (self.on_next)(value);
    }
}
