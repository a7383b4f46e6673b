// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for stream operations

use thiserror::Error;

/// Errors that can terminate a production run
///
/// A run delivers at most one of these to its subscriber, after which no
/// further signals occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Upstream source failed while emitting a value
    #[error("Source error: {0}")]
    Source(String),

    /// An operator function failed at its point of application
    #[error("Operator error: {0}")]
    Operator(String),

    /// A single-value flow was offered more than one value
    #[error("Cardinality violation: {0}")]
    Cardinality(String),

    /// Generic stream error
    #[error("Stream error: {0}")]
    Generic(String),
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;
