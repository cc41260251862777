//! Route loader types.
//!
//! # Lifecycle (per navigation)
//! ```text
//! Idle → Matched → Resolved                      (route without loader)
//! Idle → Matched → Loading → Resolved | Errored  (route with loader)
//! Loading → Superseded                           (newer navigation issued)
//! ```
//!
//! # Design Decisions
//! - Loaders are boxed local futures; nothing here requires `Send`
//! - A superseded loader still runs to completion; its outcome is dropped

use std::error::Error as StdError;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use thiserror::Error;

use crate::routing::Params;

/// Failure reported by a route loader.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Plain failure description.
    #[error("loader failed: {0}")]
    Message(String),

    /// Wrapped error from the loader's own stack.
    #[error("loader failed: {0}")]
    Source(#[source] Box<dyn StdError + 'static>),
}

impl LoaderError {
    /// Build an error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap an arbitrary error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + 'static,
    {
        Self::Source(Box::new(error))
    }
}

/// Result of a loader run.
pub type LoaderResult = Result<(), LoaderError>;

/// A boxed route loader.
pub type LoaderFn = Rc<dyn Fn(Params) -> LocalBoxFuture<'static, LoaderResult>>;

/// A boxed loader error hook.
pub type ErrorHook = Rc<dyn Fn(LoaderError)>;

/// Where a navigation's loader ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Resolved,
    Errored,
    Superseded,
}

impl LoadOutcome {
    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Resolved => "resolved",
            LoadOutcome::Errored => "errored",
            LoadOutcome::Superseded => "superseded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(LoaderError::msg("boom").to_string(), "loader failed: boom");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = LoaderError::new(io);
        assert_eq!(err.to_string(), "loader failed: disk");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(LoadOutcome::Resolved.as_str(), "resolved");
        assert_eq!(LoadOutcome::Errored.as_str(), "errored");
        assert_eq!(LoadOutcome::Superseded.as_str(), "superseded");
    }
}
