//! Session history bridge.
//!
//! # Data Flow
//! ```text
//! Navigator::navigate(path)
//!     → HistoryBridge::push_entry(path)        (no notification)
//!
//! back / forward (browser or MemoryHistory::go)
//!     → external navigation callback
//!     → Navigator re-parses HistoryBridge::current_url()
//! ```
//!
//! # Design Decisions
//! - The navigator only sees this trait; the browser binding is optional
//! - Pushing an entry never fires the external navigation callback
//! - Bridge failures are logged by the implementation and reported to the
//!   navigator as a `false` push, never as an error

use crate::subscription::Subscription;

#[cfg(feature = "browser")]
pub mod browser;
pub mod memory;

#[cfg(feature = "browser")]
pub use browser::BrowserHistory;
pub use memory::MemoryHistory;

/// What the navigator needs from the host's session history.
pub trait HistoryBridge {
    /// Record a new navigable entry without reloading.
    ///
    /// Returns false when the entry could not be recorded. The navigator still
    /// commits the location, so history and state disagree until the next
    /// successful push or external navigation.
    fn push_entry(&self, url: &str) -> bool;

    /// The full current URL.
    fn current_url(&self) -> String;

    /// Register `callback` for back/forward navigation done outside the navigator.
    fn on_external_navigation(&self, callback: Box<dyn Fn()>) -> Subscription;
}
