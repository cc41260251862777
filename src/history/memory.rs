//! In-memory session history.
//!
//! # Responsibilities
//! - Keep an entry stack with a cursor, like a browser tab
//! - Resolve pushed urls against the current entry
//! - Notify listeners when the cursor moves (back/forward/go)

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use url::Url;

use crate::history::HistoryBridge;
use crate::subscription::{ListenerSet, Subscription};

const DEFAULT_ORIGIN: &str = "http://localhost/";

/// A [`HistoryBridge`] backed by a vector of absolute urls.
pub struct MemoryHistory {
    entries: RefCell<Vec<Url>>,
    cursor: Cell<usize>,
    listeners: Rc<ListenerSet<()>>,
}

impl MemoryHistory {
    /// History with a single entry at `http://localhost/`.
    pub fn new() -> Self {
        let start = Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url");
        Self::starting_at(start)
    }

    /// History whose first entry is `url`.
    pub fn with_url(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::starting_at(Url::parse(url)?))
    }

    fn starting_at(start: Url) -> Self {
        Self {
            entries: RefCell::new(vec![start]),
            cursor: Cell::new(0),
            listeners: ListenerSet::new(),
        }
    }

    /// Move one entry back. Returns false at the first entry.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward. Returns false at the last entry.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta`, notifying listeners if it moved.
    pub fn go(&self, delta: isize) -> bool {
        let len = self.entries.borrow().len();
        let current = self.cursor.get();
        let Some(target) = current.checked_add_signed(delta).filter(|t| *t < len) else {
            tracing::debug!(delta, current, len, "History traversal out of range");
            return false;
        };
        if target == current {
            return false;
        }

        self.cursor.set(target);
        tracing::debug!(from = current, to = target, "History traversal");
        self.listeners.emit(());
        true
    }

    /// All entries as strings, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().iter().map(Url::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn index(&self) -> usize {
        self.cursor.get()
    }

    /// Number of registered external navigation callbacks.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBridge for MemoryHistory {
    fn push_entry(&self, url: &str) -> bool {
        let mut entries = self.entries.borrow_mut();
        let cursor = self.cursor.get();
        let resolved = match entries[cursor].join(url) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(url, error = %e, "Ignoring unresolvable history entry");
                return false;
            }
        };

        entries.truncate(cursor + 1);
        entries.push(resolved);
        self.cursor.set(cursor + 1);
        true
    }

    fn current_url(&self) -> String {
        self.entries.borrow()[self.cursor.get()].to_string()
    }

    fn on_external_navigation(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.listeners.insert(Rc::new(move |_: &()| callback()))
    }
}
