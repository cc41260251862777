//! Observable navigation state.
//!
//! # Responsibilities
//! - Hold location, active view, params and the loading flag
//! - Describe which fields a commit changed
//!
//! # Design Decisions
//! - Observers receive a snapshot plus a change set after every commit
//! - Only the navigator mutates state; observers get clones

use crate::location::Location;
use crate::routing::Params;

/// The navigator's current view of the world.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState<V> {
    pub location: Location,
    /// View currently authoritative for rendering.
    pub active_view: Option<V>,
    /// Params of the most recently matched route.
    pub params: Params,
    /// True while the most recent navigation's loader is pending.
    pub is_loading: bool,
}

impl<V> NavigationState<V> {
    pub(crate) fn new(location: Location) -> Self {
        Self {
            location,
            active_view: None,
            params: Params::new(),
            is_loading: false,
        }
    }
}

/// Fields touched by one commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub location: bool,
    pub active_view: bool,
    pub params: bool,
    pub is_loading: bool,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        !(self.location || self.active_view || self.params || self.is_loading)
    }
}

/// Payload delivered to observers.
#[derive(Debug, Clone)]
pub struct StateUpdate<V> {
    pub state: NavigationState<V>,
    pub changes: ChangeSet,
}

/// What started a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCause {
    /// `Navigator::navigate`.
    Navigate,
    /// Back/forward reported by the history bridge.
    External,
    /// Route registration firing against the current location.
    Registration,
}

impl NavigationCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationCause::Navigate => "navigate",
            NavigationCause::External => "external",
            NavigationCause::Registration => "registration",
        }
    }
}
