//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route tree (caller supplied, immutable)
//!     → path.rs (join parent + child path, normalize)
//!     → matcher.rs (compile segments, match pathname, extract params)
//!     → Return: RouteMatch { route, params } or no match
//! ```
//!
//! # Design Decisions
//! - Depth-first, pre-order search; a parent is tried before its children
//! - First match wins (tree order, not best match)
//! - Deterministic: same tree and pathname always yield the same route
//! - Path composition is pure and tested apart from the tree walk

use std::collections::BTreeMap;

pub mod matcher;
pub mod path;
pub mod route;

pub use matcher::{match_routes, PathPattern, RouteMatch, Segment};
pub use route::Route;

/// Dynamic segment values keyed by parameter name.
pub type Params = BTreeMap<String, String>;
