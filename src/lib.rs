//! Nested client-side routing with async route loaders.
//!
//! # Architecture Overview
//!
//! ```text
//!   navigate(path)          browser back/forward
//!        │                          │
//!        ▼                          ▼
//!  ┌───────────┐   push     ┌──────────────┐
//!  │ location  │◀───────────│   history    │  HistoryBridge (memory / browser)
//!  │  parser   │  re-parse  │    bridge    │
//!  └─────┬─────┘            └──────────────┘
//!        │ Location
//!        ▼
//!  ┌────────────┐  match   ┌──────────────┐
//!  │ navigation │─────────▶│   routing    │  depth-first, first match wins
//!  │   engine   │◀─────────│   matcher    │
//!  └─────┬──────┘  params  └──────────────┘
//!        │ loader (local task, sequence-checked)
//!        ▼
//!  NavigationState { location, active_view, params, is_loading }
//!        │
//!        ▼
//!  observers (rendering layer)
//! ```
//!
//! Cross-cutting: `config` (TOML, validated), `observability` (tracing, metrics).

pub mod config;
pub mod history;
pub mod location;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod subscription;

pub use config::RouterConfig;
pub use history::{HistoryBridge, MemoryHistory};
pub use location::{parse_path, Location};
pub use navigation::{
    ChangeSet, LoaderError, LoaderResult, LocalSpawner, NavigationState, Navigator, StateUpdate,
    TokioLocalSpawner, WeakNavigator,
};
pub use routing::{match_routes, Params, Route, RouteMatch};
pub use subscription::Subscription;
