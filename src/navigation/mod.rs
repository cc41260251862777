//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path) / history back-forward / register_routes
//!     → engine.rs (update location, bump navigation sequence)
//!     → routing::match_routes (route + params, or not found)
//!     → state.rs (commit view, params, loading flag; notify observers)
//!     → loader.rs + spawn.rs (run loader on the local executor)
//!     → engine.rs (commit final view if the sequence is still current)
//! ```
//!
//! # Design Decisions
//! - One state instance per navigator, mutated only by the navigator
//! - Superseded loaders run to completion; their results are discarded
//! - No timeout: a hung loader keeps `is_loading` until superseded

pub mod engine;
pub mod loader;
pub mod spawn;
pub mod state;

pub use engine::{Navigator, WeakNavigator};
pub use loader::{LoadOutcome, LoaderError, LoaderResult};
#[cfg(feature = "browser")]
pub use spawn::WasmSpawner;
pub use spawn::{LocalSpawner, TokioLocalSpawner};
pub use state::{ChangeSet, NavigationCause, NavigationState, StateUpdate};
