//! Location subsystem.
//!
//! # Data Flow
//! ```text
//! navigate("/user/42?tab=posts#top")    history href "http://host/user/42"
//!     → parser.rs (absolute URL or manual split)
//!     → Location { pathname, search, hash }
//!     → replaces NavigationState.location wholesale
//! ```
//!
//! # Design Decisions
//! - Parsing never fails; anything that is not an absolute URL is split by hand
//! - Location is an immutable value, replaced rather than patched

pub mod parser;

pub use parser::{parse_path, Location};
