//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or string
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → handed to Navigator::with_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the navigator is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{MatchTrigger, ObservabilityConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
