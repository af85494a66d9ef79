//! Route table configuration subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → routing::RouteTable (compiled, immutable)
//!     → shared with the matcher and selector
//!
//! Programmatic declaration:
//!     RouteTableConfig built in code
//!     → RouteTable::compile (runs the same validation)
//! ```
//!
//! # Design Decisions
//! - The table is static: validated once at startup, never mutated afterwards
//! - Validation separates syntactic (serde) from semantic checks
//! - All semantic errors are reported at once, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::RouteEntryConfig;
pub use schema::RouteTableConfig;
pub use validation::ValidationError;
