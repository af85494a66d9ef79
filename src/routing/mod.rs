//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request (path, optional name)
//!     → matcher.rs (depth-first walk / name index lookup)
//!     → Return: MatchResult (ancestor chain + params) or NotFoundError
//!
//! Table Compilation (at startup):
//!     RouteTableConfig
//!     → validate (config::validation)
//!     → parse patterns, assign RouteIds in declaration order
//!     → build name index
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - No regex: literal and single-segment param matching only
//! - Deterministic: same input always matches the same route
//! - First full match wins, in declaration order

pub mod matcher;
pub mod table;

pub use matcher::MatchResult;
pub use matcher::NotFoundError;
pub use table::RenderMode;
pub use table::RouteId;
pub use table::RouteTable;
