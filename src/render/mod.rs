//! Render-mode selection subsystem.
//!
//! # Data Flow
//! ```text
//! MatchResult (from routing)
//!     → selector.rs (project chain into a plan)
//!         → embed::EmbedManager (scope sync, then ensure per embedded level)
//!     → Return: RenderPlan or EmbedCreationError
//! ```
//!
//! # Design Decisions
//! - The tag of every plan node is read straight from the compiled render
//!   mode; nothing is inferred at resolution time
//! - The selector never mutates the route table; it only projects it
//! - A broken embed fails the resolution, it never renders as nothing

pub mod plan;
pub mod selector;

pub use plan::RenderDirective;
pub use plan::RenderNode;
pub use plan::RenderPlan;
