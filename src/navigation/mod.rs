//! Navigation facade subsystem.
//!
//! # Data Flow
//! ```text
//! Host navigation event (path or name)
//!     → router.rs resolve
//!         → routing::matcher (match)
//!         → render::selector (plan + embed sync)
//!     → Return: RenderPlan or ResolveError
//!     → registered on_navigate handlers observe the outcome
//!
//! Host container events (loaded / failed / unloaded)
//!     → router.rs handle_embed_event → embed::EmbedManager
//! ```
//!
//! # Design Decisions
//! - Navigation requests are processed strictly in call order
//! - Errors are explicit results the host must handle, never panics
//! - Handlers observe successful navigations only

pub mod router;

pub use router::NavigationEvent;
pub use router::ResolveError;
pub use router::ShellRouter;
