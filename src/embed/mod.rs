//! Embed lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Render-mode selector (per navigation):
//!     → manager.rs sync_scope (dispose slots that left the plan)
//!     → manager.rs ensure (create or reuse a session per embedded level)
//!     → host.rs EmbedHost (instantiate / sync_path / teardown)
//!
//! Host container (async, its own loading):
//!     → manager.rs handle_event (loaded / failed / unloaded)
//! ```
//!
//! # Design Decisions
//! - Bookkeeping is synchronous and atomic per navigation event; only the
//!   sub-document's own loading is asynchronous, behind the EmbedHost seam
//! - At most one live session per slot; disposed sessions are never reused
//! - Out-of-scope disposals always run before new creations

pub mod host;
pub mod manager;
pub mod session;

pub use host::EmbedEvent;
pub use host::EmbedHost;
pub use host::HostError;
pub use manager::EmbedCreationError;
pub use manager::EmbedManager;
pub use session::EmbedSession;
pub use session::SessionId;
pub use session::SlotState;
