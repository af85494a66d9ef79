//! Host container boundary.
//!
//! # Responsibilities
//! - Define the contract the host's sub-document container implements
//! - Carry lifecycle events back from the container
//!
//! # Design Decisions
//! - The router never inspects sub-document contents; it only sees
//!   lifecycle events
//! - `instantiate` begins an asynchronous load on the host side; the
//!   manager's bookkeeping stays synchronous
//! - Path synchronization is one-way, host → embed
//! - No Send/Sync bounds: navigation is processed from a single
//!   host-controlled context

use thiserror::Error;

use crate::embed::session::EmbedSession;

/// Error reported by the host container when it refuses to instantiate a
/// sub-document.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct HostError {
    reason: String,
}

impl HostError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Lifecycle events the host container reports back per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedEvent {
    /// The sub-document finished loading.
    Loaded,
    /// The sub-document failed to load after instantiation started.
    Failed { reason: String },
    /// The container removed the sub-document.
    Unloaded,
}

/// Contract the host's embed container implements.
///
/// Implementations mount and unmount the isolated sub-documents; the
/// manager drives them and owns all session bookkeeping.
pub trait EmbedHost: std::fmt::Debug {
    /// Begin instantiating the isolated sub-document for `session`,
    /// loading from `session.source()`. Returns an error if the container
    /// refuses the source outright; loading itself continues
    /// asynchronously and is reported via [`EmbedEvent`].
    fn instantiate(&self, session: &EmbedSession) -> Result<(), HostError>;

    /// Push the current host path into the running sub-document.
    fn sync_path(&self, session: &EmbedSession, path: &str);

    /// Remove the sub-document and release its resources.
    fn teardown(&self, session: &EmbedSession);
}
