//! Embed session records.
//!
//! # Responsibilities
//! - Represent one live isolated sub-document
//! - Track the slot it renders, its mount path and last synced path
//! - Carry the disposed flag that makes reuse-after-disposal impossible

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routing::table::{EmbedSource, RouteId};

/// Unique identity of one embed instantiation. Never reused: a slot that
/// is disposed and re-entered gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an embed slot as observed by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No session has ever been created for the slot, or creation failed.
    Absent,
    /// A live session exists.
    Active,
    /// The most recent session was disposed; re-entry creates a new one.
    Disposed,
}

/// Live lifecycle record for one instantiated embed.
///
/// Owned exclusively by the [`EmbedManager`](crate::embed::EmbedManager);
/// hosts observe it through `&EmbedSession` borrows at the container
/// boundary.
#[derive(Debug, Clone)]
pub struct EmbedSession {
    id: SessionId,
    slot: RouteId,
    source: EmbedSource,
    mount_path: String,
    current_path: String,
    created_at: Instant,
    loaded: bool,
    disposed: bool,
}

impl EmbedSession {
    pub(crate) fn new(slot: RouteId, source: EmbedSource, mount_path: &str, path: &str) -> Self {
        Self {
            id: SessionId::new(),
            slot,
            source,
            mount_path: mount_path.to_string(),
            current_path: path.to_string(),
            created_at: Instant::now(),
            loaded: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The route entry this session renders; also the slot key.
    pub fn slot(&self) -> RouteId {
        self.slot
    }

    pub fn source(&self) -> &EmbedSource {
        &self.source
    }

    /// Host path prefix the embed was mounted at. Stable for the session's
    /// lifetime; a navigation that changes it replaces the session.
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// Last host-synchronized path. The sandbox may have navigated further
    /// internally; that divergence is invisible here (sync is one-way).
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// True once the host reported the sub-document loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(crate) fn set_path(&mut self, path: &str) {
        self.current_path = path.to_string();
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub(crate) fn mark_disposed(&mut self) {
        self.disposed = true;
    }
}
