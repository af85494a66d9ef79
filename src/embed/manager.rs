//! Embed lifecycle management.
//!
//! # State Machine (per embed slot)
//! ```text
//! Absent ──ensure──────────────────────▶ Active
//! Active ──ensure, mount path unchanged─▶ Active   (same session, path synced)
//! Active ──ensure, mount path changed───▶ Disposed, then a fresh Active
//! Active ──sync_scope, slot left plan───▶ Disposed
//! Disposed ──ensure on re-entry─────────▶ Active   (brand-new session)
//! ```
//!
//! # Design Decisions
//! - Disposals for slots that fell out of the plan run before any creation,
//!   so two live sub-documents never coexist for one slot
//! - Instantiation failure leaves the slot without a session and surfaces
//!   EmbedCreationError; there is no silent fallback and no automatic retry
//! - A session disposed before its Loaded event is retired; a late Loaded
//!   is answered with an immediate teardown, so no embed outlives its
//!   navigation

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::embed::host::{EmbedEvent, EmbedHost, HostError};
use crate::embed::session::{EmbedSession, SessionId, SlotState};
use crate::observability::metrics;
use crate::routing::table::{EmbedSource, RouteId};

/// Sub-document instantiation failed. Recoverable: the host renders an
/// error placeholder for this slot; other slots are unaffected.
#[derive(Debug, Clone, Error)]
#[error("embed for {slot} failed to instantiate from {embed_source}: {reason}")]
pub struct EmbedCreationError {
    pub slot: RouteId,
    pub embed_source: EmbedSource,
    pub reason: String,
}

impl EmbedCreationError {
    fn new(slot: RouteId, source: &EmbedSource, cause: HostError) -> Self {
        Self {
            slot,
            embed_source: source.clone(),
            reason: cause.to_string(),
        }
    }
}

/// Owns every embed session and drives the host container.
///
/// Mutated only from the single navigation-processing context; no
/// synchronization is needed (or provided).
#[derive(Debug)]
pub struct EmbedManager {
    host: Box<dyn EmbedHost>,
    live: HashMap<RouteId, EmbedSession>,
    /// Last disposed session id per slot.
    tombstones: HashMap<RouteId, SessionId>,
    /// Sessions disposed before their Loaded event arrived.
    retired: HashMap<SessionId, EmbedSession>,
    created_total: u64,
}

impl EmbedManager {
    pub fn new(host: Box<dyn EmbedHost>) -> Self {
        Self {
            host,
            live: HashMap::new(),
            tombstones: HashMap::new(),
            retired: HashMap::new(),
            created_total: 0,
        }
    }

    /// Ensure a live session for `slot`: create if absent, reuse if the
    /// mount path is unchanged, replace otherwise.
    ///
    /// `mount_path` is the consumed path prefix of the slot's route in the
    /// current match; `host_path` is the full navigation path pushed into
    /// the embed.
    pub fn ensure(
        &mut self,
        slot: RouteId,
        source: &EmbedSource,
        mount_path: &str,
        host_path: &str,
    ) -> Result<SessionId, EmbedCreationError> {
        let reused = match self.live.get_mut(&slot) {
            Some(session) if session.mount_path() == mount_path => {
                session.set_path(host_path);
                Some(session.id())
            }
            _ => None,
        };

        if let Some(id) = reused {
            if let Some(session) = self.live.get(&slot) {
                self.host.sync_path(session, host_path);
            }
            tracing::debug!(
                session = %id,
                slot = %slot,
                path = host_path,
                "Embed session reused"
            );
            return Ok(id);
        }

        // Same slot, different mount path (e.g. a param changed): the old
        // sub-document must be gone before the new one is created.
        if let Some(previous) = self.live.remove(&slot) {
            self.dispose(previous);
        }

        self.create(slot, source, mount_path, host_path)
    }

    /// Dispose every live session whose slot is not in `keep`. Runs before
    /// any creation of the incoming plan.
    pub fn sync_scope(&mut self, keep: &HashSet<RouteId>) {
        let stale: Vec<RouteId> = self
            .live
            .keys()
            .filter(|slot| !keep.contains(slot))
            .copied()
            .collect();

        for slot in stale {
            if let Some(session) = self.live.remove(&slot) {
                self.dispose(session);
            }
        }
    }

    /// Apply a lifecycle event reported by the host container.
    pub fn handle_event(&mut self, id: SessionId, event: EmbedEvent) {
        let slot = self
            .live
            .iter()
            .find_map(|(slot, session)| (session.id() == id).then_some(*slot));

        match event {
            EmbedEvent::Loaded => {
                if let Some(slot) = slot {
                    if let Some(session) = self.live.get_mut(&slot) {
                        session.mark_loaded();
                        tracing::debug!(session = %id, slot = %slot, "Embed loaded");
                    }
                } else if let Some(orphan) = self.retired.remove(&id) {
                    // The navigation that requested this embed was
                    // superseded; its result is discarded.
                    tracing::warn!(
                        session = %id,
                        "Superseded embed finished loading, tearing down"
                    );
                    self.host.teardown(&orphan);
                } else {
                    tracing::debug!(session = %id, "Loaded event for unknown session ignored");
                }
            }
            EmbedEvent::Failed { reason } => {
                if let Some(slot) = slot {
                    tracing::warn!(
                        session = %id,
                        slot = %slot,
                        reason = %reason,
                        "Embed load failed, disposing session"
                    );
                    if let Some(session) = self.live.remove(&slot) {
                        self.dispose(session);
                    }
                } else {
                    self.retired.remove(&id);
                }
            }
            EmbedEvent::Unloaded => {
                self.retired.remove(&id);
                if let Some(slot) = slot {
                    // The container dropped the document on its own;
                    // forget the session without another teardown.
                    tracing::warn!(
                        session = %id,
                        slot = %slot,
                        "Embed unloaded outside a navigation, dropping session"
                    );
                    if let Some(mut session) = self.live.remove(&slot) {
                        session.mark_disposed();
                        self.tombstones.insert(slot, session.id());
                        metrics::record_sessions_live(self.live.len());
                    }
                }
            }
        }
    }

    /// Current state of a slot.
    pub fn slot_state(&self, slot: RouteId) -> SlotState {
        if self.live.contains_key(&slot) {
            SlotState::Active
        } else if self.tombstones.contains_key(&slot) {
            SlotState::Disposed
        } else {
            SlotState::Absent
        }
    }

    /// The live session for a slot, if any.
    pub fn session(&self, slot: RouteId) -> Option<&EmbedSession> {
        self.live.get(&slot)
    }

    /// Number of currently live sessions.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total sessions created since construction.
    pub fn sessions_created(&self) -> u64 {
        self.created_total
    }

    fn create(
        &mut self,
        slot: RouteId,
        source: &EmbedSource,
        mount_path: &str,
        host_path: &str,
    ) -> Result<SessionId, EmbedCreationError> {
        let session = EmbedSession::new(slot, source.clone(), mount_path, host_path);

        if let Err(cause) = self.host.instantiate(&session) {
            tracing::warn!(
                slot = %slot,
                source = %source,
                error = %cause,
                "Embed instantiation failed"
            );
            metrics::record_embed_failure();
            return Err(EmbedCreationError::new(slot, source, cause));
        }

        let id = session.id();
        tracing::info!(
            session = %id,
            slot = %slot,
            mount = mount_path,
            path = host_path,
            "Embed session created"
        );
        self.created_total += 1;
        self.tombstones.remove(&slot);
        self.live.insert(slot, session);
        metrics::record_session_created();
        metrics::record_sessions_live(self.live.len());
        Ok(id)
    }

    fn dispose(&mut self, mut session: EmbedSession) {
        session.mark_disposed();
        self.host.teardown(&session);
        tracing::info!(
            session = %session.id(),
            slot = %session.slot(),
            "Embed session disposed"
        );
        self.tombstones.insert(session.slot(), session.id());
        if !session.is_loaded() {
            // Still loading on the host side; remember it so a late
            // Loaded event can be answered with a teardown.
            self.retired.insert(session.id(), session);
        }
        metrics::record_sessions_live(self.live.len());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::schema::{RouteEntryConfig, RouteTableConfig};
    use crate::routing::table::{RenderMode, RouteTable};
    use url::Url;

    #[derive(Debug, Clone, Default)]
    struct TestHost {
        calls: Rc<RefCell<Vec<String>>>,
        refuse: Rc<RefCell<bool>>,
    }

    impl TestHost {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl EmbedHost for TestHost {
        fn instantiate(&self, session: &EmbedSession) -> Result<(), HostError> {
            if *self.refuse.borrow() {
                return Err(HostError::new("container refused source"));
            }
            self.calls.borrow_mut().push(format!("create {}", session.id()));
            Ok(())
        }

        fn sync_path(&self, session: &EmbedSession, path: &str) {
            self.calls
                .borrow_mut()
                .push(format!("sync {} {}", session.id(), path));
        }

        fn teardown(&self, session: &EmbedSession) {
            self.calls.borrow_mut().push(format!("drop {}", session.id()));
        }
    }

    fn fixtures() -> (EmbedManager, TestHost, RouteId, EmbedSource) {
        let host = TestHost::default();
        let manager = EmbedManager::new(Box::new(host.clone()));

        let table = RouteTable::compile(&RouteTableConfig {
            routes: vec![RouteEntryConfig {
                path: "/mail".into(),
                embed: Some("https://embeds.example/mail".into()),
                ..Default::default()
            }],
        })
        .unwrap();
        let slot = table.roots()[0];
        let source = match &table.route(slot).render_mode {
            RenderMode::Embedded(source) => source.clone(),
            RenderMode::Native(_) => unreachable!(),
        };
        (manager, host, slot, source)
    }

    #[test]
    fn test_create_then_reuse() {
        let (mut manager, host, slot, source) = fixtures();

        let first = manager.ensure(slot, &source, "/mail", "/mail").unwrap();
        assert_eq!(manager.slot_state(slot), SlotState::Active);

        let second = manager.ensure(slot, &source, "/mail", "/mail/inbox").unwrap();
        assert_eq!(first, second);
        assert_eq!(manager.sessions_created(), 1);
        assert_eq!(manager.session(slot).unwrap().current_path(), "/mail/inbox");
        assert_eq!(
            host.calls(),
            vec![
                format!("create {}", first),
                format!("sync {} /mail/inbox", first)
            ]
        );
    }

    #[test]
    fn test_mount_change_replaces_session() {
        let (mut manager, host, slot, _) = fixtures();
        let source = EmbedSource::new(Url::parse("https://embeds.example/viewer").unwrap());

        let first = manager.ensure(slot, &source, "/viewer/a", "/viewer/a").unwrap();
        let second = manager.ensure(slot, &source, "/viewer/b", "/viewer/b").unwrap();

        assert_ne!(first, second);
        assert_eq!(manager.sessions_created(), 2);
        assert_eq!(manager.live_count(), 1);
        assert_eq!(
            host.calls(),
            vec![
                format!("create {}", first),
                format!("drop {}", first),
                format!("create {}", second)
            ]
        );
    }

    #[test]
    fn test_sync_scope_disposes_out_of_scope() {
        let (mut manager, host, slot, source) = fixtures();
        let id = manager.ensure(slot, &source, "/mail", "/mail").unwrap();

        manager.sync_scope(&HashSet::new());
        assert_eq!(manager.live_count(), 0);
        assert_eq!(manager.slot_state(slot), SlotState::Disposed);
        assert!(host.calls().contains(&format!("drop {}", id)));
    }

    #[test]
    fn test_no_reuse_after_disposal() {
        let (mut manager, _, slot, source) = fixtures();
        let first = manager.ensure(slot, &source, "/mail", "/mail").unwrap();
        manager.sync_scope(&HashSet::new());

        let second = manager.ensure(slot, &source, "/mail", "/mail").unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.sessions_created(), 2);
    }

    #[test]
    fn test_refused_instantiation_leaves_slot_absent() {
        let (mut manager, host, slot, source) = fixtures();
        *host.refuse.borrow_mut() = true;

        let err = manager.ensure(slot, &source, "/mail", "/mail").unwrap_err();
        assert_eq!(err.slot, slot);
        assert_eq!(manager.slot_state(slot), SlotState::Absent);
        assert_eq!(manager.live_count(), 0);
        assert_eq!(manager.sessions_created(), 0);
    }

    #[test]
    fn test_late_load_after_disposal_is_torn_down() {
        let (mut manager, host, slot, source) = fixtures();
        let id = manager.ensure(slot, &source, "/mail", "/mail").unwrap();

        // Superseded before Loaded arrived.
        manager.sync_scope(&HashSet::new());
        manager.handle_event(id, EmbedEvent::Loaded);

        let drops: Vec<_> = host
            .calls()
            .into_iter()
            .filter(|c| *c == format!("drop {}", id))
            .collect();
        assert_eq!(drops.len(), 2);
    }

    #[test]
    fn test_loaded_then_disposed_gets_single_teardown() {
        let (mut manager, host, slot, source) = fixtures();
        let id = manager.ensure(slot, &source, "/mail", "/mail").unwrap();
        manager.handle_event(id, EmbedEvent::Loaded);
        assert!(manager.session(slot).unwrap().is_loaded());

        manager.sync_scope(&HashSet::new());
        manager.handle_event(id, EmbedEvent::Unloaded);

        let drops: Vec<_> = host
            .calls()
            .into_iter()
            .filter(|c| *c == format!("drop {}", id))
            .collect();
        assert_eq!(drops.len(), 1);
    }

    #[test]
    fn test_failed_load_disposes_session() {
        let (mut manager, _, slot, source) = fixtures();
        let id = manager.ensure(slot, &source, "/mail", "/mail").unwrap();

        manager.handle_event(
            id,
            EmbedEvent::Failed {
                reason: "network".into(),
            },
        );
        assert_eq!(manager.live_count(), 0);
        assert_eq!(manager.slot_state(slot), SlotState::Disposed);
    }

    #[test]
    fn test_unloaded_outside_navigation_drops_session() {
        let (mut manager, host, slot, source) = fixtures();
        let id = manager.ensure(slot, &source, "/mail", "/mail").unwrap();
        manager.handle_event(id, EmbedEvent::Unloaded);

        assert_eq!(manager.live_count(), 0);
        // No teardown: the container already removed it.
        assert!(!host.calls().contains(&format!("drop {}", id)));
    }
}
