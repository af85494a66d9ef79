//! Host-facing navigation router.
//!
//! # Responsibilities
//! - Own the compiled table and the embed manager
//! - Expose resolve(path, name?) as the single navigation entry point
//! - Fan navigation events out to registered handlers
//! - Forward container lifecycle events to the embed manager

use thiserror::Error;

use crate::embed::host::{EmbedEvent, EmbedHost};
use crate::embed::manager::{EmbedCreationError, EmbedManager};
use crate::embed::session::SessionId;
use crate::observability::metrics;
use crate::render::plan::RenderPlan;
use crate::render::selector::resolve_plan;
use crate::routing::matcher::{match_request, NotFoundError};
use crate::routing::table::{RouteId, RouteTable};

/// Error returned from [`ShellRouter::resolve`]. Both variants are
/// recoverable and must be handled by the host explicitly.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Navigation matched nothing; render a not-found view. Existing
    /// embed sessions are untouched.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A sub-document failed to instantiate; render an error placeholder
    /// for the slot named in the error. Other slots are unaffected.
    #[error(transparent)]
    EmbedCreation(#[from] EmbedCreationError),
}

/// Snapshot handed to `on_navigate` handlers after a successful
/// resolution.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Normalized path of the navigation.
    pub path: String,
    /// Matched chain, root first.
    pub chain: Vec<RouteId>,
    /// Live sessions of the embedded levels, root first.
    pub sessions: Vec<SessionId>,
}

type NavigateHandler = Box<dyn Fn(&NavigationEvent)>;

/// Client-side navigation router.
///
/// The host instantiates one per mounted application shell, invokes
/// [`resolve`](Self::resolve) on every navigation, and renders the
/// returned plan. Single navigation context by design: all methods take
/// `&mut self` and requests are processed strictly in call order.
pub struct ShellRouter {
    table: RouteTable,
    embeds: EmbedManager,
    handlers: Vec<NavigateHandler>,
}

impl ShellRouter {
    /// Build a router over a compiled table, delegating sub-document
    /// handling to `host`.
    pub fn new(table: RouteTable, host: Box<dyn EmbedHost>) -> Self {
        Self {
            table,
            embeds: EmbedManager::new(host),
            handlers: Vec::new(),
        }
    }

    /// Resolve one navigation to a render plan.
    ///
    /// When `name` is given the lookup goes through the name index and
    /// `path` is ignored (name-based navigation never pattern-matches).
    pub fn resolve(&mut self, path: &str, name: Option<&str>) -> Result<RenderPlan, ResolveError> {
        let result = match_request(&self.table, path, name).inspect_err(|err| {
            tracing::warn!(path, name, error = %err, "Navigation matched nothing");
            metrics::record_navigation("not_found");
        })?;

        let plan = resolve_plan(&self.table, &result, &mut self.embeds).inspect_err(|err| {
            tracing::warn!(path = result.path(), error = %err, "Navigation failed on embed creation");
            metrics::record_navigation("embed_failed");
        })?;

        metrics::record_navigation("ok");
        tracing::info!(
            path = %plan.path,
            depth = plan.depth(),
            live_sessions = self.embeds.live_count(),
            "Navigation resolved"
        );

        let event = NavigationEvent {
            path: plan.path.clone(),
            chain: result.route_ids(),
            sessions: plan.sessions(),
        };
        for handler in &self.handlers {
            handler(&event);
        }

        Ok(plan)
    }

    /// Register a handler observing every successful navigation.
    pub fn on_navigate(&mut self, handler: impl Fn(&NavigationEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Forward a container lifecycle event to the embed manager.
    pub fn handle_embed_event(&mut self, session: SessionId, event: EmbedEvent) {
        self.embeds.handle_event(session, event);
    }

    /// The compiled route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Read access to embed bookkeeping (live sessions, slot states).
    pub fn embeds(&self) -> &EmbedManager {
        &self.embeds
    }
}
