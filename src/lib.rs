//! Shell-side navigation router.
//!
//! Decides, per navigable path, whether a UI fragment mounts natively in
//! the host application's own rendering tree or is delegated to an
//! isolated embedded sub-document, and keeps those sub-documents'
//! lifecycles consistent with host navigation.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 SHELL ROUTER                  │
//!                      │                                               │
//!  Navigation          │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!  (path / name) ──────┼─▶│ routing │──▶│  render  │──▶│   embed   │  │
//!                      │  │ matcher │   │ selector │   │  manager  │  │
//!                      │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                      │       ▲                             │        │
//!                      │  ┌────┴────┐                        ▼        │
//!  RenderPlan          │  │ config  │                  ┌───────────┐  │
//!  ◀───────────────────┼──│ (table) │                  │ EmbedHost │◀─┼── container
//!                      │  └─────────┘                  │  (trait)  │  │   events
//!                      │                               └───────────┘  │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! The host invokes [`ShellRouter::resolve`] on every navigation and
//! renders the returned [`RenderPlan`]; embedded levels are delegated to
//! the host's [`EmbedHost`] container implementation.

// Core subsystems
pub mod config;
pub mod routing;

// Rendering decision and embed lifecycle
pub mod embed;
pub mod render;

// Cross-cutting concerns
pub mod navigation;
pub mod observability;

pub use config::schema::{RouteEntryConfig, RouteTableConfig};
pub use embed::host::{EmbedEvent, EmbedHost, HostError};
pub use embed::session::{EmbedSession, SessionId, SlotState};
pub use navigation::router::{NavigationEvent, ResolveError, ShellRouter};
pub use render::plan::{RenderDirective, RenderNode, RenderPlan};
pub use routing::table::{RenderMode, RouteId, RouteTable};
