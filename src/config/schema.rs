//! Route table declaration schema.
//!
//! This module defines the declaration structure for the route table.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root declaration of the route table.
///
/// Declaration order is match precedence: on overlapping patterns the
/// earlier sibling wins.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Ordered route declarations.
    pub routes: Vec<RouteEntryConfig>,
}

/// A single route declaration.
///
/// The rendering mode is declared through exactly one of `fragment` /
/// `embed`. Historically both were allowed to coexist; validation now
/// rejects entries that set both or neither.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteEntryConfig {
    /// Path pattern, e.g. `/index` or `/viewer/:doc`. Segments starting
    /// with `:` bind one path segment as a parameter. Child paths are
    /// relative to their parent; a leading slash is accepted and ignored.
    pub path: String,

    /// Optional route name for direct name-based navigation.
    /// Must be unique across the whole table.
    pub name: Option<String>,

    /// Identifier of a fragment to mount natively in the host's own
    /// rendering tree. Opaque to the router.
    pub fragment: Option<String>,

    /// Source address of an isolated embedded sub-document to delegate
    /// rendering to. Must parse as a URL.
    pub embed: Option<String>,

    /// Child routes, matched relative to this entry once its own segments
    /// are consumed.
    #[serde(default)]
    pub children: Vec<RouteEntryConfig>,
}
