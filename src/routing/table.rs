//! Compiled route table.
//!
//! # Responsibilities
//! - Compile declarations into an immutable arena of routes
//! - Assign stable RouteIds in declaration order
//! - Precompute the name index for O(1) named lookup
//!
//! # Design Decisions
//! - Immutable after compilation (shareable without locks)
//! - The RouteId of an Embedded route doubles as its embed slot identity
//! - Patterns are parsed once into segments; matching never re-parses

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::{RouteEntryConfig, RouteTableConfig};
use crate::config::validation::{validate_table, ValidationError};

/// Stable identity of a compiled route, assigned in declaration order.
///
/// For routes rendered as embeds this is also the slot key the lifecycle
/// manager tracks sessions under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteId(usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal segment, matched byte-equal.
    Literal(String),
    /// Dynamic segment binding exactly one path segment.
    Param(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(lit) => write!(f, "{}", lit),
            Segment::Param(name) => write!(f, ":{}", name),
        }
    }
}

/// Parsed path pattern of a single route, relative to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    fn parse(raw: &str) -> Self {
        let segments = raw
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Reference to a natively mounted fragment. Opaque to the router; the
/// host's rendering layer maps it to mountable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRef(String);

impl FragmentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolvable address of an embedded sub-document. The router never
/// inspects what loads from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSource(Url);

impl EmbedSource {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for EmbedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rendering instruction attached to a route. Exactly one variant per
/// route; ambiguity is rejected at validation time, never inferred here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Mount the fragment directly in the host's rendering tree.
    Native(FragmentRef),
    /// Delegate rendering to an isolated embedded sub-document.
    Embedded(EmbedSource),
}

impl RenderMode {
    pub fn is_embedded(&self) -> bool {
        matches!(self, RenderMode::Embedded(_))
    }
}

/// A compiled route entry.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteId,
    pub pattern: PathPattern,
    pub name: Option<String>,
    pub render_mode: RenderMode,
    pub parent: Option<RouteId>,
    pub children: Vec<RouteId>,
}

/// Immutable, validated route table.
#[derive(Debug)]
pub struct RouteTable {
    nodes: Vec<Route>,
    roots: Vec<RouteId>,
    name_index: HashMap<String, RouteId>,
}

impl RouteTable {
    /// Validate and compile a declaration into an immutable table.
    pub fn compile(config: &RouteTableConfig) -> Result<Self, ConfigError> {
        validate_table(config).map_err(ConfigError::Validation)?;

        let mut table = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            name_index: HashMap::new(),
        };
        let mut errors = Vec::new();

        for entry in &config.routes {
            let id = table.add(entry, None, &mut errors);
            table.roots.push(id);
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        tracing::debug!(routes = table.nodes.len(), "Route table compiled");
        Ok(table)
    }

    fn add(
        &mut self,
        entry: &RouteEntryConfig,
        parent: Option<RouteId>,
        errors: &mut Vec<ValidationError>,
    ) -> RouteId {
        let id = RouteId(self.nodes.len());
        let full_path = self.describe_child(parent, &entry.path);

        let render_mode = match (&entry.fragment, &entry.embed) {
            (Some(fragment), _) => RenderMode::Native(FragmentRef::new(fragment.clone())),
            (None, Some(source)) => match Url::parse(source) {
                Ok(url) => RenderMode::Embedded(EmbedSource::new(url)),
                Err(err) => {
                    // Validation already vetted the source; kept as a hard
                    // error rather than an unwrap so compile stays total.
                    errors.push(ValidationError::InvalidEmbedSource {
                        path: full_path.clone(),
                        embed_source: source.clone(),
                        reason: err.to_string(),
                    });
                    RenderMode::Native(FragmentRef::new(String::new()))
                }
            },
            (None, None) => {
                errors.push(ValidationError::MissingRenderMode {
                    path: full_path.clone(),
                });
                RenderMode::Native(FragmentRef::new(String::new()))
            }
        };

        self.nodes.push(Route {
            id,
            pattern: PathPattern::parse(&entry.path),
            name: entry.name.clone(),
            render_mode,
            parent,
            children: Vec::new(),
        });

        if let Some(name) = &entry.name {
            self.name_index.insert(name.clone(), id);
        }

        for child in &entry.children {
            let child_id = self.add(child, Some(id), errors);
            self.nodes[id.0].children.push(child_id);
        }

        id
    }

    fn describe_child(&self, parent: Option<RouteId>, path: &str) -> String {
        let relative = path.trim_matches('/');
        match parent {
            Some(id) => format!("{}/{}", self.full_path(id), relative),
            None => format!("/{}", relative),
        }
    }

    /// Look up a compiled route by id. Ids are only minted by this table,
    /// so every stored id resolves.
    pub fn route(&self, id: RouteId) -> &Route {
        &self.nodes[id.0]
    }

    /// Top-level routes in declaration order.
    pub fn roots(&self) -> &[RouteId] {
        &self.roots
    }

    /// O(1) lookup through the precomputed name index.
    pub fn by_name(&self, name: &str) -> Option<RouteId> {
        self.name_index.get(name).copied()
    }

    /// Ancestor chain from a root down to `id`, inclusive.
    pub fn chain(&self, id: RouteId) -> Vec<RouteId> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.nodes[current.0].parent;
        }
        chain.reverse();
        chain
    }

    /// Canonical full path of a route, parameters shown in `:name` form.
    pub fn full_path(&self, id: RouteId) -> String {
        let mut parts: Vec<String> = self
            .chain(id)
            .into_iter()
            .map(|rid| self.nodes[rid.0].pattern.to_string())
            .collect();
        parts.insert(0, String::new());
        parts.join("/")
    }

    /// Total number of compiled routes, children included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
