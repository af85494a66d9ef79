//! Route matching logic.
//!
//! # Responsibilities
//! - Resolve a request path to exactly one route, nested children included
//! - Resolve a route name through the precomputed index
//! - Extract path parameters from dynamic segments
//!
//! # Design Decisions
//! - Depth-first walk in declaration order; first full match wins
//! - Earlier siblings take precedence on overlapping patterns
//! - Recursion descends into children only once the parent's segment
//!   prefix matched; unmatched remainders backtrack to later siblings
//! - Name lookup never runs pattern matching
//! - Pure function of the table and the request; no side effects

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::table::{RouteId, RouteTable, Segment};

/// Navigation matched nothing. Recoverable: the host renders its
/// not-found view and existing embed sessions stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    /// No route pattern matches the full requested path.
    #[error("no route matches path {path:?}")]
    Path { path: String },

    /// No route carries the requested name.
    #[error("no route is named {name:?}")]
    Name { name: String },
}

/// One level of a match: the route plus the portion of the request path
/// consumed up to and including this level (parameters substituted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLevel {
    route: RouteId,
    prefix: String,
}

impl MatchedLevel {
    pub fn route(&self) -> RouteId {
        self.route
    }

    /// Consumed path prefix, e.g. `/index` for the first level of a
    /// `/index/f3` match. For an embedded route this is the slot's mount
    /// path: as long as it is unchanged across navigations, the slot's
    /// session is reused.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Result of one navigation match: the ordered ancestor chain from root
/// to the deepest matching route, plus extracted parameters.
///
/// Constructed fresh per navigation and consumed by the render-mode
/// selector; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    levels: Vec<MatchedLevel>,
    params: HashMap<String, String>,
    path: String,
}

impl MatchResult {
    /// Ancestor chain, root first.
    pub fn levels(&self) -> &[MatchedLevel] {
        &self.levels
    }

    /// Route ids of the chain, root first.
    pub fn route_ids(&self) -> Vec<RouteId> {
        self.levels.iter().map(MatchedLevel::route).collect()
    }

    /// The deepest matched route.
    pub fn deepest(&self) -> RouteId {
        // levels is never empty: both constructors push at least one level
        self.levels[self.levels.len() - 1].route
    }

    /// Parameters bound by dynamic segments. Empty for name-based matches.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Normalized path the match was resolved for.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Resolve a navigation request against the table.
///
/// When `name` is given the path is ignored: name-based navigation goes
/// straight through the name index and never pattern-matches.
pub fn match_request(
    table: &RouteTable,
    path: &str,
    name: Option<&str>,
) -> Result<MatchResult, NotFoundError> {
    match name {
        Some(name) => match_name(table, name),
        None => match_path(table, path),
    }
}

/// O(1) name lookup returning the named route plus its ancestor chain.
pub fn match_name(table: &RouteTable, name: &str) -> Result<MatchResult, NotFoundError> {
    let id = table.by_name(name).ok_or_else(|| NotFoundError::Name {
        name: name.to_string(),
    })?;

    let levels: Vec<MatchedLevel> = table
        .chain(id)
        .into_iter()
        .map(|route| MatchedLevel {
            route,
            prefix: table.full_path(route),
        })
        .collect();
    let path = table.full_path(id);

    Ok(MatchResult {
        levels,
        params: HashMap::new(),
        path,
    })
}

/// Depth-first path match in declaration order; first full match wins.
pub fn match_path(table: &RouteTable, path: &str) -> Result<MatchResult, NotFoundError> {
    let segments: Vec<&str> = path_segments(path).collect();
    let not_found = || NotFoundError::Path {
        path: path.to_string(),
    };

    if segments.is_empty() {
        return Err(not_found());
    }

    for root in table.roots() {
        if let Some((chain, params)) = match_node(table, *root, &segments) {
            return Ok(assemble(&segments, chain, params));
        }
    }

    Err(not_found())
}

/// Split a request path into its segments, dropping query and fragment
/// suffixes and empty segments.
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path
        .split_once('?')
        .map_or(path, |(before, _)| before);
    let path = path
        .split_once('#')
        .map_or(path, |(before, _)| before);
    path.split('/').filter(|s| !s.is_empty())
}

/// Try to match `remaining` starting at `id`. Returns the chain of
/// (route, segments consumed by that route) plus bound params on success.
#[allow(clippy::type_complexity)]
fn match_node(
    table: &RouteTable,
    id: RouteId,
    remaining: &[&str],
) -> Option<(Vec<(RouteId, usize)>, Vec<(String, String)>)> {
    let route = table.route(id);
    let pattern = route.pattern.segments();
    if pattern.len() > remaining.len() {
        return None;
    }

    let mut params = Vec::new();
    for (segment, request) in pattern.iter().zip(remaining) {
        match segment {
            Segment::Literal(lit) => {
                if lit != request {
                    return None;
                }
            }
            Segment::Param(key) => params.push((key.clone(), (*request).to_string())),
        }
    }

    let rest = &remaining[pattern.len()..];
    if rest.is_empty() {
        return Some((vec![(id, pattern.len())], params));
    }

    for child in &route.children {
        if let Some((mut chain, mut child_params)) = match_node(table, *child, rest) {
            chain.insert(0, (id, pattern.len()));
            params.append(&mut child_params);
            return Some((chain, params));
        }
    }

    None
}

fn assemble(
    segments: &[&str],
    chain: Vec<(RouteId, usize)>,
    params: Vec<(String, String)>,
) -> MatchResult {
    let mut levels = Vec::with_capacity(chain.len());
    let mut consumed = 0;
    for (route, count) in chain {
        consumed += count;
        levels.push(MatchedLevel {
            route,
            prefix: format!("/{}", segments[..consumed].join("/")),
        });
    }

    MatchResult {
        levels,
        params: params.into_iter().collect(),
        path: format!("/{}", segments.join("/")),
    }
}
