//! Render plan model.
//!
//! A plan is the per-navigation projection of the matched ancestor chain:
//! one node per matched level, each tagged with how that level renders.
//! Plans are immutable and serializable so hosts (and the CLI) can
//! inspect them; they are discarded after rendering.

use std::collections::HashMap;

use serde::Serialize;

use crate::embed::session::SessionId;
use crate::routing::table::{EmbedSource, FragmentRef, RouteId};

/// How one matched level is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderDirective {
    /// Mount the fragment directly in the host rendering tree.
    Native { fragment: FragmentRef },
    /// Delegate to the isolated sub-document behind `session`.
    Embedded {
        source: EmbedSource,
        session: SessionId,
    },
}

impl RenderDirective {
    pub fn is_embedded(&self) -> bool {
        matches!(self, RenderDirective::Embedded { .. })
    }
}

/// One level of the resolved plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    /// Compiled route this level renders.
    pub route: RouteId,
    /// Rendering instruction for this level.
    pub directive: RenderDirective,
    /// Next level down, when the match descended further.
    pub child: Option<Box<RenderNode>>,
}

/// Per-navigation resolved rendering tree, root level outermost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    /// Normalized path the plan was resolved for.
    pub path: String,
    /// Parameters extracted during matching.
    pub params: HashMap<String, String>,
    /// Outermost level of the plan.
    pub root: RenderNode,
}

impl RenderPlan {
    /// Levels in order, root first.
    pub fn levels(&self) -> Vec<&RenderNode> {
        let mut levels = Vec::new();
        let mut cursor = Some(&self.root);
        while let Some(node) = cursor {
            levels.push(node);
            cursor = node.child.as_deref();
        }
        levels
    }

    /// Session ids of every embedded level, root first.
    pub fn sessions(&self) -> Vec<SessionId> {
        self.levels()
            .into_iter()
            .filter_map(|node| match &node.directive {
                RenderDirective::Embedded { session, .. } => Some(*session),
                RenderDirective::Native { .. } => None,
            })
            .collect()
    }

    /// Number of levels in the plan.
    pub fn depth(&self) -> usize {
        self.levels().len()
    }
}
