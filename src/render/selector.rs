//! Render-mode selection.
//!
//! # Responsibilities
//! - Project a MatchResult into a RenderPlan, root level outermost
//! - Tag each level straight from the compiled render mode
//! - Drive embed bookkeeping in the required order: out-of-scope
//!   disposals first, then creations root → leaf
//!
//! # Design Decisions
//! - No inference: an ambiguous declaration was already rejected at
//!   validation time, so the compiled mode is authoritative
//! - Children of an embedded route resolve independently; they are not
//!   proxied into the parent's sub-document
//! - A failed embed aborts the resolution; sessions already ensured for
//!   earlier levels of the same plan stay live and are not rolled back

use std::collections::HashSet;

use crate::embed::manager::{EmbedCreationError, EmbedManager};
use crate::render::plan::{RenderDirective, RenderNode, RenderPlan};
use crate::routing::matcher::MatchResult;
use crate::routing::table::{RenderMode, RouteId, RouteTable};

/// Project a match into a render plan, synchronizing embed sessions.
pub fn resolve_plan(
    table: &RouteTable,
    result: &MatchResult,
    embeds: &mut EmbedManager,
) -> Result<RenderPlan, EmbedCreationError> {
    // Slots that survive this navigation. Everything else is disposed
    // before any creation runs, so two sub-documents never coexist for
    // one slot.
    let keep: HashSet<RouteId> = result
        .levels()
        .iter()
        .filter(|level| table.route(level.route()).render_mode.is_embedded())
        .map(|level| level.route())
        .collect();
    embeds.sync_scope(&keep);

    let mut directives = Vec::with_capacity(result.levels().len());
    for level in result.levels() {
        let route = table.route(level.route());
        let directive = match &route.render_mode {
            RenderMode::Native(fragment) => RenderDirective::Native {
                fragment: fragment.clone(),
            },
            RenderMode::Embedded(source) => {
                let session =
                    embeds.ensure(route.id, source, level.prefix(), result.path())?;
                RenderDirective::Embedded {
                    source: source.clone(),
                    session,
                }
            }
        };
        directives.push((route.id, directive));
    }

    let mut child: Option<Box<RenderNode>> = None;
    while let Some((route, directive)) = directives.pop() {
        child = Some(Box::new(RenderNode {
            route,
            directive,
            child,
        }));
    }
    let root = *child.expect("a match result always has at least one level");

    Ok(RenderPlan {
        path: result.path().to_string(),
        params: result.params().clone(),
        root,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::schema::{RouteEntryConfig, RouteTableConfig};
    use crate::embed::host::{EmbedHost, HostError};
    use crate::embed::session::EmbedSession;
    use crate::routing::matcher::match_path;

    #[derive(Debug, Clone, Default)]
    struct NullHost {
        instantiated: Rc<RefCell<usize>>,
    }

    impl EmbedHost for NullHost {
        fn instantiate(&self, _session: &EmbedSession) -> Result<(), HostError> {
            *self.instantiated.borrow_mut() += 1;
            Ok(())
        }

        fn sync_path(&self, _session: &EmbedSession, _path: &str) {}

        fn teardown(&self, _session: &EmbedSession) {}
    }

    fn table() -> RouteTable {
        RouteTable::compile(&RouteTableConfig {
            routes: vec![
                RouteEntryConfig {
                    path: "/f1".into(),
                    fragment: Some("F1".into()),
                    ..Default::default()
                },
                RouteEntryConfig {
                    path: "/index".into(),
                    fragment: Some("Index".into()),
                    children: vec![RouteEntryConfig {
                        path: "/f3".into(),
                        embed: Some("https://embeds.example/f3".into()),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_plan_mirrors_declared_modes() {
        let table = table();
        let host = NullHost::default();
        let mut embeds = EmbedManager::new(Box::new(host.clone()));

        let result = match_path(&table, "/index/f3").unwrap();
        let plan = resolve_plan(&table, &result, &mut embeds).unwrap();

        let levels = plan.levels();
        assert_eq!(levels.len(), 2);
        assert!(!levels[0].directive.is_embedded());
        assert!(levels[1].directive.is_embedded());
        assert_eq!(plan.sessions().len(), 1);
        assert_eq!(*host.instantiated.borrow(), 1);
    }

    #[test]
    fn test_native_only_plan_touches_no_sessions() {
        let table = table();
        let mut embeds = EmbedManager::new(Box::new(NullHost::default()));

        let result = match_path(&table, "/f1").unwrap();
        let plan = resolve_plan(&table, &result, &mut embeds).unwrap();

        assert_eq!(plan.depth(), 1);
        assert!(plan.sessions().is_empty());
        assert_eq!(embeds.live_count(), 0);
    }

    #[test]
    fn test_plan_serializes_for_hosts() {
        let table = table();
        let mut embeds = EmbedManager::new(Box::new(NullHost::default()));

        let result = match_path(&table, "/index/f3").unwrap();
        let plan = resolve_plan(&table, &result, &mut embeds).unwrap();

        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["path"], "/index/f3");
        assert_eq!(value["root"]["directive"]["mode"], "native");
        assert_eq!(
            value["root"]["child"]["directive"]["mode"],
            "embedded"
        );
    }
}
