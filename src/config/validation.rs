//! Route table validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce global name uniqueness
//! - Enforce path uniqueness among siblings
//! - Enforce exactly one rendering mode per entry
//! - Check embed sources parse as URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before the table is compiled; navigation-time code never sees an
//!   invalid table
//! - No cycle check: children are owned values in the declaration tree, so
//!   the children relation cannot alias

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use url::Url;

use crate::config::schema::{RouteEntryConfig, RouteTableConfig};

/// A single semantic defect in a route table declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The same `name` appears on two entries anywhere in the table.
    #[error("duplicate route name {name:?} (declared at {first} and again at {second})")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    /// The same `path` appears on two sibling entries.
    #[error("duplicate sibling path {path:?} under {parent:?}")]
    DuplicatePath { path: String, parent: String },

    /// Entry declares both a native fragment and an embed source.
    #[error("route {path:?} declares both a fragment and an embed source")]
    AmbiguousRenderMode { path: String },

    /// Entry declares neither a native fragment nor an embed source.
    #[error("route {path:?} declares neither a fragment nor an embed source")]
    MissingRenderMode { path: String },

    /// Embed source does not parse as a URL.
    #[error("route {path:?} has invalid embed source {embed_source:?}: {reason}")]
    InvalidEmbedSource {
        path: String,
        embed_source: String,
        reason: String,
    },

    /// Entry path is empty (or only slashes).
    #[error("route under {parent:?} has an empty path")]
    EmptyPath { parent: String },

    /// Entry path contains a malformed segment (e.g. a bare `:`).
    #[error("route {path:?} has malformed segment {segment:?}")]
    BadSegment { path: String, segment: String },
}

/// Validate a full route table declaration, collecting every error.
pub fn validate_table(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names: HashMap<String, String> = HashMap::new();

    validate_siblings(&config.routes, "/", &mut names, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::warn!(count = errors.len(), "Route table validation failed");
        Err(errors)
    }
}

fn validate_siblings(
    entries: &[RouteEntryConfig],
    parent: &str,
    names: &mut HashMap<String, String>,
    errors: &mut Vec<ValidationError>,
) {
    let mut sibling_paths: HashSet<String> = HashSet::new();

    for entry in entries {
        let trimmed = entry.path.trim_matches('/');
        if trimmed.is_empty() {
            errors.push(ValidationError::EmptyPath {
                parent: parent.to_string(),
            });
            continue;
        }

        let full_path = join_path(parent, trimmed);

        if !sibling_paths.insert(trimmed.to_string()) {
            errors.push(ValidationError::DuplicatePath {
                path: entry.path.clone(),
                parent: parent.to_string(),
            });
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == ":" {
                errors.push(ValidationError::BadSegment {
                    path: full_path.clone(),
                    segment: segment.to_string(),
                });
            }
        }

        if let Some(name) = &entry.name {
            if let Some(first) = names.get(name) {
                errors.push(ValidationError::DuplicateName {
                    name: name.clone(),
                    first: first.clone(),
                    second: full_path.clone(),
                });
            } else {
                names.insert(name.clone(), full_path.clone());
            }
        }

        match (&entry.fragment, &entry.embed) {
            (Some(_), Some(_)) => errors.push(ValidationError::AmbiguousRenderMode {
                path: full_path.clone(),
            }),
            (None, None) => errors.push(ValidationError::MissingRenderMode {
                path: full_path.clone(),
            }),
            (None, Some(source)) => {
                if let Err(err) = Url::parse(source) {
                    errors.push(ValidationError::InvalidEmbedSource {
                        path: full_path.clone(),
                        embed_source: source.clone(),
                        reason: err.to_string(),
                    });
                }
            }
            (Some(_), None) => {}
        }

        validate_siblings(&entry.children, &full_path, names, errors);
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{}", segment)
    } else {
        format!("{}/{}", parent, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(path: &str, fragment: &str) -> RouteEntryConfig {
        RouteEntryConfig {
            path: path.into(),
            fragment: Some(fragment.into()),
            ..Default::default()
        }
    }

    fn embedded(path: &str, source: &str) -> RouteEntryConfig {
        RouteEntryConfig {
            path: path.into(),
            embed: Some(source.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_table_passes() {
        let config = RouteTableConfig {
            routes: vec![
                native("/f1", "F1"),
                embedded("/f2", "https://embeds.example/f2"),
                RouteEntryConfig {
                    path: "/index".into(),
                    fragment: Some("Index".into()),
                    children: vec![embedded("/f3", "https://embeds.example/f3")],
                    ..Default::default()
                },
            ],
        };
        assert!(validate_table(&config).is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut a = native("/a", "A");
        a.name = Some("dup".into());
        let mut b = native("/b", "B");
        b.name = Some("dup".into());

        let errors = validate_table(&RouteTableConfig { routes: vec![a, b] }).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::DuplicateName { ref name, .. } if name == "dup"
        ));
    }

    #[test]
    fn test_duplicate_name_across_depths_rejected() {
        let mut parent = native("/parent", "P");
        let mut child = native("/child", "C");
        child.name = Some("dup".into());
        parent.children = vec![child];
        let mut other = native("/other", "O");
        other.name = Some("dup".into());

        let errors =
            validate_table(&RouteTableConfig { routes: vec![parent, other] }).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::DuplicateName { .. }));
    }

    #[test]
    fn test_duplicate_sibling_path_rejected() {
        let config = RouteTableConfig {
            routes: vec![native("/a", "A1"), native("a", "A2")],
        };
        let errors = validate_table(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::DuplicatePath { .. }));
    }

    #[test]
    fn test_same_path_different_parents_allowed() {
        let mut p1 = native("/p1", "P1");
        p1.children = vec![native("/detail", "D1")];
        let mut p2 = native("/p2", "P2");
        p2.children = vec![native("/detail", "D2")];

        assert!(validate_table(&RouteTableConfig { routes: vec![p1, p2] }).is_ok());
    }

    #[test]
    fn test_ambiguous_render_mode_rejected() {
        let mut entry = native("/both", "B");
        entry.embed = Some("https://embeds.example/b".into());

        let errors = validate_table(&RouteTableConfig { routes: vec![entry] }).unwrap_err();
        assert!(matches!(errors[0], ValidationError::AmbiguousRenderMode { .. }));
    }

    #[test]
    fn test_missing_render_mode_rejected() {
        let entry = RouteEntryConfig {
            path: "/naked".into(),
            ..Default::default()
        };
        let errors = validate_table(&RouteTableConfig { routes: vec![entry] }).unwrap_err();
        assert!(matches!(errors[0], ValidationError::MissingRenderMode { .. }));
    }

    #[test]
    fn test_invalid_embed_source_rejected() {
        let errors = validate_table(&RouteTableConfig {
            routes: vec![embedded("/bad", "not a url")],
        })
        .unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidEmbedSource { .. }));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut both = native("/both", "B");
        both.embed = Some("https://embeds.example/b".into());
        let config = RouteTableConfig {
            routes: vec![
                both,
                RouteEntryConfig { path: "/naked".into(), ..Default::default() },
                embedded("/bad", "::::"),
            ],
        };
        let errors = validate_table(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_empty_path_rejected() {
        let entry = RouteEntryConfig {
            path: "/".into(),
            fragment: Some("F".into()),
            ..Default::default()
        };
        let errors = validate_table(&RouteTableConfig { routes: vec![entry] }).unwrap_err();
        assert!(matches!(errors[0], ValidationError::EmptyPath { .. }));
    }
}
