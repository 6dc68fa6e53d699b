use crate::path::PathSegment;
use css::serialize_identifier;
use serde::{Deserialize, Serialize};

pub const WILDCARD: &str = "*";
const CHILD: &str = " > ";

/// A generalized query: `relative_query` runs under the node `scope_selector` resolves to;
/// `full_query` is their composition for display and document-wide execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub scope_selector: String,
    pub relative_query: String,
    pub full_query: String,
    /// Generalized levels below the scope; matches must sit exactly this deep.
    pub depth: usize,
}

impl Pattern {
    pub fn compose(scope_selector: String, relative_query: String, depth: usize) -> Self {
        let full_query = if scope_selector.is_empty() {
            relative_query.clone()
        } else {
            format!("{scope_selector}{CHILD}{relative_query}")
        };
        Self {
            scope_selector,
            relative_query,
            full_query,
            depth,
        }
    }

    pub fn has_wildcard(&self) -> bool {
        self.relative_query
            .split(CHILD)
            .any(|segment| segment == WILDCARD)
    }
}

/// Merge two structural paths level by level.
///
/// Only `min(len_a, len_b)` levels take part; deeper levels of the longer path are dropped.
/// Equal tags keep the tag plus every class present on both sides. Differing tags become a
/// wildcard and all class information at that level is discarded.
pub fn generalize(path_a: &[PathSegment], path_b: &[PathSegment], scope_selector: String) -> Pattern {
    let segments = generalize_segments(path_a, path_b);
    let depth = segments.len();
    let relative_query = if segments.is_empty() {
        WILDCARD.to_string()
    } else {
        segments.join(CHILD)
    };
    if path_a.len() != path_b.len() {
        log::debug!(
            target: "pattern.generalize",
            "path lengths differ ({} vs {}); generalizing over {depth} level(s)",
            path_a.len(),
            path_b.len()
        );
    }
    Pattern::compose(scope_selector, relative_query, depth)
}

pub(crate) fn generalize_segments(
    path_a: &[PathSegment],
    path_b: &[PathSegment],
) -> Vec<String> {
    path_a
        .iter()
        .zip(path_b)
        .enumerate()
        .map(|(level, (a, b))| {
            if a.tag != b.tag {
                log::trace!(
                    target: "pattern.generalize",
                    "level {level}: <{}> vs <{}> diverge",
                    a.tag,
                    b.tag
                );
                return WILDCARD.to_string();
            }
            let mut segment = serialize_identifier(&a.tag);
            for class in a.classes.intersection(&b.classes) {
                segment.push('.');
                segment.push_str(&serialize_identifier(class));
            }
            segment
        })
        .collect()
}
