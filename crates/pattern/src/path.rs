//! Ancestor chains and structural paths.

use crate::capability::ReservedClasses;
use crate::error::PathError;
use html::{Document, NodeId};
use serde::Serialize;
use std::collections::BTreeSet;

/// One node's position among its parent's element children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub tag: String,
    pub sibling_index: usize,
    pub same_tag_index: usize,
    pub same_tag_sibling_count: usize,
    /// Non-reserved classes, sorted.
    pub classes: BTreeSet<String>,
}

/// Root-to-leaf segments from (exclusive) an ancestor down to (inclusive) a target. Index `i`
/// in two paths relative to the same ancestor refers to the same tree depth.
pub type StructuralPath = Vec<PathSegment>;

/// Elements from just below the scoping root down to `node` (inclusive), root first.
///
/// The walk also stops at the document element and at the first non-element, so nodes outside
/// the body (or detached subtrees) yield the chain up to wherever their ancestry ends.
pub fn ancestor_path(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let root = doc.scoping_root();
    let document_element = doc.document_element();
    let mut path = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        if id == root || Some(id) == document_element || !doc.is_element(id) {
            break;
        }
        path.push(id);
        current = doc.parent(id);
    }
    path.reverse();
    path
}

/// Structural path of `node` below `ancestor`.
///
/// Fails with [`PathError::NotAnAncestor`], carrying the levels collected so far, when the
/// parent chain of `node` never reaches `ancestor`.
pub fn relative_path(
    doc: &Document,
    node: NodeId,
    ancestor: NodeId,
    reserved: &dyn ReservedClasses,
) -> Result<StructuralPath, PathError> {
    let mut path = Vec::new();
    let mut current = node;
    while current != ancestor {
        let Some(parent) = doc.parent(current) else {
            path.reverse();
            return Err(PathError::NotAnAncestor {
                node,
                ancestor,
                partial: path,
            });
        };
        path.push(segment(doc, current, parent, reserved));
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Number of parent steps from `node` up to `ancestor`, or `None` if it is not an ancestor.
pub fn relative_depth(doc: &Document, node: NodeId, ancestor: NodeId) -> Option<usize> {
    let mut depth = 0;
    let mut current = node;
    while current != ancestor {
        current = doc.parent(current)?;
        depth += 1;
    }
    Some(depth)
}

fn segment(
    doc: &Document,
    node: NodeId,
    parent: NodeId,
    reserved: &dyn ReservedClasses,
) -> PathSegment {
    let tag = doc.tag_name(node).unwrap_or_default();
    let mut sibling_index = 0;
    let mut same_tag_index = 0;
    let mut same_tag_sibling_count = 0;
    for (i, sibling) in doc.element_children(parent).enumerate() {
        if sibling == node {
            sibling_index = i;
            same_tag_index = same_tag_sibling_count;
        }
        if doc.tag_name(sibling) == Some(tag) {
            same_tag_sibling_count += 1;
        }
    }
    let classes = doc
        .class_list(node)
        .into_iter()
        .filter(|c| !reserved.is_reserved(c))
        .map(str::to_string)
        .collect();
    PathSegment {
        tag: tag.to_string(),
        sibling_index,
        same_tag_index,
        same_tag_sibling_count,
        classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::ReservedPrefix;
    use html::parse_document;

    fn reserved() -> ReservedPrefix {
        ReservedPrefix("element-selector-".to_string())
    }

    fn find(doc: &Document, selector: &str) -> NodeId {
        css::query_all(doc, None, selector).unwrap()[0]
    }

    const PAGE: &str = "<html><body><main><h2>t</h2><ul class=list>\
        <li class=\"a element-selector-selected\">1</li><p></p><li class=\"b a\"><em>2</em></li>\
        </ul></main></body></html>";

    #[test]
    fn ancestor_path_stops_below_body() {
        let doc = parse_document(PAGE);
        let em = find(&doc, "em");
        let path: Vec<_> = ancestor_path(&doc, em)
            .into_iter()
            .map(|n| doc.tag_name(n).unwrap())
            .collect();
        assert_eq!(path, vec!["main", "ul", "li", "em"]);
        assert!(ancestor_path(&doc, doc.scoping_root()).is_empty());
    }

    #[test]
    fn relative_path_records_positions_and_classes() {
        let doc = parse_document(PAGE);
        let main = find(&doc, "main");
        let em = find(&doc, "em");
        let path = relative_path(&doc, em, main, &reserved()).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].tag, "ul");
        assert_eq!(path[0].sibling_index, 1);
        assert_eq!(path[1].tag, "li");
        assert_eq!(path[1].sibling_index, 2);
        assert_eq!(path[1].same_tag_index, 1);
        assert_eq!(path[1].same_tag_sibling_count, 2);
        assert_eq!(
            path[1].classes.iter().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(path[2].tag, "em");
        assert_eq!(path[2].same_tag_sibling_count, 1);
    }

    #[test]
    fn reserved_classes_are_excluded() {
        let doc = parse_document(PAGE);
        let ul = find(&doc, "ul");
        let first = find(&doc, "li");
        let path = relative_path(&doc, first, ul, &reserved()).unwrap();
        assert_eq!(path[0].classes.iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn relative_path_to_self_is_empty() {
        let doc = parse_document(PAGE);
        let ul = find(&doc, "ul");
        assert_eq!(relative_path(&doc, ul, ul, &reserved()).unwrap(), vec![]);
        assert_eq!(relative_depth(&doc, ul, ul), Some(0));
    }

    #[test]
    fn non_ancestor_is_a_structural_error_with_partial_path() {
        let doc = parse_document(PAGE);
        let em = find(&doc, "em");
        let h2 = find(&doc, "h2");
        let err = relative_path(&doc, em, h2, &reserved()).unwrap_err();
        let PathError::NotAnAncestor { partial, .. } = err;
        // em, li, ul, main, body, html: everything up to the document node.
        assert_eq!(partial.len(), 6);
        assert_eq!(partial.last().unwrap().tag, "em");
        assert_eq!(relative_depth(&doc, em, h2), None);
    }

    #[test]
    fn relative_depth_counts_levels() {
        let doc = parse_document(PAGE);
        let em = find(&doc, "em");
        let main = find(&doc, "main");
        assert_eq!(relative_depth(&doc, em, main), Some(3));
    }
}
