use crate::path::ancestor_path;
use html::{Document, NodeId};

/// Lowest common ancestor of `a` and `b` below the scoping root.
///
/// Takes the longest common prefix of both ancestor paths; its last node wins. With no shared
/// prefix the scoping root is returned. When the prefix ends at `a` or `b` itself (a self-pair,
/// or one node containing the other) the result steps up to that node's parent, so the
/// ancestor is always strictly above both selections.
pub fn common_ancestor(doc: &Document, a: NodeId, b: NodeId) -> NodeId {
    let root = doc.scoping_root();
    let path_a = ancestor_path(doc, a);
    let path_b = ancestor_path(doc, b);
    let shared = path_a
        .iter()
        .zip(&path_b)
        .take_while(|(x, y)| x == y)
        .count();
    let Some(&last) = shared.checked_sub(1).and_then(|i| path_a.get(i)) else {
        log::trace!(target: "pattern.ancestor", "{a} and {b} share nothing below the root");
        return root;
    };
    if last != a && last != b {
        return last;
    }
    let parent = shared
        .checked_sub(2)
        .and_then(|i| path_a.get(i).copied())
        .unwrap_or(root);
    log::trace!(
        target: "pattern.ancestor",
        "common prefix ends at selected node {last}; stepping up to {parent}"
    );
    parent
}
