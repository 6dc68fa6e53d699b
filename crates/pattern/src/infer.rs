//! The inference pipeline: two nodes in, pattern and match set out.

use crate::ancestor::common_ancestor;
use crate::anchor::anchor_selector;
use crate::capability::Capabilities;
use crate::error::PathError;
use crate::generalize::{Pattern, generalize};
use crate::path::{StructuralPath, relative_path};
use crate::resolve::{Resolution, resolve};
use html::{Document, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inference {
    pub ancestor: NodeId,
    pub path_a: StructuralPath,
    pub path_b: StructuralPath,
    pub pattern: Pattern,
    pub resolution: Resolution,
}

pub fn infer(
    doc: &Document,
    caps: &Capabilities,
    a: NodeId,
    b: NodeId,
    class_limit: usize,
) -> Result<Inference, PathError> {
    let ancestor = common_ancestor(doc, a, b);
    let path_a = relative_path(doc, a, ancestor, caps.reserved.as_ref())?;
    let path_b = relative_path(doc, b, ancestor, caps.reserved.as_ref())?;
    let anchor = anchor_selector(
        doc,
        ancestor,
        caps.ids.as_ref(),
        caps.reserved.as_ref(),
        class_limit,
    );
    log::debug!(target: "pattern.ancestor", "{a} and {b} meet at {ancestor} ({anchor:?})");

    let pattern = generalize(&path_a, &path_b, anchor);
    let resolution = resolve(
        doc,
        caps.query.as_ref(),
        &pattern,
        ancestor,
        pattern.depth,
        [a, b],
    );
    log::debug!(
        target: "pattern.generalize",
        "inferred {:?} with {} match(es)",
        pattern.full_query,
        resolution.matches.len()
    );
    Ok(Inference {
        ancestor,
        path_a,
        path_b,
        pattern,
        resolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    fn find_all(doc: &Document, selector: &str) -> Vec<NodeId> {
        css::query_all(doc, None, selector).unwrap()
    }

    #[test]
    fn sibling_cards_generalize_to_their_shared_class() {
        let doc = parse_document(
            "<html><body><div id=results>\
             <div class=\"card featured\"><h3>a</h3></div>\
             <div class=card><h3>b</h3></div>\
             <div class=\"card element-selector-selected\"><h3>c</h3></div>\
             <p class=card>not a div</p>\
             </div></body></html>",
        );
        let cards = find_all(&doc, "div.card");
        let inference = infer(&doc, &Capabilities::default(), cards[0], cards[1], 2).unwrap();
        assert_eq!(inference.ancestor, find_all(&doc, "#results")[0]);
        assert_eq!(inference.pattern.relative_query, "div.card");
        assert_eq!(inference.pattern.full_query, "#results > div.card");
        assert_eq!(inference.resolution.matches, cards);
    }

    #[test]
    fn cousins_generalize_over_two_levels() {
        let doc = parse_document(
            "<html><body><table>\
             <tr><td class=name>a</td><td>1</td></tr>\
             <tr><td class=name>b</td><td>2</td></tr>\
             <tr><td class=name>c</td><td>3</td></tr>\
             </table></body></html>",
        );
        let names = find_all(&doc, "td.name");
        let inference = infer(&doc, &Capabilities::default(), names[0], names[2], 2).unwrap();
        assert_eq!(inference.pattern.relative_query, "tr > td.name");
        assert_eq!(inference.pattern.depth, 2);
        assert_eq!(inference.resolution.matches, names);
    }

    #[test]
    fn detached_node_is_a_structural_error() {
        let mut doc = parse_document("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
        let items = find_all(&doc, "li");
        doc.detach(items[1]);
        let err = infer(&doc, &Capabilities::default(), items[0], items[1], 2).unwrap_err();
        assert!(matches!(err, PathError::NotAnAncestor { node, .. } if node == items[1]));
    }
}
