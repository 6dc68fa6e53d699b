use crate::capability::{IdentifierLookup, ReservedClasses};
use css::serialize_identifier;
use html::{Document, NodeId};

/// A selector that resolves to exactly `node`, built by ascending towards the scoping root.
///
/// Each level emits `tag`, then `:nth-of-type(k)` when the parent has more than one element
/// child with that tag, then up to `class_limit` non-reserved classes in alphabetical order.
/// A level whose node has a unique identifier emits `#id` instead and ends the ascent. If the
/// ascent reaches the scoping root without meeting an identifier, the root's tag is prepended.
///
/// The scoping root itself renders as its tag (`body`) and the document element as `html`.
/// The document node has no selector and yields an empty string.
pub fn anchor_selector(
    doc: &Document,
    node: NodeId,
    ids: &dyn IdentifierLookup,
    reserved: &dyn ReservedClasses,
    class_limit: usize,
) -> String {
    let root = doc.scoping_root();
    if node == root || Some(node) == doc.document_element() {
        return doc.tag_name(node).map(serialize_identifier).unwrap_or_default();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        if !doc.is_element(id) {
            break;
        }
        if id == root {
            parts.extend(doc.tag_name(root).map(serialize_identifier));
            break;
        }
        if let Some(unique) = ids.unique_id(doc, id) {
            parts.push(format!("#{}", serialize_identifier(unique)));
            break;
        }
        parts.push(level_selector(doc, id, reserved, class_limit));
        current = doc.parent(id);
    }
    parts.reverse();
    parts.join(" > ")
}

fn level_selector(
    doc: &Document,
    node: NodeId,
    reserved: &dyn ReservedClasses,
    class_limit: usize,
) -> String {
    let tag = doc.tag_name(node).unwrap_or_default();
    let mut out = serialize_identifier(tag);

    if let Some(parent) = doc.parent(node) {
        let same_tag: Vec<NodeId> = doc
            .element_children(parent)
            .filter(|s| doc.tag_name(*s) == Some(tag))
            .collect();
        if same_tag.len() > 1 {
            if let Some(i) = same_tag.iter().position(|s| *s == node) {
                out.push_str(&format!(":nth-of-type({})", i + 1));
            }
        }
    }

    let mut classes: Vec<&str> = doc
        .class_list(node)
        .into_iter()
        .filter(|c| !reserved.is_reserved(c))
        .collect();
    classes.sort_unstable();
    for class in classes.into_iter().take(class_limit) {
        out.push('.');
        out.push_str(&serialize_identifier(class));
    }
    out
}
