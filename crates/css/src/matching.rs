use crate::syntax::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, Compound, PseudoClass,
    RelativeSelector, SelectorError, SelectorList, SimpleSelector, parse_selector_list,
};
use html::{Document, NodeId, NodeKind};

impl SelectorList {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.0.iter().any(|complex| matches(doc, node, complex))
    }

    /// Elements below `scope` (the whole document when `None`) matching any selector in the
    /// list, in document order.
    ///
    /// Like the DOM's `querySelectorAll`, only the candidates are restricted to the scope;
    /// the ancestor and sibling parts of a selector may match outside it.
    pub fn query_all(&self, doc: &Document, scope: Option<NodeId>) -> Vec<NodeId> {
        let start = scope.unwrap_or_else(|| doc.root());
        doc.element_descendants(start)
            .filter(|node| self.matches(doc, *node))
            .collect()
    }
}

/// Parse `selector` and run it against `doc`. See [`SelectorList::query_all`].
pub fn query_all(
    doc: &Document,
    scope: Option<NodeId>,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let list = parse_selector_list(selector)?;
    let found = list.query_all(doc, scope);
    log::debug!(
        target: "css.query",
        "{selector:?} under {scope:?}: {} match(es)",
        found.len()
    );
    Ok(found)
}

pub fn matches(doc: &Document, node: NodeId, selector: &ComplexSelector) -> bool {
    let Some(last) = selector.compounds.len().checked_sub(1) else {
        return false;
    };
    matches_from(doc, node, selector, last, None)
}

/// Element `anchor` and the combinator that must relate it to the leftmost compound, for
/// `:has()` arguments.
type Anchor = (NodeId, Combinator);

// Right-to-left: `compounds[index]` must match `node`, then the combinator to its left picks
// which element(s) must match the remaining prefix.
fn matches_from(
    doc: &Document,
    node: NodeId,
    selector: &ComplexSelector,
    index: usize,
    anchor: Option<Anchor>,
) -> bool {
    if !matches_compound(doc, node, &selector.compounds[index]) {
        return false;
    }
    if index == 0 {
        return anchor.is_none_or(|(anchor, combinator)| related(doc, anchor, combinator, node));
    }
    let next = index - 1;
    let step = |candidate: NodeId| matches_from(doc, candidate, selector, next, anchor);
    match selector.combinators[next] {
        Combinator::Child => doc.parent_element(node).is_some_and(step),
        Combinator::Descendant => {
            let mut current = doc.parent_element(node);
            while let Some(ancestor) = current {
                if step(ancestor) {
                    return true;
                }
                current = doc.parent_element(ancestor);
            }
            false
        }
        Combinator::NextSibling => previous_element_siblings(doc, node).next().is_some_and(step),
        Combinator::SubsequentSibling => previous_element_siblings(doc, node).any(step),
    }
}

/// Whether `node` sits where `combinator` points from `anchor`.
fn related(doc: &Document, anchor: NodeId, combinator: Combinator, node: NodeId) -> bool {
    match combinator {
        Combinator::Descendant => doc.is_ancestor_of(anchor, node),
        Combinator::Child => doc.parent(node) == Some(anchor),
        Combinator::NextSibling => previous_element_siblings(doc, node).next() == Some(anchor),
        Combinator::SubsequentSibling => previous_element_siblings(doc, node).any(|s| s == anchor),
    }
}

fn matches_relative(doc: &Document, anchor: NodeId, relative: &RelativeSelector) -> bool {
    let selector = &relative.selector;
    let Some(last) = selector.compounds.len().checked_sub(1) else {
        return false;
    };
    let anchored = Some((anchor, relative.combinator));
    let test = |candidate: NodeId| matches_from(doc, candidate, selector, last, anchored);
    match relative.combinator {
        Combinator::Descendant | Combinator::Child => doc.element_descendants(anchor).any(test),
        // The subject may sit inside a later sibling: `:has(+ div span)`.
        Combinator::NextSibling | Combinator::SubsequentSibling => doc
            .parent(anchor)
            .is_some_and(|parent| doc.element_descendants(parent).any(test)),
    }
}

/// Preceding element siblings, nearest first.
fn previous_element_siblings(doc: &Document, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let siblings = doc.parent(node).map_or(&[][..], |p| doc.children(p));
    let position = siblings.iter().position(|s| *s == node).unwrap_or(0);
    siblings[..position]
        .iter()
        .rev()
        .copied()
        .filter(|s| doc.is_element(*s))
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    doc.is_element(node) && compound.0.iter().all(|s| matches_simple(doc, node, s))
}

fn matches_simple(doc: &Document, node: NodeId, selector: &SimpleSelector) -> bool {
    match selector {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => doc
            .tag_name(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(name)),
        SimpleSelector::Id(want) => doc.attribute(node, "id") == Some(want.as_str()),
        SimpleSelector::Class(want) => doc.has_class(node, want),
        SimpleSelector::Attribute(attr) => matches_attribute(doc, node, attr),
        SimpleSelector::Pseudo(pseudo) => matches_pseudo(doc, node, pseudo),
        SimpleSelector::PseudoElement(_) => false,
    }
}

fn matches_attribute(doc: &Document, node: NodeId, attr: &AttributeSelector) -> bool {
    let Some(value) = doc.attribute(node, &attr.name) else {
        return false;
    };
    let Some((op, want)) = &attr.matcher else {
        return true;
    };
    let (value, want) = if attr.case_insensitive {
        (value.to_ascii_lowercase(), want.to_ascii_lowercase())
    } else {
        (value.to_string(), want.clone())
    };
    match op {
        AttrOp::Equals => value == want,
        AttrOp::Includes => !want.is_empty() && value.split_ascii_whitespace().any(|t| t == want),
        AttrOp::DashMatch => {
            value == want
                || value
                    .strip_prefix(want.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrOp::Prefix => !want.is_empty() && value.starts_with(&want),
        AttrOp::Suffix => !want.is_empty() && value.ends_with(&want),
        AttrOp::Substring => !want.is_empty() && value.contains(&want),
    }
}

/// 1-based position of `node` among its parent's element children, optionally restricted to
/// the same tag, counted from the front or the back. `None` for parentless nodes.
fn position(doc: &Document, node: NodeId, same_tag: bool, from_end: bool) -> Option<usize> {
    let parent = doc.parent(node)?;
    let tag = doc.tag_name(node);
    let siblings: Vec<NodeId> = doc
        .element_children(parent)
        .filter(|s| !same_tag || doc.tag_name(*s) == tag)
        .collect();
    let index = siblings.iter().position(|s| *s == node)?;
    Some(if from_end {
        siblings.len() - index
    } else {
        index + 1
    })
}

fn matches_pseudo(doc: &Document, node: NodeId, pseudo: &PseudoClass) -> bool {
    let at = |same_tag, from_end| position(doc, node, same_tag, from_end);
    match pseudo {
        PseudoClass::FirstChild => at(false, false) == Some(1),
        PseudoClass::LastChild => at(false, true) == Some(1),
        PseudoClass::OnlyChild => at(false, false) == Some(1) && at(false, true) == Some(1),
        PseudoClass::FirstOfType => at(true, false) == Some(1),
        PseudoClass::LastOfType => at(true, true) == Some(1),
        PseudoClass::OnlyOfType => at(true, false) == Some(1) && at(true, true) == Some(1),
        PseudoClass::Root => doc.parent(node) == Some(doc.root()),
        PseudoClass::Empty => doc
            .children(node)
            .iter()
            .all(|c| matches!(doc.kind(*c), Some(NodeKind::Comment { .. }))),
        PseudoClass::NthChild(nth) => at(false, false).is_some_and(|p| nth.matches(p)),
        PseudoClass::NthLastChild(nth) => at(false, true).is_some_and(|p| nth.matches(p)),
        PseudoClass::NthOfType(nth) => at(true, false).is_some_and(|p| nth.matches(p)),
        PseudoClass::NthLastOfType(nth) => at(true, true).is_some_and(|p| nth.matches(p)),
        PseudoClass::Not(compounds) => !compounds.iter().any(|c| matches_compound(doc, node, c)),
        PseudoClass::Is(selectors) => selectors.iter().any(|s| matches(doc, node, s)),
        PseudoClass::Has(relative) => relative.iter().any(|r| matches_relative(doc, node, r)),
        PseudoClass::Link => {
            tag_is(doc, node, &["a", "area", "link"]) && doc.has_attribute(node, "href")
        }
        PseudoClass::Checked => {
            (tag_is(doc, node, &["input"]) && doc.has_attribute(node, "checked"))
                || (tag_is(doc, node, &["option"]) && doc.has_attribute(node, "selected"))
        }
        PseudoClass::Disabled => is_form_control(doc, node) && doc.has_attribute(node, "disabled"),
        PseudoClass::Enabled => is_form_control(doc, node) && !doc.has_attribute(node, "disabled"),
        PseudoClass::UserAction => false,
    }
}

fn tag_is(doc: &Document, node: NodeId, names: &[&str]) -> bool {
    doc.tag_name(node)
        .is_some_and(|tag| names.iter().any(|n| tag.eq_ignore_ascii_case(n)))
}

fn is_form_control(doc: &Document, node: NodeId) -> bool {
    tag_is(
        doc,
        node,
        &[
            "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
        ],
    )
}
