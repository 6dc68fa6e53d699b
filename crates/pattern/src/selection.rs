use crate::capability::ReservedClasses;
use crate::path::ancestor_path;
use html::{Document, NodeId};
use serde::{Serialize, Serializer};
use std::fmt;

pub const MAX_SELECTIONS: usize = 2;

/// A picked element and the metadata captured when it was picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedNode {
    #[serde(serialize_with = "serialize_node")]
    pub node: NodeId,
    pub tag: String,
    /// Non-reserved classes in attribute order.
    pub classes: Vec<String>,
    /// The notable attributes the node carries, in configured order. Serialized as a
    /// name to value map.
    #[serde(serialize_with = "serialize_attributes")]
    pub attributes: Vec<(String, String)>,
    /// Element levels below the scoping root.
    pub depth: usize,
    #[serde(skip)]
    pub path: Vec<NodeId>,
}

fn serialize_node<S: Serializer>(node: &NodeId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(node.as_raw())
}

fn serialize_attributes<S: Serializer>(
    attributes: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(attributes.iter().map(|(name, value)| (name, value)))
}

impl SelectedNode {
    pub fn capture(
        doc: &Document,
        node: NodeId,
        reserved: &dyn ReservedClasses,
        notable: &[String],
    ) -> Self {
        let path = ancestor_path(doc, node);
        Self {
            node,
            tag: doc.tag_name(node).unwrap_or_default().to_string(),
            classes: doc
                .class_list(node)
                .into_iter()
                .filter(|c| !reserved.is_reserved(c))
                .map(str::to_string)
                .collect(),
            attributes: notable
                .iter()
                .filter_map(|name| {
                    doc.attribute(node, name)
                        .map(|value| (name.clone(), value.to_string()))
                })
                .collect(),
            depth: path.len(),
            path,
        }
    }

    /// `tag.class1.class2`, for display.
    pub fn describe(&self) -> String {
        let mut out = self.tag.clone();
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    slots: Vec<SelectedNode>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_SELECTIONS
    }

    pub fn get(&self, slot: usize) -> Option<&SelectedNode> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedNode> {
        self.slots.iter()
    }

    pub fn pair(&self) -> Option<[NodeId; 2]> {
        match self.slots.as_slice() {
            [a, b] => Some([a.node, b.node]),
            _ => None,
        }
    }

    /// Stores `node` in the next free slot, or hands it back when both slots are taken.
    pub(crate) fn push(&mut self, node: SelectedNode) -> Result<usize, SelectedNode> {
        if self.is_full() {
            return Err(node);
        }
        self.slots.push(node);
        Ok(self.slots.len() - 1)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotAnElement,
    InsideOverlay,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnElement => write!(f, "node is not a live element"),
            RejectReason::InsideOverlay => write!(f, "node belongs to the picker overlay"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Accepted { slot: usize },
    /// Both slots are taken; nothing changed.
    Full,
    Rejected(RejectReason),
}

/// Whether `node` or one of its ancestors carries `overlay_class`.
pub fn inside_overlay(doc: &Document, node: NodeId, overlay_class: &str) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if doc.has_class(id, overlay_class) {
            return true;
        }
        current = doc.parent(id);
    }
    false
}
