//! Arena-backed document tree.
//!
//! Nodes live in a flat `Vec` and are addressed by [`NodeId`] handles. A handle never owns
//! its node: callers hold ids and pass the `Document` explicitly to every query. Detaching a
//! node unlinks it from its parent but keeps its record, so stale handles keep resolving to a
//! parentless subtree instead of dangling. Ids that were never allocated resolve to nothing;
//! every accessor degrades to `None`/empty for them rather than panicking.

use std::fmt;

/// Opaque handle to a node inside a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug)]
pub enum TreeError {
    UnknownNode(NodeId),
    InvalidParent(NodeId),
    AlreadyAttached(NodeId),
    CycleDetected { parent: NodeId, child: NodeId },
    NotAnElement(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownNode(id) => write!(f, "unknown node {id}"),
            TreeError::InvalidParent(id) => write!(f, "node {id} cannot have children"),
            TreeError::AlreadyAttached(id) => write!(f, "node {id} already has a parent"),
            TreeError::CycleDetected { parent, child } => {
                write!(f, "appending {child} under {parent} would create a cycle")
            }
            TreeError::NotAnElement(id) => write!(f, "node {id} is not an element"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Document { .. } | NodeKind::Element { .. }
        )
    }
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeRecord>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeRecord {
                kind: NodeKind::Document { doctype: None },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node. Always id 0.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn set_doctype(&mut self, doctype: String) {
        if let NodeKind::Document { doctype: slot } = &mut self.nodes[0].kind {
            *slot = Some(doctype);
        }
    }

    /// Creates a detached element. Tag and attribute names are stored lower-case.
    pub fn create_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
    ) -> NodeId {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        self.push(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text { text: text.into() })
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment { text: text.into() })
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_record = self.record(parent).ok_or(TreeError::UnknownNode(parent))?;
        if !parent_record.allows_children() {
            return Err(TreeError::InvalidParent(parent));
        }
        let child_record = self.record(child).ok_or(TreeError::UnknownNode(child))?;
        if child_record.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == self.root() || parent == child || self.is_ancestor_of(child, parent) {
            return Err(TreeError::CycleDetected { parent, child });
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Unlinks `node` from its parent. The subtree stays addressable.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        self.nodes[parent.index()].children.retain(|c| *c != node);
        self.nodes[node.index()].parent = None;
    }

    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<String>,
    ) -> Result<(), TreeError> {
        let record = self
            .nodes
            .get_mut(node.index())
            .ok_or(TreeError::UnknownNode(node))?;
        let NodeKind::Element { attributes, .. } = &mut record.kind else {
            return Err(TreeError::NotAnElement(node));
        };
        let name = name.to_ascii_lowercase();
        match attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => attributes.push((name, value)),
        }
        Ok(())
    }

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id).and_then(|r| r.parent)
    }

    /// Parent when it is an element (the DOM `parentElement`).
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.is_element(*p))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id).map_or(&[], |r| r.children.as_slice())
    }

    /// Element children in document order (the DOM `children` collection).
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, Option<String>)] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attributes(id)
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Attribute value; a valueless (boolean) attribute reads as `""`.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Class tokens in attribute order with duplicates removed (the DOM `classList`).
    pub fn class_list(&self, id: NodeId) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        if let Some(value) = self.attribute(id, "class") {
            for class in value.split_ascii_whitespace() {
                if !out.contains(&class) {
                    out.push(class);
                }
            }
        }
        out
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// First element child of the document node.
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root()).next()
    }

    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|c| self.tag_name(*c) == Some("body"))
    }

    /// Upper boundary for ancestor search and anchor building: the body, falling back to the
    /// document element and then the document node itself.
    pub fn scoping_root(&self) -> NodeId {
        self.body()
            .or_else(|| self.document_element())
            .unwrap_or_else(|| self.root())
    }

    /// Strict ancestry: a node is not its own ancestor.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Pre-order traversal of the nodes below `id`, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Element descendants in document order.
    pub fn element_descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(id).filter(|n| self.is_element(*n))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        // Push children in reverse so they pop in original order.
        self.stack
            .extend(self.doc.children(next).iter().rev().copied());
        Some(next)
    }
}
