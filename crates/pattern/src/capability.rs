//! Capabilities the engine consumes from its environment.
//!
//! The engine never hard-codes how the tree is queried, which classes belong to its own UI,
//! or what counts as a unique identifier. Each concern is a small trait so tests can swap in
//! synthetic behavior; [`Capabilities::from_config`] wires up the defaults.

use crate::config::EngineConfig;
use css::SelectorError;
use html::{Document, NodeId};

/// The tree's native query primitive.
pub trait TreeQuery {
    /// Matching elements below `scope` (the whole document when `None`) in document order,
    /// or the syntax error that rejected `selector`.
    fn query_all(
        &self,
        doc: &Document,
        scope: Option<NodeId>,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError>;
}

/// Runs selectors through the `css` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssQuery;

impl TreeQuery for CssQuery {
    fn query_all(
        &self,
        doc: &Document,
        scope: Option<NodeId>,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        css::query_all(doc, scope, selector)
    }
}

/// Predicate for class names owned by the engine's own UI affordances.
pub trait ReservedClasses {
    fn is_reserved(&self, class: &str) -> bool;
}

impl<F> ReservedClasses for F
where
    F: Fn(&str) -> bool,
{
    fn is_reserved(&self, class: &str) -> bool {
        self(class)
    }
}

#[derive(Clone, Debug)]
pub struct ReservedPrefix(pub String);

impl ReservedClasses for ReservedPrefix {
    fn is_reserved(&self, class: &str) -> bool {
        !self.0.is_empty() && class.starts_with(self.0.as_str())
    }
}

/// Looks up a page-unique identifier for a node.
pub trait IdentifierLookup {
    fn unique_id<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d str>;
}

/// The non-empty `id` attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdAttribute;

impl IdentifierLookup for IdAttribute {
    fn unique_id<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d str> {
        doc.attribute(node, "id").filter(|id| !id.trim().is_empty())
    }
}

/// Treats every node as unidentified, forcing positional anchors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIdentifiers;

impl IdentifierLookup for NoIdentifiers {
    fn unique_id<'d>(&self, _doc: &'d Document, _node: NodeId) -> Option<&'d str> {
        None
    }
}

pub struct Capabilities {
    pub query: Box<dyn TreeQuery>,
    pub reserved: Box<dyn ReservedClasses>,
    pub ids: Box<dyn IdentifierLookup>,
}

impl Capabilities {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            query: Box::new(CssQuery),
            reserved: Box::new(ReservedPrefix(config.reserved_class_prefix.clone())),
            ids: Box::new(IdAttribute),
        }
    }

    pub fn with_query(mut self, query: impl TreeQuery + 'static) -> Self {
        self.query = Box::new(query);
        self
    }

    pub fn with_reserved(mut self, reserved: impl ReservedClasses + 'static) -> Self {
        self.reserved = Box::new(reserved);
        self
    }

    pub fn with_ids(mut self, ids: impl IdentifierLookup + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
