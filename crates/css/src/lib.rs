//! Selector parsing and matching over [`html::Document`].
//!
//! This is the query primitive the pattern engine runs against: [`query_all`] takes a selector
//! string and an optional scope node and either returns the matching elements in document
//! order or a [`SelectorError`].

pub mod escape;
pub mod matching;
pub mod syntax;

pub use escape::serialize_identifier;
pub use matching::{matches, query_all};
pub use syntax::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, Compound, Nth, PseudoClass,
    RelativeSelector, SelectorError, SelectorErrorKind, SelectorList, SimpleSelector,
    parse_selector_list,
};
