//! Document tree used by the pattern engine.
//!
//! The tree is an arena ([`Document`]) addressed by copyable [`NodeId`] handles. Markup can be
//! turned into a document with [`parse_document`], which drives a deliberately small tokenizer
//! and the legacy open-element-stack builder.

mod builder;
mod document;
mod entities;
mod tokenizer;

pub use builder::{build_document, parse_document};
pub use document::{Descendants, Document, NodeId, NodeKind, TreeError};
pub use tokenizer::{Token, tokenize};
