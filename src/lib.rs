//! Infer a reusable selector from two example elements.
//!
//! The work is split across three crates, re-exported here:
//! - [`html`]: the arena document the engine walks, plus a small markup parser.
//! - [`css`]: selector parsing and matching, the query primitive patterns run through.
//! - [`pattern`]: ancestor search, path generalization, match resolution and validation.

pub use css;
pub use html;
pub use pattern;

pub use html::{Document, NodeId, parse_document};
pub use pattern::{
    EngineConfig, EngineError, Pattern, SelectOutcome, Session, SessionState, ValidationResult,
    ValidationStatus,
};
