//! Structural pattern inference.
//!
//! Given two example elements, [`infer`] finds their lowest common ancestor, describes each
//! element's path below it, merges the two paths into one selector and runs that selector
//! back against the document. [`Session`] wraps the pipeline with the picker's selection
//! slots and the debounced validation of hand-edited selectors.
//!
//! ```
//! use pattern::{EngineConfig, Session};
//!
//! let doc = html::parse_document(
//!     "<html><body><ul><li class=row>a</li><li class=row>b</li><li class=row>c</li></ul></body></html>",
//! );
//! let items = css::query_all(&doc, None, "li").unwrap();
//! let mut session = Session::new(EngineConfig::default());
//! session.select_node(&doc, items[0]);
//! session.select_node(&doc, items[1]);
//! let (pattern, matches) = session.compute_pattern(&doc).unwrap();
//! assert_eq!(pattern.relative_query, "li.row");
//! assert_eq!(matches.len(), 3);
//! ```

pub mod ancestor;
pub mod anchor;
pub mod capability;
pub mod config;
pub mod debounce;
pub mod error;
pub mod generalize;
pub mod infer;
pub mod path;
pub mod resolve;
pub mod selection;
pub mod session;
pub mod validate;

pub use ancestor::common_ancestor;
pub use anchor::anchor_selector;
pub use capability::{
    Capabilities, CssQuery, IdAttribute, IdentifierLookup, NoIdentifiers, ReservedClasses,
    ReservedPrefix, TreeQuery,
};
pub use config::EngineConfig;
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use error::{ConfigError, EngineError, PathError};
pub use generalize::{Pattern, generalize};
pub use infer::{Inference, infer};
pub use path::{PathSegment, StructuralPath, ancestor_path, relative_depth, relative_path};
pub use resolve::{MatchSet, Resolution, resolve};
pub use selection::{RejectReason, SelectOutcome, SelectedNode, Selection};
pub use session::{Session, SessionState};
pub use validate::{
    IncrementalValidator, Validation, ValidationResult, ValidationStatus, classify_syntax_error,
    validate_now,
};
