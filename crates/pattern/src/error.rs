use crate::path::StructuralPath;
use html::NodeId;
use std::fmt;

/// A relative path was requested against a node that is not an ancestor of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    NotAnAncestor {
        node: NodeId,
        ancestor: NodeId,
        /// Levels collected before the walk ran out of parents, root-to-leaf.
        partial: StructuralPath,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotAnAncestor {
                node,
                ancestor,
                partial,
            } => write!(
                f,
                "{ancestor} is not an ancestor of {node} (walked {} level(s))",
                partial.len()
            ),
        }
    }
}

impl std::error::Error for PathError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    IncompleteSelection { selected: usize },
    Structural(PathError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IncompleteSelection { selected } => {
                write!(f, "pattern needs two selected nodes, have {selected}")
            }
            EngineError::Structural(err) => write!(f, "structural precondition failed: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Structural(err) => Some(err),
            EngineError::IncompleteSelection { .. } => None,
        }
    }
}

impl From<PathError> for EngineError {
    fn from(err: PathError) -> Self {
        EngineError::Structural(err)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid engine config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
        }
    }
}
