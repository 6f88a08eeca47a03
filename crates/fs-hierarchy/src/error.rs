use std::path::PathBuf;

use crate::storage::NodeIndex;

#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid node id: {0:?}")]
    InvalidId(String),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeIndex),

    #[error("Key {key:?} must match the node id {id:?}")]
    KeyMismatch { key: String, id: String },

    #[error("{ref_id} already holds a child under {key:?}")]
    Occupied { ref_id: String, key: String },

    #[error("No child {key:?} in {ref_id}")]
    MissingKey { ref_id: String, key: String },

    #[error("Node {node} cannot be contained by its own descendant {container}")]
    Cycle {
        node: NodeIndex,
        container: NodeIndex,
    },

    #[error("Node {0} is still attached to a container")]
    Attached(NodeIndex),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
