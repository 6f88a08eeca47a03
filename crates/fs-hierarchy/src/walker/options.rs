//! Walk filtering and depth options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, Result};

/// Options applied by [`Walker::scan`](super::Walker::scan) and
/// [`Walker::walk`](super::Walker::walk).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Entries equal to or below any of these paths are not materialized.
    pub ignore_paths: Vec<PathBuf>,
    /// Skip entries whose name starts with a dot.
    pub skip_hidden: bool,
    /// How many folder levels below the starting folder `walk` expands.
    /// `Some(0)` behaves like a single `scan`.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_paths.push(path.into());
        self
    }

    pub fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Returns true if the given path should be ignored.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.ignore_paths
            .iter()
            .any(|ignored| path == ignored || path.starts_with(ignored))
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|error| {
            HierarchyError::Config(format!("failed to parse walk options: {error}"))
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|error| {
            HierarchyError::Config(format!(
                "failed to read walk options {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&data).map_err(|error| {
            HierarchyError::Config(format!(
                "failed to parse walk options {}: {error}",
                path.display()
            ))
        })
    }
}
