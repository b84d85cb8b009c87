//! Error types.
//!
//! The two collaborator failures are kept apart so callers can tell them
//! apart in diagnostics, but the analyzer surfaces both through the single
//! [`DependencyAnalysisError`].

use std::path::PathBuf;
use thiserror::Error;

/// The dependency graph builder could not produce a tree.
#[derive(Debug, Error)]
pub enum GraphBuildError {
    #[error("failed to read dependency graph {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid dependency graph {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unresolvable dependency: {0}")]
    Unresolved(String),
}

/// The usage analyzer could not classify the project's dependencies.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read dependency analysis {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid dependency analysis {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("usage analysis failed: {0}")]
    Failed(String),
}

/// Which collaborator failed during a starter-aware analysis run.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error(transparent)]
    Graph(#[from] GraphBuildError),

    #[error(transparent)]
    Usage(#[from] AnalysisError),
}

/// A starter-aware analysis run was aborted.
#[derive(Debug, Error)]
#[error("could not complete dependency analysis")]
pub struct DependencyAnalysisError {
    #[source]
    cause: AnalysisFailure,
}

impl DependencyAnalysisError {
    /// The collaborator failure that aborted the run.
    pub fn cause(&self) -> &AnalysisFailure {
        &self.cause
    }
}

impl From<GraphBuildError> for DependencyAnalysisError {
    fn from(err: GraphBuildError) -> Self {
        Self {
            cause: AnalysisFailure::Graph(err),
        }
    }
}

impl From<AnalysisError> for DependencyAnalysisError {
    fn from(err: AnalysisError) -> Self {
        Self {
            cause: AnalysisFailure::Usage(err),
        }
    }
}

/// A malformed `group:artifact:...` coordinate string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactParseError {
    #[error("empty segment in artifact coordinates '{0}'")]
    EmptySegment(String),

    #[error("expected 3 to 5 ':'-separated segments in '{0}'")]
    SegmentCount(String),
}
