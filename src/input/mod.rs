//! File-backed collaborators.
//!
//! The dependency tree and the raw usage analysis are produced by the host
//! build tool and exported as JSON. These readers plug those exports into
//! [`StarterAwareAnalyzer`](crate::analyzer::StarterAwareAnalyzer).

use crate::analyzer::{DependencyGraphBuilder, Project, UsageAnalyzer};
use crate::error::{AnalysisError, GraphBuildError};
use crate::models::{DependencyAnalysis, DependencyNode};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads a serialized dependency tree.
///
/// A `null` document stands for a project without dependencies.
#[derive(Debug, Clone)]
pub struct JsonDependencyGraph {
    path: PathBuf,
}

impl JsonDependencyGraph {
    /// `path` is resolved against the project base directory when relative.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DependencyGraphBuilder for JsonDependencyGraph {
    fn build_dependency_graph(
        &self,
        project: &Project,
    ) -> Result<Option<DependencyNode>, GraphBuildError> {
        let path = resolve(&project.base_dir, &self.path);
        debug!("Reading dependency graph from {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|source| GraphBuildError::Io {
            path: path.clone(),
            source,
        })?;

        let root: Option<DependencyNode> = serde_json::from_str(&content)
            .map_err(|source| GraphBuildError::Parse { path, source })?;

        if let Some(ref root) = root {
            debug!("Dependency graph has {} nodes", root.node_count());
        }
        Ok(root)
    }
}

/// Reads a precomputed raw usage analysis.
#[derive(Debug, Clone)]
pub struct JsonUsageReport {
    path: PathBuf,
}

impl JsonUsageReport {
    /// `path` is resolved against the project base directory when relative.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UsageAnalyzer for JsonUsageReport {
    fn analyze(&self, project: &Project) -> Result<DependencyAnalysis, AnalysisError> {
        let path = resolve(&project.base_dir, &self.path);
        debug!("Reading dependency analysis from {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|source| AnalysisError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| AnalysisError::Parse { path, source })
    }

    fn analyze_excluding(
        &self,
        project: &Project,
        excluded_classes: &[String],
    ) -> Result<DependencyAnalysis, AnalysisError> {
        if !excluded_classes.is_empty() {
            warn!(
                "{} excluded class(es) given for precomputed {}",
                excluded_classes.len(),
                self.path.display()
            );
            return Err(AnalysisError::Failed(
                "exclusions cannot be applied to a precomputed report".to_string(),
            ));
        }
        self.analyze(project)
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
