//! Starter-aware dependency analyzer.
//!
//! Composes an external usage analyzer and an external dependency graph
//! builder. Each run asks the usage analyzer for the raw classification,
//! builds the dependency tree, collects starter membership from it, and
//! removes the starter-induced false positives.

use crate::analysis::{build_membership, suppress, StarterMembership, Suppressed};
use crate::error::{AnalysisError, DependencyAnalysisError, GraphBuildError};
use crate::models::{DependencyAnalysis, DependencyNode};
use std::path::PathBuf;
use tracing::{debug, info};

/// The project under analysis, handed to both collaborators.
#[derive(Debug, Clone)]
pub struct Project {
    /// Display name.
    pub name: String,
    /// Directory relative inputs are resolved against.
    pub base_dir: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
        }
    }
}

/// Classifies declared and referenced dependencies of a project.
pub trait UsageAnalyzer {
    /// Raw classification of the project's dependencies.
    fn analyze(&self, project: &Project) -> Result<DependencyAnalysis, AnalysisError>;

    /// Raw classification, ignoring references to `excluded_classes`.
    fn analyze_excluding(
        &self,
        project: &Project,
        excluded_classes: &[String],
    ) -> Result<DependencyAnalysis, AnalysisError>;
}

/// Resolves a project's dependency tree.
pub trait DependencyGraphBuilder {
    /// Root of the resolved tree, or `None` for a project without dependencies.
    fn build_dependency_graph(
        &self,
        project: &Project,
    ) -> Result<Option<DependencyNode>, GraphBuildError>;
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Classification as reported by the usage analyzer.
    pub raw: DependencyAnalysis,
    /// Classification with starter false positives removed.
    pub corrected: DependencyAnalysis,
    /// Starters found in the dependency tree.
    pub membership: StarterMembership,
    /// Findings dropped from `raw`.
    pub suppressed: Suppressed,
}

/// Usage analyzer that knows about Spring Boot starters.
pub struct StarterAwareAnalyzer<U, G> {
    usage: U,
    graph: G,
}

impl<U: UsageAnalyzer, G: DependencyGraphBuilder> StarterAwareAnalyzer<U, G> {
    pub fn new(usage: U, graph: G) -> Self {
        Self { usage, graph }
    }

    /// Corrected classification of `project`'s dependencies.
    pub fn analyze(&self, project: &Project) -> Result<DependencyAnalysis, DependencyAnalysisError> {
        Ok(self.run(project)?.corrected)
    }

    /// Corrected classification, ignoring references to `excluded_classes`.
    pub fn analyze_excluding(
        &self,
        project: &Project,
        excluded_classes: &[String],
    ) -> Result<DependencyAnalysis, DependencyAnalysisError> {
        Ok(self.run_excluding(project, excluded_classes)?.corrected)
    }

    /// Full run: raw and corrected classification plus starter membership.
    pub fn run(&self, project: &Project) -> Result<AnalysisRun, DependencyAnalysisError> {
        debug!("Starter-aware analysis of {}", project.name);
        let raw = self.usage.analyze(project)?;
        self.correct(project, raw)
    }

    /// Full run with class exclusions.
    pub fn run_excluding(
        &self,
        project: &Project,
        excluded_classes: &[String],
    ) -> Result<AnalysisRun, DependencyAnalysisError> {
        debug!(
            "Starter-aware analysis of {} ({} excluded classes)",
            project.name,
            excluded_classes.len()
        );
        let raw = self.usage.analyze_excluding(project, excluded_classes)?;
        self.correct(project, raw)
    }

    fn correct(
        &self,
        project: &Project,
        raw: DependencyAnalysis,
    ) -> Result<AnalysisRun, DependencyAnalysisError> {
        let root = self.graph.build_dependency_graph(project)?;
        let membership = build_membership(root.as_ref());
        log_membership(&membership);

        let (corrected, suppressed) = suppress(raw.clone(), &membership);
        info!(
            "{} starter(s) found, {} false positive(s) removed",
            membership.len(),
            suppressed.total()
        );

        Ok(AnalysisRun {
            raw,
            corrected,
            membership,
            suppressed,
        })
    }
}

fn log_membership(membership: &StarterMembership) {
    for (starter, members) in membership.sorted() {
        debug!("{}", starter);
        for member in members {
            debug!("   {}", member);
        }
    }
}
