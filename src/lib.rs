//! StarterLens - starter-aware dependency analysis.
//!
//! Dependency usage analyzers report artifacts that reach a project through
//! a Spring Boot starter as "used but undeclared", and report starters whose
//! own classes are never referenced as "unused". Both are false positives:
//! a starter is declared on purpose for the bundle it brings in.
//!
//! [`StarterAwareAnalyzer`] composes an external usage analyzer with an
//! external dependency graph builder, finds the starters in the resolved
//! tree, and removes those findings from the raw result.

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;

pub use analysis::{build_membership, is_starter, remove_false_positives, StarterMembership};
pub use analyzer::{
    AnalysisRun, DependencyGraphBuilder, Project, StarterAwareAnalyzer, UsageAnalyzer,
};
pub use error::{AnalysisError, DependencyAnalysisError, GraphBuildError};
pub use models::{Artifact, DependencyAnalysis, DependencyNode};
