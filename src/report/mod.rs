//! Report model and rendering.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::analyzer::AnalysisRun;
use crate::models::{AnalysisSummary, Artifact};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Name of the analyzed project.
    pub project: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Number of starters found in the dependency tree.
    pub starters_found: usize,
    /// Number of findings removed as starter false positives.
    pub false_positives_removed: usize,
}

/// A starter and the artifacts it pulls in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterEntry {
    pub starter: Artifact,
    pub members: Vec<Artifact>,
}

/// Corrected findings, each list sorted by coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Findings {
    pub used_declared: Vec<Artifact>,
    pub used_undeclared: Vec<Artifact>,
    pub unused_declared: Vec<Artifact>,
    pub test_artifacts_with_non_test_scope: Vec<Artifact>,
}

/// Findings removed by the starter filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppressedFindings {
    pub used_undeclared: Vec<Artifact>,
    pub unused_declared: Vec<Artifact>,
}

/// The complete dependency analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Counts before correction.
    pub raw_summary: AnalysisSummary,
    /// Counts after correction.
    pub summary: AnalysisSummary,
    pub findings: Findings,
    pub suppressed: SuppressedFindings,
    /// Empty when the membership listing is turned off.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub starters: Vec<StarterEntry>,
}

impl Report {
    /// Build a report from a finished analysis run.
    pub fn from_run(project: &str, run: &AnalysisRun, include_membership: bool) -> Self {
        let starters = if include_membership {
            run.membership
                .sorted()
                .into_iter()
                .map(|(starter, members)| StarterEntry {
                    starter: starter.clone(),
                    members: members.into_iter().cloned().collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            metadata: ReportMetadata {
                project: project.to_string(),
                analysis_date: Utc::now(),
                starters_found: run.membership.len(),
                false_positives_removed: run.suppressed.total(),
            },
            raw_summary: AnalysisSummary::from_analysis(&run.raw),
            summary: AnalysisSummary::from_analysis(&run.corrected),
            findings: Findings {
                used_declared: sorted(&run.corrected.used_declared),
                used_undeclared: sorted(&run.corrected.used_undeclared),
                unused_declared: sorted(&run.corrected.unused_declared),
                test_artifacts_with_non_test_scope: sorted(
                    &run.corrected.test_artifacts_with_non_test_scope,
                ),
            },
            suppressed: SuppressedFindings {
                used_undeclared: sorted(&run.suppressed.used_undeclared),
                unused_declared: sorted(&run.suppressed.unused_declared),
            },
            starters,
        }
    }
}

fn sorted(artifacts: &HashSet<Artifact>) -> Vec<Artifact> {
    let mut list: Vec<Artifact> = artifacts.iter().cloned().collect();
    list.sort();
    list
}
