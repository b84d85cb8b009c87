//! Markdown and JSON report generation.
//!
//! This module renders a [`Report`] built from a finished analysis run.

use super::{Findings, Report, ReportMetadata, StarterEntry, SuppressedFindings};
use crate::models::{AnalysisSummary, Artifact};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# StarterLens Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.raw_summary, &report.summary));
    output.push_str(&generate_findings_section(&report.findings));
    output.push_str(&generate_suppressed_section(&report.suppressed));
    output.push_str(&generate_starters_section(&report.starters));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Project:** {}\n", metadata.project));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Starters Found:** {}\n", metadata.starters_found));
    section.push_str(&format!(
        "- **False Positives Removed:** {}\n",
        metadata.false_positives_removed
    ));
    section.push('\n');

    section
}

/// Generate the raw vs corrected summary table.
fn generate_summary_section(raw: &AnalysisSummary, corrected: &AnalysisSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Category | Raw | Corrected |\n");
    section.push_str("|:---|:---:|:---:|\n");

    let rows = [
        ("Used declared", raw.used_declared, corrected.used_declared),
        ("Used undeclared", raw.used_undeclared, corrected.used_undeclared),
        ("Unused declared", raw.unused_declared, corrected.unused_declared),
        (
            "Test-scoped, used outside tests",
            raw.test_artifacts_with_non_test_scope,
            corrected.test_artifacts_with_non_test_scope,
        ),
    ];
    for (label, before, after) in rows {
        section.push_str(&format!("| {} | {} | {} |\n", label, before, after));
    }
    section.push('\n');

    section
}

/// Generate the corrected findings section.
fn generate_findings_section(findings: &Findings) -> String {
    let mut section = String::new();

    section.push_str("## Findings\n\n");

    if findings.used_undeclared.is_empty()
        && findings.unused_declared.is_empty()
        && findings.test_artifacts_with_non_test_scope.is_empty()
    {
        section.push_str("No dependency problems found.\n\n");
        return section;
    }

    section.push_str(&artifact_list(
        "Used undeclared dependencies",
        &findings.used_undeclared,
    ));
    section.push_str(&artifact_list(
        "Unused declared dependencies",
        &findings.unused_declared,
    ));
    section.push_str(&artifact_list(
        "Non-test scoped test only dependencies",
        &findings.test_artifacts_with_non_test_scope,
    ));

    section
}

/// Generate the section listing what the starter filter removed.
fn generate_suppressed_section(suppressed: &SuppressedFindings) -> String {
    if suppressed.used_undeclared.is_empty() && suppressed.unused_declared.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Suppressed by Starters\n\n");
    section.push_str(&artifact_list(
        "Used through a declared starter",
        &suppressed.used_undeclared,
    ));
    section.push_str(&artifact_list(
        "Starters kept although unused",
        &suppressed.unused_declared,
    ));

    section
}

/// Generate the starter membership listing.
fn generate_starters_section(starters: &[StarterEntry]) -> String {
    if starters.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Starters\n\n");
    for entry in starters {
        section.push_str(&format!(
            "### `{}` ({} members)\n\n",
            entry.starter,
            entry.members.len()
        ));
        for member in &entry.members {
            section.push_str(&format!("- `{}`\n", member));
        }
        section.push('\n');
    }

    section
}

fn artifact_list(title: &str, artifacts: &[Artifact]) -> String {
    if artifacts.is_empty() {
        return String::new();
    }

    let mut list = format!("### {}\n\n", title);
    for artifact in artifacts {
        match artifact.scope {
            Some(ref scope) => list.push_str(&format!("- `{}` ({})\n", artifact, scope)),
            None => list.push_str(&format!("- `{}`\n", artifact)),
        }
    }
    list.push('\n');
    list
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by StarterLens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_run;

    #[test]
    fn test_generate_markdown_report() {
        let report = Report::from_run("demo", &sample_run(), true);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# StarterLens Report"));
        assert!(markdown.contains("- **Project:** demo"));
        assert!(markdown.contains("| Used undeclared | 2 | 1 |"));
        assert!(markdown.contains("### Used undeclared dependencies"));
        assert!(markdown
            .contains("- `com.fasterxml.jackson.core:jackson-databind:jar:2.15.3` (compile)"));
        assert!(markdown.contains("## Suppressed by Starters"));
        assert!(markdown.contains("## Starters"));
        assert!(!markdown.contains("### Unused declared dependencies"));
    }

    #[test]
    fn test_clean_findings() {
        let findings = Findings::default();
        let section = generate_findings_section(&findings);
        assert!(section.contains("No dependency problems found."));
    }

    #[test]
    fn test_no_suppressed_section_when_nothing_removed() {
        assert!(generate_suppressed_section(&SuppressedFindings::default()).is_empty());
        assert!(generate_starters_section(&[]).is_empty());
    }

    #[test]
    fn test_generate_json_report() {
        let report = Report::from_run("demo", &sample_run(), false);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"raw_summary\""));
        assert!(json.contains("\"used_undeclared\""));
        assert!(json.contains("\"suppressed\""));
        assert!(!json.contains("\"starters\""));
    }
}
