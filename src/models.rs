//! Data models for the starter-aware dependency analyzer.
//!
//! This module contains the artifact coordinates, the resolved dependency
//! tree, and the four-way usage classification that the analyzer corrects.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ArtifactParseError;

/// A resolved build artifact.
///
/// Identity is group, artifact, version, classifier and type. The scope is
/// carried along for display but never takes part in equality, hashing or
/// ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_type() -> String {
    "jar".to_string()
}

impl Artifact {
    /// Creates a `jar` artifact with no classifier and no scope.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            kind: default_type(),
            scope: None,
        }
    }

    /// Returns a copy with the given scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns a copy with the given classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// `group:artifact`, the short form used in log lines.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    fn identity(&self) -> (&str, &str, &str, Option<&str>, &str) {
        (
            &self.group_id,
            &self.artifact_id,
            &self.version,
            self.classifier.as_deref(),
            &self.kind,
        )
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Artifact {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Artifact {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

/// Coordinates in `group:artifact:type[:classifier]:version` form.
///
/// Only identity fields are written; the scope is not part of the coordinates.
impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.kind)?;
        if let Some(ref classifier) = self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

impl FromStr for Artifact {
    type Err = ArtifactParseError;

    /// Accepts `g:a:v`, `g:a:type:v` and `g:a:type:classifier:v`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ArtifactParseError::EmptySegment(s.to_string()));
        }

        let artifact = match parts.as_slice() {
            [g, a, v] => Artifact::new(*g, *a, *v),
            [g, a, t, v] => Artifact {
                kind: t.to_string(),
                ..Artifact::new(*g, *a, *v)
            },
            [g, a, t, c, v] => Artifact {
                kind: t.to_string(),
                ..Artifact::new(*g, *a, *v)
            }
            .with_classifier(*c),
            _ => return Err(ArtifactParseError::SegmentCount(s.to_string())),
        };

        Ok(artifact)
    }
}

/// A node of the resolved dependency tree.
///
/// The same artifact may appear under several parents; nodes are never
/// shared between branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyNode {
    pub artifact: Artifact,
    #[serde(default)]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Creates a leaf node.
    pub fn leaf(artifact: Artifact) -> Self {
        Self {
            artifact,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(artifact: Artifact, children: Vec<DependencyNode>) -> Self {
        Self { artifact, children }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

/// Usage classification of a project's dependencies.
///
/// The same shape is used for the raw result produced by the usage analyzer
/// and for the corrected result returned by the starter-aware analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyAnalysis {
    /// Declared and referenced.
    #[serde(default)]
    pub used_declared: HashSet<Artifact>,
    /// Referenced but reachable only transitively.
    #[serde(default)]
    pub used_undeclared: HashSet<Artifact>,
    /// Declared but never referenced.
    #[serde(default)]
    pub unused_declared: HashSet<Artifact>,
    /// Test-scoped but referenced from non-test code.
    #[serde(default)]
    pub test_artifacts_with_non_test_scope: HashSet<Artifact>,
}

impl DependencyAnalysis {
    /// True when any of the three warning categories is non-empty.
    pub fn has_warnings(&self) -> bool {
        !self.used_undeclared.is_empty()
            || !self.unused_declared.is_empty()
            || !self.test_artifacts_with_non_test_scope.is_empty()
    }
}

/// Per-category counts of a [`DependencyAnalysis`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub used_declared: usize,
    pub used_undeclared: usize,
    pub unused_declared: usize,
    pub test_artifacts_with_non_test_scope: usize,
}

impl AnalysisSummary {
    /// Creates a summary from an analysis.
    pub fn from_analysis(analysis: &DependencyAnalysis) -> Self {
        Self {
            used_declared: analysis.used_declared.len(),
            used_undeclared: analysis.used_undeclared.len(),
            unused_declared: analysis.unused_declared.len(),
            test_artifacts_with_non_test_scope: analysis.test_artifacts_with_non_test_scope.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_is_not_part_of_identity() {
        let compile = Artifact::new("org.example", "lib", "1.0").with_scope("compile");
        let runtime = Artifact::new("org.example", "lib", "1.0").with_scope("runtime");
        assert_eq!(compile, runtime);

        let mut set = HashSet::new();
        set.insert(compile);
        assert!(set.contains(&runtime));
    }

    #[test]
    fn test_classifier_and_type_are_part_of_identity() {
        let plain = Artifact::new("org.example", "lib", "1.0");
        assert_ne!(plain, plain.clone().with_classifier("tests"));

        let pom = Artifact {
            kind: "pom".to_string(),
            ..plain.clone()
        };
        assert_ne!(plain, pom);
    }

    #[test]
    fn test_parse_coordinates() {
        let a: Artifact = "org.example:lib:1.0".parse().unwrap();
        assert_eq!(a.kind, "jar");
        assert_eq!(a.scope, None);

        let a: Artifact = "org.example:lib:pom:1.0".parse().unwrap();
        assert_eq!(a.kind, "pom");
        assert_eq!(a.version, "1.0");

        let a: Artifact = "org.example:lib:jar:sources:1.0".parse().unwrap();
        assert_eq!(a.classifier.as_deref(), Some("sources"));
        assert_eq!(a.version, "1.0");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("org.example".parse::<Artifact>().is_err());
        assert!("org.example::1.0".parse::<Artifact>().is_err());
        assert!("a:b:c:d:e:f".parse::<Artifact>().is_err());
    }

    #[test]
    fn test_display() {
        let a = Artifact::new("org.example", "lib", "1.0");
        assert_eq!(a.to_string(), "org.example:lib:jar:1.0");

        let a = Artifact::new("org.example", "lib", "1.0").with_classifier("tests");
        assert_eq!(a.to_string(), "org.example:lib:jar:tests:1.0");

        let a = Artifact::new("org.example", "lib", "1.0").with_scope("compile");
        assert_eq!(a.to_string(), "org.example:lib:jar:1.0");
    }

    #[test]
    fn test_display_parses_back_to_same_artifact() {
        let base = Artifact::new("org.example", "lib", "1.0");
        let pom = Artifact {
            kind: "pom".to_string(),
            ..base.clone()
        };
        let shapes = vec![
            base.clone(),
            base.clone().with_classifier("tests"),
            base.clone().with_scope("test"),
            base.clone().with_classifier("tests").with_scope("runtime"),
            pom.clone(),
            pom.with_classifier("sources"),
        ];

        for artifact in shapes {
            let parsed: Artifact = artifact.to_string().parse().unwrap();
            assert_eq!(parsed, artifact, "{}", artifact);
            assert_eq!(parsed.version, artifact.version);
            assert_eq!(parsed.classifier, artifact.classifier);
            assert_eq!(parsed.kind, artifact.kind);
        }
    }

    #[test]
    fn test_deserialize_node_defaults() {
        let json = r#"{"artifact": {"group_id": "g", "artifact_id": "a", "version": "1"}}"#;
        let node: DependencyNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.artifact.kind, "jar");
        assert!(node.children.is_empty());
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn test_analysis_summary() {
        let mut analysis = DependencyAnalysis::default();
        analysis
            .used_undeclared
            .insert(Artifact::new("g", "a", "1"));
        analysis
            .used_undeclared
            .insert(Artifact::new("g", "b", "1"));
        analysis.unused_declared.insert(Artifact::new("g", "c", "1"));

        let summary = AnalysisSummary::from_analysis(&analysis);
        assert_eq!(summary.used_undeclared, 2);
        assert_eq!(summary.unused_declared, 1);
        assert_eq!(summary.used_declared, 0);
        assert!(analysis.has_warnings());
        assert!(!DependencyAnalysis::default().has_warnings());
    }
}
