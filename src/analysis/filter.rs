//! False-positive removal.
//!
//! Rewrites a raw usage analysis so that artifacts pulled in through a
//! declared starter are not reported as used-undeclared, and starters
//! themselves are not reported as unused-declared.

use super::starters::StarterMembership;
use crate::models::{Artifact, DependencyAnalysis};
use std::collections::HashSet;
use tracing::debug;

/// Findings dropped from a raw analysis by [`remove_false_positives`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suppressed {
    /// Used-undeclared artifacts reachable through a starter.
    pub used_undeclared: HashSet<Artifact>,
    /// Unused-declared artifacts that are starters.
    pub unused_declared: HashSet<Artifact>,
}

impl Suppressed {
    /// Total number of dropped findings.
    pub fn total(&self) -> usize {
        self.used_undeclared.len() + self.unused_declared.len()
    }
}

/// Return the corrected analysis.
///
/// `used_declared` and `test_artifacts_with_non_test_scope` are passed
/// through untouched.
pub fn remove_false_positives(
    analysis: DependencyAnalysis,
    membership: &StarterMembership,
) -> DependencyAnalysis {
    suppress(analysis, membership).0
}

/// Like [`remove_false_positives`], but also returns what was dropped.
pub fn suppress(
    analysis: DependencyAnalysis,
    membership: &StarterMembership,
) -> (DependencyAnalysis, Suppressed) {
    let starter_deps = membership.all_members();

    let DependencyAnalysis {
        used_declared,
        used_undeclared,
        unused_declared,
        test_artifacts_with_non_test_scope,
    } = analysis;

    let (dropped_undeclared, used_undeclared): (HashSet<_>, HashSet<_>) = used_undeclared
        .into_iter()
        .partition(|artifact| starter_deps.contains(artifact));

    let (dropped_unused, unused_declared): (HashSet<_>, HashSet<_>) = unused_declared
        .into_iter()
        .partition(|artifact| membership.is_starter(artifact));

    for artifact in &dropped_undeclared {
        debug!("Used undeclared via starter: {}", artifact);
    }
    for artifact in &dropped_unused {
        debug!("Unused declared starter kept: {}", artifact);
    }

    let corrected = DependencyAnalysis {
        used_declared,
        used_undeclared,
        unused_declared,
        test_artifacts_with_non_test_scope,
    };
    let suppressed = Suppressed {
        used_undeclared: dropped_undeclared,
        unused_declared: dropped_unused,
    };

    (corrected, suppressed)
}
