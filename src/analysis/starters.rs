//! Starter detection and membership.
//!
//! A Spring Boot starter is a dependency whose only job is to pull in a
//! curated set of other artifacts. This module walks the resolved dependency
//! tree once and records, for every starter it meets, every artifact found
//! below it.

use crate::models::{Artifact, DependencyNode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Group id every starter is published under.
pub const STARTER_GROUP_ID: &str = "org.springframework.boot";

static STARTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^spring-boot-starter(-[a-z0-9-]+)?$").unwrap());

/// Returns true if `artifact` follows the starter naming rule.
pub fn is_starter(artifact: &Artifact) -> bool {
    artifact.group_id == STARTER_GROUP_ID && STARTER_PATTERN.is_match(&artifact.artifact_id)
}

/// Starter artifact → artifacts it pulls in.
///
/// Built fresh for every analysis run by [`build_membership`] and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarterMembership {
    members: HashMap<Artifact, HashSet<Artifact>>,
}

impl StarterMembership {
    /// True if `artifact` is one of the recorded starters.
    pub fn is_starter(&self, artifact: &Artifact) -> bool {
        self.members.contains_key(artifact)
    }

    /// Members recorded for `starter`, if it is a recorded starter.
    pub fn members_of(&self, starter: &Artifact) -> Option<&HashSet<Artifact>> {
        self.members.get(starter)
    }

    /// True if `artifact` was pulled in by any starter.
    pub fn is_member(&self, artifact: &Artifact) -> bool {
        self.members.values().any(|m| m.contains(artifact))
    }

    /// Union of every starter's member set.
    pub fn all_members(&self) -> HashSet<&Artifact> {
        self.members.values().flatten().collect()
    }

    /// Recorded starters.
    pub fn starters(&self) -> impl Iterator<Item = &Artifact> {
        self.members.keys()
    }

    /// Starters with their members.
    pub fn iter(&self) -> impl Iterator<Item = (&Artifact, &HashSet<Artifact>)> {
        self.members.iter()
    }

    /// Starters sorted by coordinates, each with its members sorted.
    pub fn sorted(&self) -> Vec<(&Artifact, Vec<&Artifact>)> {
        let mut entries: Vec<_> = self
            .members
            .iter()
            .map(|(starter, members)| {
                let mut members: Vec<&Artifact> = members.iter().collect();
                members.sort();
                (starter, members)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of recorded starters.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn record_starter(&mut self, starter: &Artifact) {
        self.members.entry(starter.clone()).or_default();
    }

    fn record_member(&mut self, starter: &Artifact, member: &Artifact) {
        if starter == member {
            return;
        }
        self.members
            .entry(starter.clone())
            .or_default()
            .insert(member.clone());
    }
}

/// Walk the dependency tree rooted at `root` and collect starter membership.
///
/// The walk is depth-first pre-order, carrying the nearest enclosing starter
/// down each path. The first starter met on a path claims everything below
/// it, nested starters included; a nested starter never opens its own entry.
/// `None` means a project without dependencies and yields an empty mapping.
pub fn build_membership(root: Option<&DependencyNode>) -> StarterMembership {
    let mut membership = StarterMembership::default();

    let Some(root) = root else {
        return membership;
    };

    let mut stack: Vec<(&DependencyNode, Option<&Artifact>)> = vec![(root, None)];

    while let Some((node, enclosing)) = stack.pop() {
        let artifact = &node.artifact;

        let active = match enclosing {
            Some(starter) => {
                membership.record_member(starter, artifact);
                Some(starter)
            }
            None if is_starter(artifact) => {
                debug!("Found starter: {}", artifact);
                membership.record_starter(artifact);
                Some(artifact)
            }
            None => None,
        };

        // Reversed so siblings are visited in declaration order.
        for child in node.children.iter().rev() {
            stack.push((child, active));
        }
    }

    membership
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(coords: &str) -> Artifact {
        coords.parse().unwrap()
    }

    fn leaf(coords: &str) -> DependencyNode {
        DependencyNode::leaf(art(coords))
    }

    fn node(coords: &str, children: Vec<DependencyNode>) -> DependencyNode {
        DependencyNode::with_children(art(coords), children)
    }

    const WEB: &str = "org.springframework.boot:spring-boot-starter-web:3.2.0";
    const STARTER: &str = "org.springframework.boot:spring-boot-starter:3.2.0";
    const JSON: &str = "org.springframework.boot:spring-boot-starter-json:3.2.0";
    const WEBMVC: &str = "org.springframework:spring-webmvc:6.1.1";
    const DATABIND: &str = "com.fasterxml.jackson.core:jackson-databind:2.15.3";

    fn is_descendant(root: &DependencyNode, ancestor: &Artifact, target: &Artifact) -> bool {
        fn contains(node: &DependencyNode, target: &Artifact) -> bool {
            node.children
                .iter()
                .any(|c| &c.artifact == target || contains(c, target))
        }
        if &root.artifact == ancestor && contains(root, target) {
            return true;
        }
        root.children
            .iter()
            .any(|c| is_descendant(c, ancestor, target))
    }

    #[test]
    fn test_starter_naming_rule() {
        assert!(is_starter(&art(STARTER)));
        assert!(is_starter(&art(WEB)));
        assert!(is_starter(&art(
            "org.springframework.boot:spring-boot-starter-data-jpa:3.2.0"
        )));
        assert!(is_starter(&art(
            "org.springframework.boot:spring-boot-starter-oauth2-client:3.2.0"
        )));

        assert!(!is_starter(&art("org.springframework.boot:spring-boot:3.2.0")));
        assert!(!is_starter(&art(
            "org.springframework.boot:spring-boot-starter-Web:3.2.0"
        )));
        assert!(!is_starter(&art(
            "org.springframework.boot:spring-boot-starter-:3.2.0"
        )));
        assert!(!is_starter(&art(
            "org.springframework.boot:spring-boot-starterweb:3.2.0"
        )));
        assert!(!is_starter(&art(
            "com.example:spring-boot-starter-custom:1.0"
        )));
    }

    #[test]
    fn test_absent_root_is_empty() {
        assert!(build_membership(None).is_empty());
    }

    #[test]
    fn test_tree_without_starters_is_empty() {
        let root = node(
            "com.example:app:1.0",
            vec![node(DATABIND, vec![leaf("com.fasterxml.jackson.core:jackson-core:2.15.3")])],
        );
        assert!(build_membership(Some(&root)).is_empty());
    }

    #[test]
    fn test_starter_web_members() {
        let root = node(
            "com.example:app:1.0",
            vec![
                node(
                    WEB,
                    vec![
                        node(STARTER, vec![leaf("org.springframework:spring-core:6.1.1")]),
                        leaf(JSON),
                        leaf(WEBMVC),
                    ],
                ),
                leaf(DATABIND),
            ],
        );

        let membership = build_membership(Some(&root));

        assert_eq!(membership.len(), 1);
        let members = membership.members_of(&art(WEB)).unwrap();
        assert_eq!(members.len(), 4);
        assert!(members.contains(&art(STARTER)));
        assert!(members.contains(&art(JSON)));
        assert!(members.contains(&art(WEBMVC)));
        assert!(members.contains(&art("org.springframework:spring-core:6.1.1")));
        assert!(!membership.is_member(&art(DATABIND)));
        assert!(!membership.is_member(&art("com.example:app:1.0")));
    }

    #[test]
    fn test_nested_starters_belong_to_outermost() {
        let root = node(
            "com.example:app:1.0",
            vec![node(WEB, vec![node(JSON, vec![leaf(DATABIND)])])],
        );

        let membership = build_membership(Some(&root));

        assert_eq!(membership.len(), 1);
        assert!(!membership.is_starter(&art(JSON)));
        assert!(membership.members_of(&art(JSON)).is_none());

        let members = membership.members_of(&art(WEB)).unwrap();
        assert!(members.contains(&art(JSON)));
        assert!(members.contains(&art(DATABIND)));
    }

    #[test]
    fn test_starter_without_children_is_still_recorded() {
        let test_starter = "org.springframework.boot:spring-boot-starter-test:jar:3.2.0";
        let root = node("com.example:app:1.0", vec![leaf(test_starter)]);

        let membership = build_membership(Some(&root));

        assert!(membership.is_starter(&art(test_starter)));
        assert!(membership.members_of(&art(test_starter)).unwrap().is_empty());
        assert!(membership.all_members().is_empty());
    }

    #[test]
    fn test_sibling_starters_get_separate_entries() {
        let actuator = "org.springframework.boot:spring-boot-starter-actuator:3.2.0";
        let root = node(
            "com.example:app:1.0",
            vec![
                node(WEB, vec![leaf(WEBMVC), leaf(STARTER)]),
                node(actuator, vec![leaf(STARTER), leaf("io.micrometer:micrometer-core:1.12.0")]),
            ],
        );

        let membership = build_membership(Some(&root));

        assert_eq!(membership.len(), 2);
        assert!(membership.members_of(&art(WEB)).unwrap().contains(&art(STARTER)));
        assert!(membership.members_of(&art(actuator)).unwrap().contains(&art(STARTER)));
        // Diamond: the shared starter is counted once in the union.
        assert_eq!(membership.all_members().len(), 3);
    }

    #[test]
    fn test_members_are_descendants_of_their_starter() {
        let root = node(
            "com.example:app:1.0",
            vec![
                node(
                    WEB,
                    vec![
                        node(STARTER, vec![leaf("org.yaml:snakeyaml:2.2")]),
                        node(JSON, vec![leaf(DATABIND)]),
                    ],
                ),
                node("org.slf4j:slf4j-api:2.0.9", vec![]),
            ],
        );

        let membership = build_membership(Some(&root));

        for (starter, members) in membership.iter() {
            for member in members {
                assert_ne!(member, starter);
                assert!(is_descendant(&root, starter, member), "{} under {}", member, starter);
            }
        }
    }

    #[test]
    fn test_sorted_listing() {
        let root = node(
            "com.example:app:1.0",
            vec![node(WEB, vec![leaf(WEBMVC), leaf(JSON)])],
        );

        let membership = build_membership(Some(&root));
        let sorted = membership.sorted();

        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].0, &art(WEB));
        // "org.springframework" sorts before "org.springframework.boot".
        assert_eq!(sorted[0].1, vec![&art(WEBMVC), &art(JSON)]);
    }
}
