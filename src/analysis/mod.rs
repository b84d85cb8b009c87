//! Starter-aware analysis passes.
//!
//! `starters` builds the starter membership from the dependency tree;
//! `filter` uses it to correct a raw usage analysis.

pub mod filter;
pub mod starters;

pub use filter::{remove_false_positives, suppress, Suppressed};
pub use starters::{build_membership, is_starter, StarterMembership, STARTER_GROUP_ID};
