//! Project containment inferred from tag strings
//!
//! There is no stored tree: `proj--a--b` is a direct child of `proj--a`
//! because it extends it by exactly one `--` segment.

use crate::streams::tag::{PROJECT_ROOT, PROJECT_SEPARATOR, Tag};
use std::collections::{BTreeMap, BTreeSet};

/// Parent project tag -> sorted direct children
pub type ProjectHierarchy = BTreeMap<Tag, Vec<Tag>>;

/// Whether `child` extends `parent` by exactly one `--`-delimited segment
pub fn is_direct_child(parent: &str, child: &str) -> bool {
    match child.strip_prefix(parent) {
        Some(ending) => {
            ending.starts_with(PROJECT_SEPARATOR) && ending.matches(PROJECT_SEPARATOR).count() == 1
        }
        None => false,
    }
}

/// Compute direct-child lists over `projects` plus the synthetic `proj` root
///
/// The result does not depend on input order, and parents without children
/// are absent from the map.
pub fn build_hierarchy<'a, I>(projects: I) -> ProjectHierarchy
where
    I: IntoIterator<Item = &'a Tag>,
{
    let mut all: BTreeSet<&str> = projects.into_iter().map(Tag::as_str).collect();
    all.insert(PROJECT_ROOT);

    let mut hierarchy = ProjectHierarchy::new();
    for parent in &all {
        let children: Vec<Tag> = all
            .iter()
            .filter(|child| is_direct_child(parent, child))
            .map(|child| Tag::new(*child))
            .collect();
        if !children.is_empty() {
            hierarchy.insert(Tag::new(*parent), children);
        }
    }

    hierarchy
}
