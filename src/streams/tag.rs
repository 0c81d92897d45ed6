//! Typed inline tags and the per-line tag scanner
//!
//! A tag is written either as `[[name]]` (also `#[[name]]`) or as `#name`.
//! Both forms normalize to the same [`Tag`], so nothing downstream has to
//! look at the raw syntax again.

use crate::error::TagError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of the project hierarchy; never emitted as a tag itself
pub const PROJECT_ROOT: &str = "proj";
/// Prefix shared by every project tag
pub const PROJECT_PREFIX: &str = "proj--";
/// Separator between project hierarchy segments
pub const PROJECT_SEPARATOR: &str = "--";

static BRACKET_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\[\]]*)\]\]").expect("valid bracket tag regex"));
// `#` must not be glued to a word, another `#`, or a `/` (URL fragments).
static HASH_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w#/])#(\w[\w-]*)").expect("valid hash tag regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// A normalized tag name such as `UPLOAD_TO_DASHBOARD`, `2024-01-05` or `proj--a--b`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact `dddd-dd-dd` shape; the calendar value is not checked
    pub fn is_date(&self) -> bool {
        DATE_RE.is_match(&self.0)
    }

    /// `proj--` followed by at least one more character
    pub fn is_project(&self) -> bool {
        self.0.len() > PROJECT_PREFIX.len() && self.0.starts_with(PROJECT_PREFIX)
    }

    /// Ancestor project tags, longest first, down to the bare `proj--x` form
    ///
    /// `proj--a--b--c` yields `proj--a--b` then `proj--a`. Non-project tags
    /// have no ancestors.
    pub fn project_ancestors(&self) -> Vec<Tag> {
        if !self.is_project() {
            return Vec::new();
        }

        // The first separator belongs to the `proj--` prefix itself.
        let mut cuts: Vec<usize> = self
            .0
            .match_indices(PROJECT_SEPARATOR)
            .map(|(idx, _)| idx)
            .filter(|&idx| idx >= PROJECT_PREFIX.len())
            .collect();
        cuts.reverse();

        // `proj--a----b` would otherwise yield `proj--a--`, an empty segment.
        cuts.into_iter()
            .map(|idx| Tag::new(&self.0[..idx]))
            .filter(|t| t.is_project() && !t.0.ends_with(PROJECT_SEPARATOR))
            .collect()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract every tag on `line`, in first-appearance order without duplicates
///
/// Project tags are followed by their ancestors (see [`Tag::project_ancestors`]).
///
/// # Errors
/// * [`TagError::EmptyBracket`] for `[[]]` or `[[  ]]`
/// * [`TagError::UnterminatedBracket`] when a `[[` is never closed
pub fn extract_tags(line: &str) -> Result<Vec<Tag>, TagError> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in BRACKET_TAG_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = inner.as_str().trim();
        if name.is_empty() {
            return Err(TagError::EmptyBracket);
        }
        found.push((whole.start(), name.to_string()));
    }

    // Blank out bracket tags so their contents are not rescanned as hash tags,
    // keeping byte offsets intact for ordering.
    let remainder = BRACKET_TAG_RE.replace_all(line, |caps: &regex::Captures| {
        " ".repeat(caps[0].len())
    });

    if let Some(idx) = remainder.find("[[") {
        let near: String = remainder[idx..].chars().take(24).collect();
        return Err(TagError::UnterminatedBracket(near.trim_end().to_string()));
    }

    for caps in HASH_TAG_RE.captures_iter(&remainder) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let trimmed = name.as_str().trim_end_matches('-');
        found.push((name.start(), trimmed.to_string()));
    }

    found.sort_by_key(|(pos, _)| *pos);

    let mut tags: Vec<Tag> = Vec::new();
    for (_, name) in found {
        let tag = Tag::new(name);
        let ancestors = tag.project_ancestors();
        push_unique(&mut tags, tag);
        for ancestor in ancestors {
            push_unique(&mut tags, ancestor);
        }
    }

    Ok(tags)
}

fn push_unique(tags: &mut Vec<Tag>, tag: Tag) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Pattern matching every written form of `tag`: `#[[tag]]`, `[[tag]]`, `#tag`
pub fn tag_pattern(tag: &str) -> Regex {
    let escaped = regex::escape(tag);
    Regex::new(&format!(r"#?\[\[\s*{escaped}\s*\]\]|#{escaped}\b"))
        .expect("valid tag pattern")
}

/// Remove every match of `pattern` from `text`
///
/// A tag sitting between two words leaves a single space behind, not two.
pub fn strip_tag(text: &str, pattern: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        last = m.end();
        if out.ends_with([' ', '\t']) && text[last..].starts_with([' ', '\t']) {
            last += 1;
        }
    }
    out.push_str(&text[last..]);
    out
}
