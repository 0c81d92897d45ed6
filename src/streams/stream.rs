use crate::error::StreamError;
use crate::streams::tag::{Tag, extract_tags, strip_tag, tag_pattern};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker surfacing a line on the generated dashboards
pub const UPLOAD_MARKER: &str = "UPLOAD_TO_DASHBOARD";
/// Marker for a retired stream that is still listed for reference
pub const OBSOLETE_MARKER: &str = "OBSOLETE_STREAM";

static UPLOAD_MARKER_RE: Lazy<Regex> = Lazy::new(|| tag_pattern(UPLOAD_MARKER));
static OBSOLETE_MARKER_RE: Lazy<Regex> = Lazy::new(|| tag_pattern(OBSOLETE_MARKER));

const LIST_BULLETS: [char; 3] = ['*', '-', '+'];

/// One work stream: a marked, dated line of the master document
///
/// Field names match the keys of the stream data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    /// The line as written in the master document
    pub raw_text: String,
    /// Display text: markers removed, list bullet stripped
    pub text: String,
    /// Date tags in first-appearance order
    pub dates: Vec<String>,
    /// Most recent entry of `dates`
    pub last_date: String,
    /// Every tag on the line, project ancestors included
    pub tags: Vec<Tag>,
    pub obsolete: bool,
}

impl Stream {
    /// Classify an already-tagged line
    ///
    /// Returns `Ok(None)` when the line carries neither the upload nor the
    /// obsolete marker.
    ///
    /// # Errors
    /// [`StreamError::UndatedStream`] when the line is marked but has no date tag.
    pub fn classify(raw_text: &str, tags: Vec<Tag>) -> Result<Option<Self>, StreamError> {
        let upload = tags.iter().any(|t| t.as_str() == UPLOAD_MARKER);
        let obsolete = tags.iter().any(|t| t.as_str() == OBSOLETE_MARKER);
        if !upload && !obsolete {
            return Ok(None);
        }

        let mut dates: Vec<String> = Vec::new();
        for tag in tags.iter().filter(|t| t.is_date()) {
            if !dates.iter().any(|d| d == tag.as_str()) {
                dates.push(tag.as_str().to_string());
            }
        }

        let Some(last_date) = dates.iter().max().cloned() else {
            return Err(StreamError::UndatedStream(raw_text.trim().to_string()));
        };

        Ok(Some(Self {
            raw_text: raw_text.to_string(),
            text: display_text(raw_text),
            dates,
            last_date,
            tags,
            obsolete,
        }))
    }

    /// Tag and classify a raw line in one step
    pub fn from_line(raw_text: &str) -> Result<Option<Self>, StreamError> {
        let tags = extract_tags(raw_text).map_err(|source| StreamError::MalformedTag {
            source,
            text: raw_text.trim().to_string(),
        })?;
        Self::classify(raw_text, tags)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Project tags of this stream, ancestors included
    pub fn projects(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| t.is_project())
    }
}

fn display_text(raw_text: &str) -> String {
    let without_markers = strip_tag(&strip_tag(raw_text, &UPLOAD_MARKER_RE), &OBSOLETE_MARKER_RE);
    let trimmed = without_markers.trim();
    trimmed
        .strip_prefix(LIST_BULLETS)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmarked_line_is_skipped() {
        let result = Stream::from_line("* just a note [[2024-01-01]] [[proj--a]]").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_marked_line_without_date_fails() {
        let err = Stream::from_line("* a stream #UPLOAD_TO_DASHBOARD").unwrap_err();
        assert_eq!(
            err,
            StreamError::UndatedStream("* a stream #UPLOAD_TO_DASHBOARD".to_string())
        );
    }

    #[test]
    fn test_display_text_strips_markers_and_bullet() {
        let stream = Stream::from_line("  * Write report [[2024-02-01]] #UPLOAD_TO_DASHBOARD  ")
            .unwrap()
            .unwrap();
        assert_eq!(stream.text, "Write report [[2024-02-01]]");
        assert!(!stream.obsolete);
    }

    #[test]
    fn test_last_date_is_maximum() {
        let stream = Stream::from_line(
            "- x [[2024-03-01]] [[2023-12-31]] [[2024-03-15]] [[2024-01-01]] [[UPLOAD_TO_DASHBOARD]]",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            stream.dates,
            vec!["2024-03-01", "2023-12-31", "2024-03-15", "2024-01-01"]
        );
        assert_eq!(stream.last_date, "2024-03-15");
        assert_eq!(stream.dates.iter().max(), Some(&stream.last_date));
    }

    #[test]
    fn test_obsolete_marker_wins() {
        let stream =
            Stream::from_line("* old [[2022-01-01]] #UPLOAD_TO_DASHBOARD #OBSOLETE_STREAM")
                .unwrap()
                .unwrap();
        assert!(stream.obsolete);
        assert_eq!(stream.text, "old [[2022-01-01]]");
    }

    #[test]
    fn test_marker_mid_line_leaves_single_space() {
        let stream = Stream::from_line("* ship #UPLOAD_TO_DASHBOARD it [[2024-04-01]]")
            .unwrap()
            .unwrap();
        assert_eq!(stream.text, "ship it [[2024-04-01]]");
    }
}
