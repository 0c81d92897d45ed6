use crate::error::LineError;
use crate::streams::stream::Stream;
use crate::streams::tag::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the extractor hands to the renderer
///
/// This is the content of the stream data file. `projects` is sorted and
/// holds every project tag seen on a stream line, ancestors included;
/// `streams` keeps master-document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamData {
    pub projects: Vec<Tag>,
    pub streams: Vec<Stream>,
}

impl StreamData {
    /// Scan a whole master document
    ///
    /// Lines without a marker are skipped. The first malformed or undated
    /// line aborts the scan.
    ///
    /// # Errors
    /// A [`LineError`] carrying the 1-based line number of the offending line.
    pub fn from_master(content: &str) -> Result<Self, LineError> {
        let mut streams = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            match Stream::from_line(line) {
                Ok(Some(stream)) => streams.push(stream),
                Ok(None) => {}
                Err(error) => {
                    return Err(LineError {
                        line: idx + 1,
                        error,
                    });
                }
            }
        }
        Ok(Self::from_streams(streams))
    }

    /// Build the record from classified streams, collecting their projects
    pub fn from_streams(streams: Vec<Stream>) -> Self {
        let projects: BTreeSet<Tag> = streams
            .iter()
            .flat_map(|s| s.projects().cloned())
            .collect();
        Self {
            projects: projects.into_iter().collect(),
            streams,
        }
    }

    /// Streams tagged with `project` (directly or through a descendant)
    pub fn streams_for_project(&self, project: &Tag) -> Vec<&Stream> {
        self.streams.iter().filter(|s| s.has_tag(project)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.streams.iter().filter(|s| !s.obsolete).count()
    }

    pub fn obsolete_count(&self) -> usize {
        self.streams.iter().filter(|s| s.obsolete).count()
    }
}
