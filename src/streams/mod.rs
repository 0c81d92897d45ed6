//! Work stream domain models
//!
//! This module contains the parsing side of the tool:
//! - `tag`: typed tags and the per-line scanner
//! - `stream`: classification of a tagged line into a stream record
//! - `hierarchy`: project containment inferred from tag prefixes
//! - `stream_data`: the record passed from the extractor to the renderer

mod hierarchy;
mod stream;
mod stream_data;
mod tag;

// Re-export all public types
pub use hierarchy::{ProjectHierarchy, build_hierarchy, is_direct_child};
pub use stream::{OBSOLETE_MARKER, Stream, UPLOAD_MARKER};
pub use stream_data::StreamData;
pub use tag::{
    PROJECT_PREFIX, PROJECT_ROOT, PROJECT_SEPARATOR, Tag, extract_tags, strip_tag, tag_pattern,
};
