//! Foam Work Stream Library
//!
//! This library maintains the generated pages of a Foam knowledge base. Work
//! streams are lines of `all-streams.md` tagged with `UPLOAD_TO_DASHBOARD` (or
//! `OBSOLETE_STREAM`) and one or more `[[YYYY-MM-DD]]` dates; projects are
//! hierarchical `proj--a--b` tags.
//!
//! # Architecture
//!
//! - **Command Layer**: `FoamWorkspace` - one method per command (`handlers`)
//! - **Domain Layer**: `streams` module - tag parsing, stream records, project hierarchy
//! - **Rendering Layer**: `pages` and `daily` modules - pure text generation
//! - **Persistence Layer**: `storage` module - TOML stream data and atomic writes,
//!   with optional Git commits
//!
//! # Example
//!
//! ```no_run
//! use foam_streams::{Config, FoamWorkspace};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let workspace = FoamWorkspace::new(Config::new("/home/me/foam"));
//!     println!("{}", workspace.handle_extract()?);
//!     println!("{}", workspace.handle_render("2024-01-06")?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod daily;
pub mod error;
mod git_ops;
mod handlers;
pub mod logging;
pub mod pages;
pub mod storage;
pub mod streams;
pub mod validation;

use std::path::PathBuf;

// Re-export commonly used types
pub use config::Config;
pub use daily::DayOutcome;
pub use error::{DailyNoteError, LineError, StreamError, TagError};
pub use git_ops::GitOps;
pub use storage::Storage;
pub use streams::{Stream, StreamData, Tag};

/// A Foam workspace and the settings of the current run
///
/// Every command reads its inputs completely and renders its outputs in
/// memory first; files are only written once nothing can fail anymore.
pub struct FoamWorkspace {
    pub(crate) config: Config,
    pub(crate) storage: Storage,
    pub(crate) git: Option<GitOps>,
}

impl FoamWorkspace {
    /// Create a workspace handle
    ///
    /// # Example
    /// ```no_run
    /// # use foam_streams::{Config, FoamWorkspace};
    /// let workspace = FoamWorkspace::new(Config::new("notes").with_sync_git(true));
    /// ```
    pub fn new(config: Config) -> Self {
        let storage = Storage::new(config.stream_data_path());
        let git = config
            .sync_git
            .then(|| GitOps::new(&config.base_path));
        Self {
            config,
            storage,
            git,
        }
    }

    /// Commit written files when git sync is enabled
    fn sync_written(&self, paths: &[PathBuf], message: &str) -> anyhow::Result<()> {
        match &self.git {
            Some(git) => git.sync(paths, message),
            None => Ok(()),
        }
    }
}
