use std::path::{Path, PathBuf};

/// Master document holding every stream line
pub const MASTER_DOCUMENT: &str = "all-streams.md";
/// Default stream data file name inside the base path
pub const DEFAULT_STREAM_DATA: &str = "all-streams-data.toml";

/// Settings for one command run
///
/// Built once from the command line and passed to each stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Foam workspace
    pub base_path: PathBuf,
    /// Stream data file; `<base>/all-streams-data.toml` when unset
    pub stream_data_path: Option<PathBuf>,
    /// Daily note template, required by `add-day`
    pub template_path: Option<PathBuf>,
    /// Commit written files when the base path is in a git repository
    pub sync_git: bool,
}

impl Config {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stream_data_path: None,
            template_path: None,
            sync_git: false,
        }
    }

    pub fn with_stream_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stream_data_path = Some(path.into());
        self
    }

    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    pub fn with_sync_git(mut self, sync_git: bool) -> Self {
        self.sync_git = sync_git;
        self
    }

    pub fn master_document(&self) -> PathBuf {
        self.base_path.join(MASTER_DOCUMENT)
    }

    pub fn stream_data_path(&self) -> PathBuf {
        self.stream_data_path
            .clone()
            .unwrap_or_else(|| self.base_path.join(DEFAULT_STREAM_DATA))
    }

    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    /// Location of a generated or daily page inside the base path
    pub fn page_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::new("/notes");
        assert_eq!(config.master_document(), PathBuf::from("/notes/all-streams.md"));
        assert_eq!(
            config.stream_data_path(),
            PathBuf::from("/notes/all-streams-data.toml")
        );
        assert!(config.template_path().is_none());
    }

    #[test]
    fn test_explicit_stream_data_path() {
        let config = Config::new("/notes").with_stream_data_path("/tmp/data.toml");
        assert_eq!(config.stream_data_path(), PathBuf::from("/tmp/data.toml"));
    }
}
