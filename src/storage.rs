use crate::streams::StreamData;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// TOML-backed stream data file shared by the extractor and the renderer
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load stream data; a missing file is an error (run `extract` first)
    pub fn load(&self) -> Result<StreamData> {
        let content = fs::read_to_string(&self.file_path).with_context(|| {
            format!(
                "Failed to read stream data file {}",
                self.file_path.display()
            )
        })?;
        let data: StreamData = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse stream data file {}",
                self.file_path.display()
            )
        })?;
        Ok(data)
    }

    pub fn save(&self, data: &StreamData) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize stream data")?;
        write_atomic(&self.file_path, &content)
    }
}

/// Replace `path` with `contents` through a temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
