//! Extract handler: master document -> stream data file

use crate::FoamWorkspace;
use crate::streams::StreamData;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

impl FoamWorkspace {
    /// Scans `all-streams.md` and replaces the stream data file.
    ///
    /// A malformed or undated stream line aborts before anything is written.
    pub fn handle_extract(&self) -> Result<String> {
        let master = self.config.master_document();
        let content = fs::read_to_string(&master)
            .with_context(|| format!("Failed to read master document {}", master.display()))?;

        let data = StreamData::from_master(&content)
            .with_context(|| format!("Failed to extract streams from {}", master.display()))?;
        info!(
            streams = data.streams.len(),
            projects = data.projects.len(),
            "extracted streams"
        );

        self.storage.save(&data)?;
        self.sync_written(
            &[self.storage.file_path().to_path_buf()],
            "Extract work streams",
        )?;

        Ok(format!(
            "Extracted {} stream(s) ({} active, {} obsolete) in {} project(s) to {}",
            data.streams.len(),
            data.active_count(),
            data.obsolete_count(),
            data.projects.len(),
            self.storage.file_path().display()
        ))
    }

    /// Runs extract then render from one master document.
    pub fn handle_update(&self, today: &str) -> Result<String> {
        let extracted = self.handle_extract()?;
        let rendered = self.handle_render(today)?;
        Ok(format!("{}\n{}", extracted, rendered))
    }
}
