//! Render handler: stream data file -> generated pages

use crate::FoamWorkspace;
use crate::pages::{self, is_project_page_file};
use crate::storage::write_atomic;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

impl FoamWorkspace {
    /// Renders every generated page and removes project pages of vanished projects.
    pub fn handle_render(&self, today: &str) -> Result<String> {
        let data = self.storage.load()?;
        let rendered = pages::render_all(&data, today);

        let current: HashSet<String> = rendered.iter().map(|p| p.file_name()).collect();
        let stale = self.stale_project_pages(&current)?;

        let mut written: Vec<PathBuf> = Vec::with_capacity(rendered.len() + stale.len());
        for page in &rendered {
            let path = self.config.page_path(&page.file_name());
            write_atomic(&path, &page.contents)?;
            written.push(path);
        }
        for path in &stale {
            debug!(path = %path.display(), "removing stale project page");
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            written.push(path.clone());
        }

        info!(
            pages = rendered.len(),
            removed = stale.len(),
            "rendered generated pages"
        );
        self.sync_written(&written, "Render work stream pages")?;

        Ok(format!(
            "Rendered {} page(s) in {}, removed {} stale project page(s)",
            rendered.len(),
            self.config.base_path.display(),
            stale.len()
        ))
    }

    /// Generated per-project pages on disk that this render no longer produces
    fn stale_project_pages(&self, current: &HashSet<String>) -> Result<Vec<PathBuf>> {
        let base = &self.config.base_path;
        let entries = fs::read_dir(base)
            .with_context(|| format!("Failed to list {}", base.display()))?;

        let mut stale = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to list {}", base.display()))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if is_project_page_file(file_name) && !current.contains(file_name) {
                stale.push(entry.path());
            }
        }
        stale.sort();
        Ok(stale)
    }
}
