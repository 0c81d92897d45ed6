//! Common test utilities for integration tests

#![allow(dead_code)]

use foam_streams::{Config, FoamWorkspace};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A master document exercising every group and a two-level project tree
pub const MASTER: &str = "\
# all-streams

* Write design doc [[2024-01-10]] [[proj--infra--db]] #UPLOAD_TO_DASHBOARD
* Migrate cluster [[2024-01-02]] [[2024-02-01]] #proj--infra #UPLOAD_TO_DASHBOARD
* Retired idea [[2023-05-01]] [[proj--web]] #OBSOLETE_STREAM
* Quick fix [[2024-03-01]] #UPLOAD_TO_DASHBOARD
* Long haul [[2023-01-01]] [[2023-06-01]] #UPLOAD_TO_DASHBOARD
* Not a stream [[2024-01-01]] [[proj--zzz]]
";

/// Create a temporary Foam workspace holding `master` as all-streams.md
pub fn setup_workspace(master: &str) -> (TempDir, FoamWorkspace) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("all-streams.md"), master).unwrap();
    let workspace = FoamWorkspace::new(Config::new(temp_dir.path()));
    (temp_dir, workspace)
}

/// Read a page, `name` given without the `.md` extension
pub fn read_page(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(format!("{}.md", name))).unwrap()
}

/// Sorted `.md` file names in `dir`
pub fn markdown_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".md"))
        .collect();
    names.sort();
    names
}
