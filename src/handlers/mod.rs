//! Command handlers for the Foam workspace
//!
//! Each command is an `impl FoamWorkspace` block in its own file.

pub mod add_day;
pub mod extract;
pub mod render;
