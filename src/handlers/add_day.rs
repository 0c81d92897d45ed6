//! Add-day handler: today's daily note and meetings note

use crate::FoamWorkspace;
use crate::daily::{self, DayOutcome};
use crate::error::DailyNoteError;
use crate::storage::write_atomic;
use anyhow::Result;
use tracing::info;

impl FoamWorkspace {
    /// Creates `<today>.md` and `meetings-<today>.md`, or does nothing when today's note exists.
    pub fn handle_add_day(&self, today: &str) -> Result<DayOutcome> {
        let template_path = self
            .config
            .template_path()
            .ok_or(DailyNoteError::MissingTemplate)?;

        let Some(plan) = daily::plan_day(&self.config.base_path, template_path, today)? else {
            info!(today, "daily note already exists");
            return Ok(DayOutcome::AlreadyExists {
                today: today.to_string(),
            });
        };
        info!(today, previous = %plan.previous, carried = plan.carried.len(), "creating daily note");

        let mut written = Vec::with_capacity(2);

        // An existing meetings note may already hold today's minutes.
        let meetings_path = self.config.page_path(&daily::meetings_note_file(today));
        if !meetings_path.exists() {
            write_atomic(&meetings_path, &plan.meetings)?;
            written.push(meetings_path);
        }

        let note_path = self.config.page_path(&daily::daily_note_file(today));
        write_atomic(&note_path, &plan.note)?;
        written.push(note_path);

        self.sync_written(&written, &format!("Add daily note {}", today))?;

        Ok(DayOutcome::Created {
            today: plan.today,
            previous: plan.previous,
            carried: plan.carried,
        })
    }
}
