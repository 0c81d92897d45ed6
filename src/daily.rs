//! Daily note initialization
//!
//! Today's note is built from a template plus the lines of the most recent
//! earlier note that carry a carry-forward marker.

use crate::error::DailyNoteError;
use crate::streams::strip_tag;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;

/// Carry the line to the next note only; the marker is removed on the copy
pub const SEND_TO_NEXT_DAY: &str = "SEND_TO_NEXT_DAY";
/// Carry the line to every future note; the marker is kept
pub const SEND_TO_ALL_NEXT_DAYS: &str = "SEND_TO_ALL_NEXT_DAYS";
/// Never carry the line, whatever other markers it has
pub const DO_NOT_SEND: &str = "DO_NOT_SEND";

pub const TODAY_PLACEHOLDER: &str = "{TODAY}";
pub const LAST_DAY_PLACEHOLDER: &str = "{LAST_DAY}";

static DAILY_NOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})\.md$").expect("valid daily note regex"));
// Tag forms plus the bare word, which is how the marker is usually written.
static SEND_TO_NEXT_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#?\[\[\s*SEND_TO_NEXT_DAY\s*\]\]|#?SEND_TO_NEXT_DAY")
        .expect("valid carry marker regex")
});

/// File name of the daily note for `day`
pub fn daily_note_file(day: &str) -> String {
    format!("{day}.md")
}

/// File name of the meetings note for `day`
pub fn meetings_note_file(day: &str) -> String {
    format!("meetings-{day}.md")
}

/// Most recent `dddd-dd-dd.md` note in `base` dated on or before `today`
///
/// Comparison is lexicographic on the date stem.
pub fn find_latest_note(base: &Path, today: &str) -> Result<Option<String>> {
    let entries = fs::read_dir(base)
        .with_context(|| format!("Failed to list notes in {}", base.display()))?;

    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list notes in {}", base.display()))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = DAILY_NOTE_RE.captures(file_name) else {
            continue;
        };
        let day = &caps[1];
        if day > today {
            continue;
        }
        if latest.as_deref().is_none_or(|current| day > current) {
            latest = Some(day.to_string());
        }
    }

    Ok(latest)
}

/// Lines of `previous` that move into the next note, already rewritten
pub fn carry_forward_lines(previous: &str) -> Vec<String> {
    previous
        .lines()
        .filter(|line| !line.contains(DO_NOT_SEND))
        .filter(|line| line.contains(SEND_TO_ALL_NEXT_DAYS) || line.contains(SEND_TO_NEXT_DAY))
        // The indefinite marker stays, so the line keeps travelling.
        .map(|line| strip_tag(line, &SEND_TO_NEXT_DAY_RE).trim_end().to_string())
        .collect()
}

/// Fill the template placeholders and append the carried lines
pub fn render_daily_note(template: &str, today: &str, last_day: &str, carried: &[String]) -> String {
    let mut contents = template
        .replace(TODAY_PLACEHOLDER, today)
        .replace(LAST_DAY_PLACEHOLDER, last_day);

    if !carried.is_empty() && !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    for line in carried {
        contents.push_str(line);
        contents.push('\n');
    }

    contents
}

/// Companion meetings note with a backlink to the previous day's one
pub fn render_meetings_note(today: &str, last_day: &str) -> String {
    format!("# meetings-{today}\n\nprevious: [[meetings-{last_day}]]\n\nbacklinks\n\n")
}

/// Result of a daily note run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// Today's note was already there; nothing was written
    AlreadyExists { today: String },
    Created {
        today: String,
        previous: String,
        carried: Vec<String>,
    },
}

impl fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayOutcome::AlreadyExists { today } => {
                write!(f, "File for {} already exists, nothing to do.", today)
            }
            DayOutcome::Created {
                today,
                previous,
                carried,
            } => {
                write!(
                    f,
                    "Created {} (previous: {}), carried {} line(s)",
                    today,
                    previous,
                    carried.len()
                )?;
                for line in carried {
                    write!(f, "\n  {}", line.trim())?;
                }
                Ok(())
            }
        }
    }
}

/// Everything `add-day` would write, computed before touching the disk
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub today: String,
    pub previous: String,
    pub carried: Vec<String>,
    pub note: String,
    pub meetings: String,
}

/// Prepare today's notes, or `None` when today's note already exists
pub fn plan_day(base: &Path, template_path: &Path, today: &str) -> Result<Option<DayPlan>> {
    if base.join(daily_note_file(today)).exists() {
        return Ok(None);
    }

    let previous = find_latest_note(base, today)?.ok_or_else(|| DailyNoteError::NoPreviousNote {
        today: today.to_string(),
        base: base.to_path_buf(),
    })?;

    let previous_path = base.join(daily_note_file(&previous));
    let previous_content = fs::read_to_string(&previous_path)
        .with_context(|| format!("Failed to read {}", previous_path.display()))?;
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template {}", template_path.display()))?;

    let carried = carry_forward_lines(&previous_content);
    Ok(Some(DayPlan {
        today: today.to_string(),
        note: render_daily_note(&template, today, &previous, &carried),
        meetings: render_meetings_note(today, &previous),
        previous,
        carried,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_forward_markers() {
        let previous = "\
# 2024-01-05
* call bob SEND_TO_NEXT_DAY
* standup #SEND_TO_ALL_NEXT_DAYS
* old SEND_TO_NEXT_DAY DO_NOT_SEND
* plain line
";
        let carried = carry_forward_lines(previous);
        assert_eq!(carried, vec!["* call bob", "* standup #SEND_TO_ALL_NEXT_DAYS"]);
    }

    #[test]
    fn test_both_carry_markers_keep_only_indefinite() {
        let previous = "\
* x SEND_TO_NEXT_DAY #SEND_TO_ALL_NEXT_DAYS
  * y #SEND_TO_ALL_NEXT_DAYS [[SEND_TO_NEXT_DAY]] later
";
        let carried = carry_forward_lines(previous);
        assert_eq!(
            carried,
            vec![
                "* x #SEND_TO_ALL_NEXT_DAYS",
                "  * y #SEND_TO_ALL_NEXT_DAYS later"
            ]
        );
    }

    #[test]
    fn test_render_daily_note_placeholders() {
        let note = render_daily_note(
            "# {TODAY}\n\nprevious: [[{LAST_DAY}]]",
            "2024-01-06",
            "2024-01-05",
            &["* carried".to_string()],
        );
        assert_eq!(note, "# 2024-01-06\n\nprevious: [[2024-01-05]]\n* carried\n");
    }
}
