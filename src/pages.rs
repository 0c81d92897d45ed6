//! Generated page rendering
//!
//! Every function here is a pure string builder: the same input always
//! renders byte-identical pages. Writing them out is the caller's job.

use crate::streams::{PROJECT_ROOT, ProjectHierarchy, Stream, StreamData, Tag, build_hierarchy};

pub const MASTER_PAGE: &str = "all-streams";
pub const ALL_STREAMS_PAGE: &str = "all-streams-generated";
pub const PROJECT_INDEX_PAGE: &str = "all-stream-projects-generated";
pub const QUICK_LINKS_PAGE: &str = "000-quick-links";

const STREAM_WARNING: &str =
    "**THIS FILE IS AUTO GENERATED - DO NOT EDIT** - Edit streams in [[all-streams]] instead.\n\n";
const WARNING: &str = "**THIS FILE IS AUTO GENERATED - DO NOT EDIT**\n";

/// A rendered page: file name without the `.md` extension, and its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub contents: String,
}

impl Page {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.name)
    }
}

/// Page name for a project's stream list
///
/// The third dash before `generated` keeps the hierarchy sorted in the filesystem.
pub fn project_page_name(project: &Tag) -> String {
    format!("all-streams--{project}---generated")
}

/// Whether `file_name` looks like a generated per-project page
pub fn is_project_page_file(file_name: &str) -> bool {
    file_name
        .strip_prefix("all-streams--proj--")
        .is_some_and(|rest| rest.ends_with("---generated.md"))
}

/// Streams split by how they are listed
#[derive(Debug, Default)]
pub struct StreamGroups<'a> {
    /// Exactly one date, newest first
    pub single_date: Vec<&'a Stream>,
    /// Several dates, oldest last date first
    pub multiple_dates: Vec<&'a Stream>,
    /// Obsolete regardless of date count, newest first
    pub obsolete: Vec<&'a Stream>,
}

impl<'a> StreamGroups<'a> {
    pub fn partition<I>(streams: I) -> Self
    where
        I: IntoIterator<Item = &'a Stream>,
    {
        let mut groups = Self::default();
        for stream in streams {
            if stream.obsolete {
                groups.obsolete.push(stream);
            } else if stream.dates.len() == 1 {
                groups.single_date.push(stream);
            } else if stream.dates.len() > 1 {
                groups.multiple_dates.push(stream);
            }
        }

        // Stable sorts: equal dates keep master-document order.
        groups
            .multiple_dates
            .sort_by(|a, b| a.last_date.cmp(&b.last_date));
        groups
            .single_date
            .sort_by(|a, b| b.last_date.cmp(&a.last_date));
        groups.obsolete.sort_by(|a, b| b.last_date.cmp(&a.last_date));
        groups
    }
}

fn push_stream_section(out: &mut String, heading: &str, streams: &[&Stream]) {
    if streams.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push_str("\n\n");
    for stream in streams {
        out.push_str(&format!("* {}: {}\n", stream.last_date, stream.text));
    }
    out.push('\n');
    out.push_str(STREAM_WARNING);
}

/// Render a stream list page
///
/// # Arguments
/// * `name` - Page name, used as the title
/// * `streams` - Streams to list
/// * `related_pages` - Wiki pages linked from a "Related pages" section (may be empty)
pub fn render_stream_page<'a, I>(name: &str, streams: I, related_pages: &[&str]) -> String
where
    I: IntoIterator<Item = &'a Stream>,
{
    let groups = StreamGroups::partition(streams);

    let mut out = format!("# {name}\n\n{STREAM_WARNING}");

    if !related_pages.is_empty() {
        out.push_str("Related pages:\n\n");
        for page in related_pages {
            out.push_str(&format!("* {page}: [[{page}]]\n"));
        }
        out.push('\n');
        out.push_str(STREAM_WARNING);
    }

    push_stream_section(&mut out, "Streams with double dates:", &groups.multiple_dates);
    push_stream_section(&mut out, "Streams with single dates:", &groups.single_date);
    push_stream_section(&mut out, "Obsolete streams:", &groups.obsolete);

    out
}

/// Render the project containment index
pub fn render_project_index(hierarchy: &ProjectHierarchy) -> String {
    let mut out = format!("# {PROJECT_INDEX_PAGE}\n\n{WARNING}\n");

    for (parent, children) in hierarchy {
        out.push_str(&format!("## Subelements of {parent}\n\n"));
        if parent.as_str() != PROJECT_ROOT {
            out.push_str(&format!(
                "Subelements of [[{}]]:\n\n",
                project_page_name(parent)
            ));
        }
        for child in children {
            out.push_str(&format!("* {child}: [[{}]]\n", project_page_name(child)));
        }
        out.push_str(&format!("\n{WARNING}\n"));
    }

    out
}

/// Render the quick links page for `today` (`YYYY-MM-DD`)
pub fn render_quick_links(today: &str) -> String {
    let mut out = format!("# {QUICK_LINKS_PAGE}\n\n{WARNING}\n");
    out.push_str(&format!("* today: [[{today}]]\n"));
    out.push_str(&format!("* today meetings: [[meetings-{today}]]\n"));
    out.push_str("* future meetings: [[future-meetings]]\n");
    out.push_str(&format!("* all-streams (editable): [[{MASTER_PAGE}]]\n"));
    out.push_str(&format!("* {ALL_STREAMS_PAGE}: [[{ALL_STREAMS_PAGE}]]\n"));
    out.push_str(&format!("* {PROJECT_INDEX_PAGE}: [[{PROJECT_INDEX_PAGE}]]\n"));
    out.push_str("* startup page: [[000-startup]]\n");
    out.push_str(&format!("\n{WARNING}"));
    out
}

/// Render every generated page for `data`
///
/// Order: the full stream list, one page per project, the project index,
/// then quick links.
pub fn render_all(data: &StreamData, today: &str) -> Vec<Page> {
    let mut pages = Vec::with_capacity(data.projects.len() + 3);

    pages.push(Page {
        name: ALL_STREAMS_PAGE.to_string(),
        contents: render_stream_page(ALL_STREAMS_PAGE, &data.streams, &[]),
    });

    for project in &data.projects {
        let name = project_page_name(project);
        let contents =
            render_stream_page(&name, data.streams_for_project(project), &[project.as_str()]);
        pages.push(Page { name, contents });
    }

    pages.push(Page {
        name: PROJECT_INDEX_PAGE.to_string(),
        contents: render_project_index(&build_hierarchy(&data.projects)),
    });

    pages.push(Page {
        name: QUICK_LINKS_PAGE.to_string(),
        contents: render_quick_links(today),
    });

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_page_file_pattern() {
        assert!(is_project_page_file("all-streams--proj--a--b---generated.md"));
        assert!(!is_project_page_file("all-streams-generated.md"));
        assert!(!is_project_page_file("all-stream-projects-generated.md"));
    }

    #[test]
    fn test_empty_groups_are_omitted() {
        let page = render_stream_page("empty", std::iter::empty(), &[]);
        assert_eq!(page, format!("# empty\n\n{STREAM_WARNING}"));
    }
}
