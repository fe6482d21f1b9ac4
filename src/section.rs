//! Section renderer – turns repeated-section entries into [`EntryBlock`]s
//! and wraps collections of blocks into optional titled sections.

use crate::model::{EducationEntry, ExperienceEntry, ProjectEntry};
use crate::node::{EntryBlock, Node};

/// Which optional project fields a theme renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectFields {
    pub technologies: bool,
    pub link: bool,
}

impl ProjectFields {
    pub const FULL: Self = Self {
        technologies: true,
        link: true,
    };
    pub const NO_LINK: Self = Self {
        technologies: true,
        link: false,
    };
    /// Name and description only.
    pub const MINIMAL: Self = Self {
        technologies: false,
        link: false,
    };
}

/// A titled section wrapping `blocks` in original order, or `None` when
/// there are no blocks – an empty section is omitted entirely, never
/// rendered as a placeholder.
pub fn render_section(title: &str, blocks: Vec<Node>) -> Option<Node> {
    if blocks.is_empty() {
        None
    } else {
        Some(Node::Section {
            title: title.to_string(),
            children: blocks,
        })
    }
}

/// Convenience for the repeated sections: map entries through `block_fn`
/// and wrap the result, omitting the section when `entries` is empty.
pub fn render_entry_section<T>(
    title: &str,
    entries: &[T],
    block_fn: impl Fn(&T) -> Node,
) -> Option<Node> {
    render_section(title, entries.iter().map(block_fn).collect())
}

pub fn experience_block(entry: &ExperienceEntry) -> Node {
    Node::Entry(EntryBlock {
        heading: entry.title.clone(),
        subheading: non_empty(&entry.company),
        dates: Some(date_range(&entry.start_date, &entry.end_date)),
        description: non_empty(&entry.description),
        link: None,
    })
}

pub fn education_block(entry: &EducationEntry, include_description: bool) -> Node {
    Node::Entry(EntryBlock {
        heading: entry.degree.clone(),
        subheading: non_empty(&entry.institution),
        dates: Some(date_range(&entry.start_date, &entry.end_date)),
        description: if include_description {
            non_empty(&entry.description)
        } else {
            None
        },
        link: None,
    })
}

pub fn project_block(entry: &ProjectEntry, fields: ProjectFields) -> Node {
    Node::Entry(EntryBlock {
        heading: entry.name.clone(),
        subheading: if fields.technologies {
            non_empty(&entry.technologies)
        } else {
            None
        },
        dates: None,
        description: non_empty(&entry.description),
        link: if fields.link {
            non_empty(&entry.link)
        } else {
            None
        },
    })
}

/// Date ranges are opaque text rendered verbatim – no parsing, no
/// reformatting, and no suppression when both halves are blank.
fn date_range(start: &str, end: &str) -> String {
    format!("{} - {}", start, end)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
