//! Visual document tree – the framework-independent output of the theme
//! engine, consumed by the HTML writer, the layout engine, and exporters.
//!
//! The tree carries content and structure only; colors, fonts, and spacing
//! are assigned later by the per-theme stylesheet ([`crate::style`]).

use serde::{Deserialize, Serialize};

use crate::model::ThemeId;

/// A complete rendered résumé, ready for presentation or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualDocument {
    pub theme: ThemeId,
    pub children: Vec<Node>,
}

/// A typed node in the visual document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Name heading (level 1) or other standalone heading text.
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Bulleted list, one bullet per item.
    BulletList(Vec<String>),
    /// Tag-like chips (skills), in parse order, duplicates preserved.
    ChipSet(Vec<String>),
    /// Profile photo. `src` is an opaque embeddable image reference;
    /// `size_pt` is the square edge length chosen by the theme.
    Photo { src: String, size_pt: f32 },
    /// Contact line; `icons` selects whether the presentation layer shows
    /// the icon glyph next to each label.
    Contact { items: Vec<ContactItem>, icons: bool },
    /// One education / experience / project block.
    Entry(EntryBlock),
    /// A titled, optionally-omitted group of blocks.
    Section { title: String, children: Vec<Node> },
    /// A top-level layout region (Corporate/Academic header, Modern
    /// sidebar + main).
    Region { kind: RegionKind, children: Vec<Node> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Header,
    Sidebar,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Email,
    Phone,
    Location,
    LinkedIn,
    Portfolio,
    GitHub,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactItem {
    pub icon: Icon,
    pub label: String,
}

/// One rendered entry. Optional parts are omitted entirely when absent –
/// there is no empty-paragraph placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBlock {
    /// Job title / degree / project name.
    pub heading: String,
    /// Company / institution / technologies, when non-empty.
    pub subheading: Option<String>,
    /// `"<start> - <end>"` verbatim; `" - "` when both halves are blank.
    /// Project blocks carry no date range at all.
    pub dates: Option<String>,
    pub description: Option<String>,
    /// "View Project" target, project blocks only.
    pub link: Option<String>,
}

impl VisualDocument {
    /// Depth-first walk over every node in the tree.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        fn visit<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a Node)) {
            for node in nodes {
                f(node);
                match node {
                    Node::Section { children, .. } | Node::Region { children, .. } => {
                        visit(children, f)
                    }
                    _ => {}
                }
            }
        }
        visit(&self.children, f);
    }

    /// Titles of every section in the tree, in document order.
    pub fn section_titles(&self) -> Vec<&str> {
        let mut titles = Vec::new();
        self.walk(&mut |node| {
            if let Node::Section { title, .. } = node {
                titles.push(title.as_str());
            }
        });
        titles
    }

    /// The first level-1 heading, i.e. the rendered name.
    pub fn name_heading(&self) -> Option<&str> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() {
                if let Node::Heading { level: 1, text } = node {
                    found = Some(text.as_str());
                }
            }
        });
        found
    }
}
