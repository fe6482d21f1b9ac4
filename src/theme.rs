//! Theme engine – a pure mapping from `(theme id, document)` to a visual
//! document tree.
//!
//! The three themes share the list parsers and section renderer; what
//! differs between them is data: section order, section titles, which
//! contact fields appear, and which entry fields each theme admits. No
//! state is retained between calls, so re-rendering on every keystroke is
//! cheap and two calls on equal documents produce equal trees.

use crate::lists::{parse_comma_list, parse_line_list};
use crate::model::{Document, PersonalInfo, ThemeId};
use crate::node::{ContactItem, Icon, Node, RegionKind, VisualDocument};
use crate::section::{
    education_block, experience_block, project_block, render_entry_section, render_section,
    ProjectFields,
};

/// Shown in place of an empty full name so the preview stays legible
/// before the form is filled in.
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Separator used by the Academic theme's inline language list.
const LANGUAGE_SEPARATOR: &str = " \u{2022} ";

/// Render `doc` with the theme named by `theme_id`. Identifiers outside the
/// fixed enumeration fall back to Corporate.
pub fn render(theme_id: &str, doc: &Document) -> VisualDocument {
    render_theme(ThemeId::from_str(theme_id), doc)
}

/// Render with the document's own selected theme.
pub fn render_selected(doc: &Document) -> VisualDocument {
    render_theme(doc.selected_theme, doc)
}

pub fn render_theme(theme: ThemeId, doc: &Document) -> VisualDocument {
    let children = match theme {
        ThemeId::Corporate => corporate(doc),
        ThemeId::Modern => modern(doc),
        ThemeId::Academic => academic(doc),
    };
    VisualDocument { theme, children }
}

// ---------------------------------------------------------------------------
// Theme compositions
// ---------------------------------------------------------------------------

fn corporate(doc: &Document) -> Vec<Node> {
    let mut header = Vec::new();
    push_photo(&mut header, &doc.personal.photo, 100.0);
    header.push(name_heading(&doc.personal));
    let contact = full_contact_items(&doc.personal);
    if !contact.is_empty() {
        header.push(Node::Contact {
            items: contact,
            icons: true,
        });
    }

    let mut out = vec![Node::Region {
        kind: RegionKind::Header,
        children: header,
    }];
    push_some(&mut out, text_section("Professional Summary", &doc.summary));
    push_some(
        &mut out,
        render_entry_section("Work Experience", &doc.experience, experience_block),
    );
    push_some(
        &mut out,
        render_entry_section("Education", &doc.education, |e| education_block(e, true)),
    );
    push_some(
        &mut out,
        render_entry_section("Projects", &doc.projects, |p| {
            project_block(p, ProjectFields::FULL)
        }),
    );
    push_some(&mut out, skills_section("Skills", &doc.skills));
    push_some(
        &mut out,
        line_list_section("Certifications", &doc.certifications),
    );
    push_some(&mut out, line_list_section("Languages", &doc.languages));
    push_some(&mut out, text_section("Hobbies & Interests", &doc.hobbies));
    out
}

fn modern(doc: &Document) -> Vec<Node> {
    let mut sidebar = Vec::new();
    push_photo(&mut sidebar, &doc.personal.photo, 120.0);
    let contact = short_contact_items(&doc.personal);
    if !contact.is_empty() {
        sidebar.push(Node::Section {
            title: "Contact".to_string(),
            children: vec![Node::Contact {
                items: contact,
                icons: true,
            }],
        });
    }
    push_some(&mut sidebar, skills_section("Skills", &doc.skills));
    push_some(&mut sidebar, line_list_section("Languages", &doc.languages));

    let mut main = vec![name_heading(&doc.personal)];
    push_some(&mut main, text_section("About Me", &doc.summary));
    push_some(
        &mut main,
        render_entry_section("Experience", &doc.experience, experience_block),
    );
    // Education entries drop their description text in this theme.
    push_some(
        &mut main,
        render_entry_section("Education", &doc.education, |e| education_block(e, false)),
    );
    push_some(
        &mut main,
        render_entry_section("Projects", &doc.projects, |p| {
            project_block(p, ProjectFields::NO_LINK)
        }),
    );
    push_some(
        &mut main,
        line_list_section("Certifications", &doc.certifications),
    );

    vec![
        Node::Region {
            kind: RegionKind::Sidebar,
            children: sidebar,
        },
        Node::Region {
            kind: RegionKind::Main,
            children: main,
        },
    ]
}

fn academic(doc: &Document) -> Vec<Node> {
    let mut header = vec![name_heading(&doc.personal)];
    let contact = short_contact_items(&doc.personal);
    if !contact.is_empty() {
        header.push(Node::Contact {
            items: contact,
            icons: false,
        });
    }

    let mut out = vec![Node::Region {
        kind: RegionKind::Header,
        children: header,
    }];
    push_some(&mut out, text_section("Objective", &doc.summary));
    // Education precedes Experience in this theme.
    push_some(
        &mut out,
        render_entry_section("Education", &doc.education, |e| education_block(e, true)),
    );
    push_some(
        &mut out,
        render_entry_section("Experience", &doc.experience, experience_block),
    );
    push_some(
        &mut out,
        render_entry_section("Research & Projects", &doc.projects, |p| {
            project_block(p, ProjectFields::MINIMAL)
        }),
    );
    push_some(
        &mut out,
        skills_section("Skills & Competencies", &doc.skills),
    );
    push_some(
        &mut out,
        line_list_section("Certifications", &doc.certifications),
    );
    // Languages join into one inline sentence rather than a bulleted list.
    let langs = parse_line_list(&doc.languages);
    if !langs.is_empty() {
        push_some(
            &mut out,
            render_section(
                "Languages",
                vec![Node::Paragraph(langs.join(LANGUAGE_SEPARATOR))],
            ),
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Shared builders
// ---------------------------------------------------------------------------

fn name_heading(personal: &PersonalInfo) -> Node {
    let text = if personal.full_name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        personal.full_name.clone()
    };
    Node::Heading { level: 1, text }
}

fn push_photo(out: &mut Vec<Node>, src: &str, size_pt: f32) {
    if !src.is_empty() {
        out.push(Node::Photo {
            src: src.to_string(),
            size_pt,
        });
    }
}

/// Header contact line: every non-empty contact field, each an icon+label
/// pair. The link-style fields show fixed labels rather than their URLs.
fn full_contact_items(p: &PersonalInfo) -> Vec<ContactItem> {
    let candidates: [(Icon, &str); 6] = [
        (Icon::Email, &p.email),
        (Icon::Phone, &p.phone),
        (Icon::Location, &p.location),
        (Icon::LinkedIn, if p.linkedin.is_empty() { "" } else { "LinkedIn" }),
        (Icon::Portfolio, if p.portfolio.is_empty() { "" } else { "Portfolio" }),
        (Icon::GitHub, if p.github.is_empty() { "" } else { "GitHub" }),
    ];
    candidates
        .into_iter()
        .filter(|(_, label)| !label.is_empty())
        .map(|(icon, label)| ContactItem {
            icon,
            label: label.to_string(),
        })
        .collect()
}

/// Email / phone / location only (Modern sidebar, Academic header).
fn short_contact_items(p: &PersonalInfo) -> Vec<ContactItem> {
    let candidates: [(Icon, &str); 3] = [
        (Icon::Email, &p.email),
        (Icon::Phone, &p.phone),
        (Icon::Location, &p.location),
    ];
    candidates
        .into_iter()
        .filter(|(_, label)| !label.is_empty())
        .map(|(icon, label)| ContactItem {
            icon,
            label: label.to_string(),
        })
        .collect()
}

fn text_section(title: &str, text: &str) -> Option<Node> {
    if text.is_empty() {
        None
    } else {
        render_section(title, vec![Node::Paragraph(text.to_string())])
    }
}

fn skills_section(title: &str, skills: &str) -> Option<Node> {
    let chips = parse_comma_list(skills);
    if chips.is_empty() {
        None
    } else {
        render_section(title, vec![Node::ChipSet(chips)])
    }
}

fn line_list_section(title: &str, text: &str) -> Option<Node> {
    let items = parse_line_list(text);
    if items.is_empty() {
        None
    } else {
        render_section(title, vec![Node::BulletList(items)])
    }
}

fn push_some(out: &mut Vec<Node>, node: Option<Node>) {
    if let Some(node) = node {
        out.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, ProjectEntry};

    #[test]
    fn empty_document_renders_no_sections() {
        let doc = Document::default();
        for theme in ThemeId::all() {
            let rendered = render_theme(theme, &doc);
            assert!(
                rendered.section_titles().is_empty(),
                "{theme}: expected no sections"
            );
            assert_eq!(rendered.name_heading(), Some(NAME_PLACEHOLDER));
        }
    }

    #[test]
    fn unknown_theme_matches_corporate() {
        let mut doc = Document::default();
        doc.summary = "Systems engineer.".to_string();
        let fallback = render("nonexistent-theme", &doc);
        let corporate = render("corporate", &doc);
        assert_eq!(fallback, corporate);
    }

    #[test]
    fn corporate_section_order() {
        let doc = crate::samples::sample_document();
        let rendered = render_theme(ThemeId::Corporate, &doc);
        assert_eq!(
            rendered.section_titles(),
            vec![
                "Professional Summary",
                "Work Experience",
                "Education",
                "Projects",
                "Skills",
                "Certifications",
                "Languages",
                "Hobbies & Interests",
            ]
        );
    }

    #[test]
    fn academic_education_precedes_experience() {
        let doc = crate::samples::sample_document();
        let rendered = render_theme(ThemeId::Academic, &doc);
        let titles = rendered.section_titles();
        let edu = titles.iter().position(|t| *t == "Education").unwrap();
        let exp = titles.iter().position(|t| *t == "Experience").unwrap();
        assert!(edu < exp);
        assert!(titles.contains(&"Research & Projects"));
    }

    #[test]
    fn academic_languages_render_inline() {
        let mut doc = Document::default();
        doc.languages = "English\nSpanish".to_string();
        let rendered = render_theme(ThemeId::Academic, &doc);
        let mut paragraph = None;
        let mut saw_bullets = false;
        rendered.walk(&mut |node| match node {
            Node::Paragraph(text) => paragraph = Some(text.clone()),
            Node::BulletList(_) => saw_bullets = true,
            _ => {}
        });
        assert_eq!(paragraph.as_deref(), Some("English \u{2022} Spanish"));
        assert!(!saw_bullets);
    }

    #[test]
    fn modern_education_has_no_description() {
        let mut doc = crate::samples::sample_document();
        doc.education[0].description = "Graduated with honors".to_string();
        let rendered = render_theme(ThemeId::Modern, &doc);
        rendered.walk(&mut |node| {
            if let Node::Entry(block) = node {
                if block.heading == doc.education[0].degree {
                    assert!(block.description.is_none());
                }
            }
        });
    }

    #[test]
    fn entry_order_survives_removal() {
        let mut doc = Document::default();
        for t in ["A", "B", "C"] {
            doc.experience.push(ExperienceEntry {
                title: t.to_string(),
                ..ExperienceEntry::default()
            });
        }
        doc.experience.remove(1);
        let rendered = render_theme(ThemeId::Corporate, &doc);
        let mut headings = Vec::new();
        rendered.walk(&mut |node| {
            if let Node::Entry(block) = node {
                headings.push(block.heading.clone());
            }
        });
        assert_eq!(headings, vec!["A", "C"]);
    }

    #[test]
    fn academic_project_shows_name_and_description_only() {
        let mut doc = Document::default();
        doc.projects.push(ProjectEntry {
            name: "Tracker".to_string(),
            technologies: String::new(),
            link: String::new(),
            description: "A tool".to_string(),
        });
        let rendered = render_theme(ThemeId::Academic, &doc);
        let mut checked = false;
        rendered.walk(&mut |node| {
            if let Node::Entry(block) = node {
                assert_eq!(block.heading, "Tracker");
                assert_eq!(block.description.as_deref(), Some("A tool"));
                assert!(block.subheading.is_none());
                assert!(block.link.is_none());
                checked = true;
            }
        });
        assert!(checked);
    }
}
