//! HTML writer – converts a visual document tree into a self-contained
//! markup string for the live preview.
//!
//! The class vocabulary (`resume`, `resume-section`, `resume-item`, …) is
//! what the preview stylesheet targets; the writer emits structure and
//! escaped text only. Apart from the embedded photo reference and
//! user-supplied link URLs the output carries no external references.

use crate::node::{ContactItem, EntryBlock, Icon, Node, RegionKind, VisualDocument};

/// Render the tree to an HTML fragment rooted at `<div class="resume THEME">`.
pub fn write_html(doc: &VisualDocument) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"resume {}\">",
        doc.theme.as_str()
    ));
    write_nodes(&mut out, &doc.children);
    out.push_str("</div>");
    out
}

fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Heading { level: 1, text } => {
            out.push_str(&format!("<h1 class=\"resume-name\">{}</h1>", escape(text)));
        }
        Node::Heading { text, .. } => {
            out.push_str(&format!("<h2>{}</h2>", escape(text)));
        }
        Node::Paragraph(text) => {
            out.push_str(&format!("<p>{}</p>", escape(text)));
        }
        Node::BulletList(items) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape(item)));
            }
            out.push_str("</ul>");
        }
        Node::ChipSet(items) => {
            out.push_str("<div class=\"resume-skills\">");
            for item in items {
                out.push_str(&format!(
                    "<span class=\"resume-skill\">{}</span>",
                    escape(item)
                ));
            }
            out.push_str("</div>");
        }
        Node::Photo { src, size_pt } => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"Profile Photo\" style=\"width: {size}px; \
                 height: {size}px; border-radius: 50%; object-fit: cover;\">",
                escape(src),
                size = size_pt,
            ));
        }
        Node::Contact { items, icons } => {
            out.push_str("<div class=\"resume-contact\">");
            for item in items {
                write_contact_item(out, item, *icons);
            }
            out.push_str("</div>");
        }
        Node::Entry(block) => write_entry(out, block),
        Node::Section { title, children } => {
            out.push_str("<div class=\"resume-section\">");
            out.push_str(&format!(
                "<h2 class=\"resume-section-title\">{}</h2>",
                escape(title)
            ));
            write_nodes(out, children);
            out.push_str("</div>");
        }
        Node::Region { kind, children } => {
            let class = match kind {
                RegionKind::Header => "resume-header",
                RegionKind::Sidebar => "resume-sidebar",
                RegionKind::Main => "resume-main",
            };
            out.push_str(&format!("<div class=\"{class}\">"));
            write_nodes(out, children);
            out.push_str("</div>");
        }
    }
}

fn write_contact_item(out: &mut String, item: &ContactItem, icons: bool) {
    out.push_str("<span class=\"resume-contact-item\">");
    if icons {
        out.push_str(&format!("<i class=\"{}\"></i> ", icon_class(item.icon)));
    }
    out.push_str(&escape(&item.label));
    out.push_str("</span>");
}

fn icon_class(icon: Icon) -> &'static str {
    match icon {
        Icon::Email => "fas fa-envelope",
        Icon::Phone => "fas fa-phone",
        Icon::Location => "fas fa-map-marker-alt",
        Icon::LinkedIn => "fab fa-linkedin",
        Icon::Portfolio => "fas fa-globe",
        Icon::GitHub => "fab fa-github",
    }
}

fn write_entry(out: &mut String, block: &EntryBlock) {
    out.push_str("<div class=\"resume-item\">");

    let title_and_subtitle = |out: &mut String| {
        out.push_str(&format!(
            "<div class=\"resume-item-title\">{}</div>",
            escape(&block.heading)
        ));
        if let Some(sub) = &block.subheading {
            out.push_str(&format!(
                "<div class=\"resume-item-subtitle\">{}</div>",
                escape(sub)
            ));
        }
    };

    match &block.dates {
        // Dated entries put the title column and the date range on one row.
        Some(dates) => {
            out.push_str("<div class=\"resume-item-header\"><div>");
            title_and_subtitle(out);
            out.push_str(&format!(
                "</div><div class=\"resume-item-date\">{}</div></div>",
                escape(dates)
            ));
        }
        None => title_and_subtitle(out),
    }

    if let Some(description) = &block.description {
        out.push_str(&format!(
            "<div class=\"resume-item-description\">{}</div>",
            escape(description)
        ));
    }
    if let Some(link) = &block.link {
        out.push_str(&format!(
            "<div class=\"resume-item-link\"><a href=\"{}\">View Project</a></div>",
            escape(link)
        ));
    }
    out.push_str("</div>");
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
