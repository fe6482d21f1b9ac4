//! Pagination – splits the positioned box stream into A4 pages.
//!
//! Handles:
//! - page boundaries, moving boxes that no longer fit to a fresh page
//! - expansion of oversized single-column containers so sections can split
//! - keep-together boxes (entry blocks never split mid-block)

use crate::fonts::FontLibrary;
use crate::layout::{BoxContent, PositionedBox};
use crate::layout_config::*;
use crate::style::{self, TextAlign};

/// Default page margins in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

/// Recursively expand pure-container columns taller than a single page so
/// their children can paginate individually. Row containers are never
/// expanded – stacking their columns would reorder content.
//
// TODO: split an over-tall sidebar/main row by slicing each column's
// children at the page boundary; such rows currently overflow the page.
fn flatten_for_pagination<'a>(
    boxes: &'a [PositionedBox],
    content_height: f32,
) -> Vec<&'a PositionedBox> {
    let mut result = Vec::new();
    for pbox in boxes {
        let is_row = pbox.style.display == style::Display::Flex
            && pbox.style.flex_direction == style::FlexDirection::Row;
        let expandable = pbox.height > content_height
            && matches!(pbox.content, BoxContent::None)
            && !pbox.children.is_empty()
            && !pbox.style.break_inside_avoid
            && !is_row;
        if expandable {
            result.extend(flatten_for_pagination(&pbox.children, content_height));
        } else {
            result.push(pbox);
        }
    }
    result
}

/// Convert positioned boxes into a paginated [`DocumentLayout`].
pub fn paginate(
    boxes: &[PositionedBox],
    page_width: f32,
    page_height: f32,
    page_margin: f32,
    fonts: &FontLibrary,
) -> DocumentLayout {
    let mut layout = DocumentLayout {
        title: "resume".to_string(),
        theme: String::new(),
        page_width_pt: page_width,
        page_height_pt: page_height,
        pages: Vec::new(),
    };

    let content_height = page_height - 2.0 * page_margin;
    let flat = flatten_for_pagination(boxes, content_height);

    let mut current_page = PageLayout {
        page_index: 0,
        boxes: Vec::new(),
    };

    // Document-space y at which the current page begins. PositionedBox.y
    // values are absolute document coordinates, so `pbox.y -
    // page_start_doc_y` is the y-on-page for any box.
    let mut page_start_doc_y = 0.0f32;

    for pbox in &flat {
        let y_on_page = (pbox.y - page_start_doc_y).max(0.0);
        if y_on_page + pbox.height > content_height && !current_page.boxes.is_empty() {
            layout.pages.push(current_page);
            current_page = PageLayout {
                page_index: layout.pages.len(),
                boxes: Vec::new(),
            };
            page_start_doc_y = pbox.y;
        }

        let y_on_page = (pbox.y - page_start_doc_y).max(0.0);
        let abs_y = page_margin + y_on_page;
        current_page
            .boxes
            .push(build_layout_box(pbox, pbox.x, abs_y, fonts));
    }

    if !current_page.boxes.is_empty() {
        layout.pages.push(current_page);
    }
    if layout.pages.is_empty() {
        layout.pages.push(PageLayout {
            page_index: 0,
            boxes: Vec::new(),
        });
    }
    layout
}

/// Recursively build a [`LayoutBox`] tree with page-absolute coordinates.
///
/// Each child's `PositionedBox.y` is a document-space absolute, so
/// `child.y − pbox.y` gives the child's offset within its parent.
fn build_layout_box(
    pbox: &PositionedBox,
    abs_x: f32,
    abs_y: f32,
    fonts: &FontLibrary,
) -> LayoutBox {
    let mut lb = LayoutBox::new(abs_x, abs_y, pbox.width, pbox.height);

    if !pbox.style.background_color.is_transparent() {
        let c = &pbox.style.background_color;
        lb.background_color = Some([c.r, c.g, c.b, c.a]);
    }

    if pbox.style.border_width > 0.5 {
        let c = &pbox.style.border_color;
        lb.border = Some(BorderStyle {
            width: pbox.style.border_width,
            color: [c.r, c.g, c.b, c.a],
        });
    }

    if let BoxContent::Text { lines, marker } = &pbox.content {
        lb.text = Some(text_content(pbox, lines, marker.clone(), fonts));
    }
    if let BoxContent::Image { src } = &pbox.content {
        lb.image = Some(ImageContent {
            src: src.clone(),
            width: pbox.width,
            height: pbox.height,
        });
    }

    for child in &pbox.children {
        let child_abs_y = abs_y + (child.y - pbox.y);
        lb.children
            .push(build_layout_box(child, child.x, child_abs_y, fonts));
    }

    lb
}

fn text_content(
    pbox: &PositionedBox,
    lines: &[String],
    marker: Option<String>,
    fonts: &FontLibrary,
) -> TextContent {
    let s = &pbox.style;
    let line_height = fonts.line_height(s.font_size, s.line_height);
    let avail = (pbox.width - s.padding_left - s.padding_right).max(0.0);

    let text_lines: Vec<TextLine> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let line_width = fonts.text_width(line, s.font_size, s.bold, s.italic, &s.font_family);
            let align_shift = match s.text_align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((avail - line_width) / 2.0).max(0.0),
                TextAlign::Right => (avail - line_width).max(0.0),
            };
            TextLine {
                text: line.clone(),
                x_offset: s.padding_left + align_shift,
                y_offset: s.padding_top + i as f32 * line_height,
            }
        })
        .collect();

    TextContent {
        lines: text_lines,
        font_family: s.font_family.clone(),
        font_size: s.font_size,
        bold: s.bold,
        italic: s.italic,
        underline: s.underline,
        color: [s.color.r, s.color.g, s.color.b, s.color.a],
        line_height,
        text_align: match s.text_align {
            TextAlign::Left => "left".to_string(),
            TextAlign::Center => "center".to_string(),
            TextAlign::Right => "right".to_string(),
        },
        list_marker: marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::model::{Document, ExperienceEntry, ThemeId};
    use crate::style::build_styled_tree;
    use crate::theme::render_theme;

    fn paginate_doc(doc: &Document, theme: ThemeId) -> DocumentLayout {
        let tree = render_theme(theme, doc);
        let styled = build_styled_tree(&tree);
        let fonts = FontLibrary::default();
        let boxes = compute_layout(&styled, 595.28, PAGE_MARGIN_PT, &fonts);
        paginate(&boxes, 595.28, 841.89, PAGE_MARGIN_PT, &fonts)
    }

    #[test]
    fn short_resume_fits_one_page() {
        let layout = paginate_doc(&crate::samples::minimal_document(), ThemeId::Corporate);
        assert_eq!(layout.pages.len(), 1);
    }

    #[test]
    fn empty_document_still_yields_a_page() {
        let layout = paginate_doc(&crate::samples::empty_document(), ThemeId::Academic);
        assert!(!layout.pages.is_empty());
    }

    #[test]
    fn long_resume_spans_multiple_pages() {
        let mut doc = crate::samples::sample_document();
        for i in 0..30 {
            doc.experience.push(ExperienceEntry {
                title: format!("Role {i}"),
                company: "Cascadia Systems".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Dec 2020".to_string(),
                description: "Responsible for a long-running effort that needs a \
                              couple of lines of description text to take up space."
                    .to_string(),
            });
        }
        let layout = paginate_doc(&doc, ThemeId::Corporate);
        assert!(
            layout.pages.len() > 1,
            "expected multiple pages, got {}",
            layout.pages.len()
        );
    }

    #[test]
    fn boxes_carry_page_absolute_positions() {
        let layout = paginate_doc(&crate::samples::sample_document(), ThemeId::Corporate);
        for page in &layout.pages {
            for b in &page.boxes {
                assert!(b.y >= PAGE_MARGIN_PT - 0.01);
                assert!(b.y < layout.page_height_pt);
            }
        }
    }
}
