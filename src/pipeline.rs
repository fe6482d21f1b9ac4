//! Pipeline – ties together theme composition, styling, layout, pagination,
//! and rendering into single function calls.

use crate::fonts::FontLibrary;
use crate::layout::compute_layout;
use crate::layout_config::DocumentLayout;
use crate::model::Document;
use crate::pagination::{paginate, PAGE_MARGIN_PT};
use crate::render::render_pdf;
use crate::style::build_styled_tree;
use crate::theme;

/// Configuration for the PDF export pipeline.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Document title embedded in the PDF metadata. Empty means "derive
    /// from the résumé's name".
    pub title: String,
    /// Page width in points (default: A4 = 595.28).
    pub page_width: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height: f32,
    /// Page margin in points (default: 40).
    pub page_margin: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            page_width: 595.28,
            page_height: 841.89,
            page_margin: PAGE_MARGIN_PT,
        }
    }
}

impl ExportConfig {
    fn resolved_title(&self, doc: &Document) -> String {
        if !self.title.is_empty() {
            self.title.clone()
        } else if doc.personal.full_name.is_empty() {
            "resume".to_string()
        } else {
            doc.personal.full_name.clone()
        }
    }
}

/// Full pipeline: document + theme id → PDF bytes.
///
/// Returns `(pdf_bytes, document_layout)`; the layout is the frozen
/// structure an image-capture collaborator can consume instead of the PDF.
pub fn export_pdf(
    doc: &Document,
    theme_id: &str,
    config: &ExportConfig,
) -> Result<(Vec<u8>, DocumentLayout), String> {
    let layout = compute_document_layout(doc, theme_id, config);
    let bytes = render_pdf(&layout)?;
    Ok((bytes, layout))
}

/// Convenience: export with the document's own selected theme and defaults.
pub fn export_pdf_selected(doc: &Document) -> Result<Vec<u8>, String> {
    let (bytes, _) = export_pdf(doc, doc.selected_theme.as_str(), &ExportConfig::default())?;
    Ok(bytes)
}

/// Compute only the paginated layout (no PDF rendering).
pub fn compute_document_layout(
    doc: &Document,
    theme_id: &str,
    config: &ExportConfig,
) -> DocumentLayout {
    let visual = theme::render(theme_id, doc);
    let styled = build_styled_tree(&visual);
    let fonts = FontLibrary::default();
    let boxes = compute_layout(&styled, config.page_width, config.page_margin, &fonts);
    let mut layout = paginate(
        &boxes,
        config.page_width,
        config.page_height,
        config.page_margin,
        &fonts,
    );
    layout.title = config.resolved_title(doc);
    layout.theme = visual.theme.as_str().to_string();
    layout
}

/// Document + theme id → preview HTML.
pub fn export_html(doc: &Document, theme_id: &str) -> String {
    crate::html::write_html(&theme::render(theme_id, doc))
}
