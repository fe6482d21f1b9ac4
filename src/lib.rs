//! # resume-forge – multi-theme résumé rendering and export
//!
//! This crate turns a structured résumé document into a themed visual
//! document and exports it. The pipeline stages are:
//!
//! 1. **Model** – canonical résumé record ([`model`], [`lists`])
//! 2. **Compose** – theme engine builds an abstract visual tree
//!    ([`theme`], [`section`], [`node`])
//! 3. **Present** – visual tree → preview HTML ([`html`])
//! 4. **Layout** – per-theme stylesheet + Taffy flex layout + A4
//!    pagination ([`style`], [`layout`], [`pagination`])
//! 5. **Render** – paginated layout → PDF bytes via printpdf ([`render`])
//!
//! A separate single-layout Word export ([`docx`]) works directly from the
//! document model, and [`storage`] persists the editing snapshot.

pub mod docx;
pub mod fonts;
pub mod html;
pub mod layout;
pub mod layout_config;
pub mod lists;
pub mod model;
pub mod node;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod samples;
pub mod section;
pub mod storage;
pub mod style;
pub mod theme;

// Re-exports for convenience
pub use model::{Document, ThemeId};
pub use pipeline::{export_pdf, export_pdf_selected, ExportConfig};
pub use theme::render;
