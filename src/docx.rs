//! DOCX exporter – writes the raw document model into a Word file.
//!
//! This path deliberately does not reuse the theme engine: the Word output
//! is a single fixed single-column layout (centered name, pipe-separated
//! contact line, upper-case section headings) laid out directly from the
//! [`Document`]. The file is a standard OOXML package: a zip container with
//! `[Content_Types].xml`, the package relationships, and
//! `word/document.xml`.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::model::Document;
use crate::theme::NAME_PLACEHOLDER;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Font sizes in half-points (WordprocessingML's `w:sz` unit).
const NAME_SIZE: u32 = 48;
const HEADING_SIZE: u32 = 28;

/// Export `doc` as DOCX bytes.
pub fn export_docx(doc: &Document) -> Result<Vec<u8>, String> {
    let document_xml = build_document_xml(doc);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document_xml.as_str()),
    ] {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer
            .start_file(name, options)
            .map_err(|e| format!("docx package error: {e}"))?;
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| format!("docx write error: {e}"))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| format!("docx finalize error: {e}"))?;
    Ok(cursor.into_inner())
}

fn build_document_xml(doc: &Document) -> String {
    let mut body = String::new();

    let name = if doc.personal.full_name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        doc.personal.full_name.as_str()
    };
    body.push_str(&paragraph(
        true,
        &[run(name, true, Some(NAME_SIZE))],
    ));

    let contact: Vec<&str> = [
        doc.personal.email.as_str(),
        doc.personal.phone.as_str(),
        doc.personal.location.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        body.push_str(&paragraph(
            true,
            &[run(&contact.join(" | "), false, None)],
        ));
    }
    body.push_str(&empty_paragraph());

    if !doc.summary.is_empty() {
        body.push_str(&heading("PROFESSIONAL SUMMARY"));
        body.push_str(&text_paragraph(&doc.summary));
        body.push_str(&empty_paragraph());
    }

    if !doc.experience.is_empty() {
        body.push_str(&heading("WORK EXPERIENCE"));
        for entry in &doc.experience {
            body.push_str(&paragraph(
                false,
                &[
                    run(&entry.title, true, None),
                    run(&format!(" - {}", entry.company), false, None),
                ],
            ));
            body.push_str(&text_paragraph(&format!(
                "{} - {}",
                entry.start_date, entry.end_date
            )));
            body.push_str(&text_paragraph(&entry.description));
            body.push_str(&empty_paragraph());
        }
    }

    if !doc.education.is_empty() {
        body.push_str(&heading("EDUCATION"));
        for entry in &doc.education {
            body.push_str(&paragraph(false, &[run(&entry.degree, true, None)]));
            body.push_str(&text_paragraph(&entry.institution));
            body.push_str(&text_paragraph(&format!(
                "{} - {}",
                entry.start_date, entry.end_date
            )));
            body.push_str(&empty_paragraph());
        }
    }

    if !doc.projects.is_empty() {
        body.push_str(&heading("PROJECTS"));
        for entry in &doc.projects {
            body.push_str(&paragraph(false, &[run(&entry.name, true, None)]));
            body.push_str(&text_paragraph(&entry.technologies));
            body.push_str(&text_paragraph(&entry.description));
            body.push_str(&empty_paragraph());
        }
    }

    if !doc.skills.is_empty() {
        body.push_str(&heading("SKILLS"));
        // The raw comma-separated field, not the parsed chips.
        body.push_str(&text_paragraph(&doc.skills));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}<w:sectPr/></w:body></w:document>"
    )
}

fn heading(text: &str) -> String {
    paragraph(false, &[run(text, true, Some(HEADING_SIZE))])
}

fn text_paragraph(text: &str) -> String {
    paragraph(false, &[run(text, false, None)])
}

fn empty_paragraph() -> String {
    "<w:p/>".to_string()
}

fn paragraph(centered: bool, runs: &[String]) -> String {
    let props = if centered {
        "<w:pPr><w:jc w:val=\"center\"/></w:pPr>"
    } else {
        ""
    };
    format!("<w:p>{props}{}</w:p>", runs.concat())
}

fn run(text: &str, bold: bool, size_half_points: Option<u32>) -> String {
    let mut props = String::new();
    if bold {
        props.push_str("<w:b/>");
    }
    if let Some(sz) = size_half_points {
        props.push_str(&format!("<w:sz w:val=\"{sz}\"/>"));
    }
    let rpr = if props.is_empty() {
        String::new()
    } else {
        format!("<w:rPr>{props}</w:rPr>")
    };
    format!(
        "<w:r>{rpr}<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        escape_xml(text)
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
