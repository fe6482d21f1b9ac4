//! Font metrics and text measurement using `ttf-parser`.
//!
//! Text widths feed Taffy with accurate intrinsic sizes so line wrapping in
//! the PDF matches the measured layout. When a real font file is registered
//! its glyph advances are cached up front; otherwise a proportional-width
//! heuristic keeps measurement deterministic.

use std::collections::HashMap;

/// Characters whose advances are cached when a face is registered. Résumé
/// text outside this range falls back to the average width.
const CACHED_RANGE: std::ops::RangeInclusive<char> = '\u{20}'..='\u{FF}';

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FaceKey {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FaceKey {
    fn new(family: &str, bold: bool, italic: bool) -> Self {
        Self {
            family: family.to_string(),
            bold,
            italic,
        }
    }
}

/// Metrics for one registered face.
#[derive(Clone)]
pub struct FaceMetrics {
    /// Raw font bytes, kept for PDF embedding; empty for synthetic faces.
    pub bytes: Vec<u8>,
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
    /// Advance per cached character, in font units.
    advances: HashMap<char, f32>,
    /// Mean cached advance, used for characters outside the cache.
    average_advance: f32,
}

impl FaceMetrics {
    fn synthetic() -> Self {
        Self {
            bytes: Vec::new(),
            units_per_em: 1000.0,
            ascender: 750.0,
            descender: -250.0,
            advances: HashMap::new(),
            average_advance: 0.0,
        }
    }
}

/// Registry of font faces with measurement helpers.
pub struct FontLibrary {
    faces: HashMap<FaceKey, FaceMetrics>,
    default_key: FaceKey,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
            default_key: FaceKey::new("Helvetica", false, false),
        }
    }

    /// Register a TTF/OTF face from raw bytes, caching Latin-1 advances.
    pub fn register(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("failed to parse font '{family}': {e}"))?;

        let mut advances = HashMap::new();
        let mut total = 0.0f32;
        for ch in CACHED_RANGE {
            if let Some(gid) = face.glyph_index(ch) {
                let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f32;
                advances.insert(ch, advance);
                total += advance;
            }
        }
        let average_advance = if advances.is_empty() {
            face.units_per_em() as f32 * 0.5
        } else {
            total / advances.len() as f32
        };

        let metrics = FaceMetrics {
            units_per_em: face.units_per_em() as f32,
            ascender: face.ascender() as f32,
            descender: face.descender() as f32,
            advances,
            average_advance,
            bytes,
        };

        let key = FaceKey::new(family, bold, italic);
        if self.faces.is_empty() {
            self.default_key = key.clone();
        }
        self.faces.insert(key, metrics);
        Ok(())
    }

    /// Register synthetic Helvetica regular + bold faces when nothing real
    /// is available, so measurement always has a face to fall back to.
    pub fn ensure_default(&mut self) {
        if self.faces.is_empty() {
            let key = FaceKey::new("Helvetica", false, false);
            self.faces.insert(key.clone(), FaceMetrics::synthetic());
            self.faces
                .insert(FaceKey::new("Helvetica", true, false), FaceMetrics::synthetic());
            self.default_key = key;
        }
    }

    fn face(&self, key: &FaceKey) -> &FaceMetrics {
        self.faces
            .get(key)
            .unwrap_or_else(|| self.faces.get(&self.default_key).expect("no faces registered"))
    }

    /// Width of `text` at `font_size` points.
    pub fn text_width(
        &self,
        text: &str,
        font_size: f32,
        bold: bool,
        italic: bool,
        family: &str,
    ) -> f32 {
        let metrics = self.face(&FaceKey::new(family, bold, italic));

        if metrics.bytes.is_empty() {
            // Proportional heuristic: average glyph ≈ half the em square,
            // bold runs ~10% wider.
            let avg = if bold { 0.55 } else { 0.5 };
            return text.chars().count() as f32 * font_size * avg;
        }

        let scale = font_size / metrics.units_per_em;
        text.chars()
            .map(|ch| {
                metrics
                    .advances
                    .get(&ch)
                    .copied()
                    .unwrap_or(metrics.average_advance)
            })
            .sum::<f32>()
            * scale
    }

    pub fn line_height(&self, font_size: f32, factor: f32) -> f32 {
        font_size * factor
    }

    /// Font bytes for PDF embedding, when a real face is registered.
    pub fn face_bytes(&self, key: &FaceKey) -> Option<&[u8]> {
        self.faces.get(key).and_then(|m| {
            if m.bytes.is_empty() {
                None
            } else {
                Some(m.bytes.as_slice())
            }
        })
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        let mut lib = Self::new();
        lib.ensure_default();
        lib
    }
}

/// Greedy word-wrap of `text` into lines no wider than `max_width` points.
/// Existing newlines are respected.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    bold: bool,
    italic: bool,
    family: &str,
    max_width: f32,
    fonts: &FontLibrary,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in &words {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            let width = fonts.text_width(&candidate, font_size, bold, italic, family);
            if width > max_width && !current.is_empty() {
                lines.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
