//! Résumé document model – the canonical in-memory shape of a résumé.
//!
//! Every field defaults to empty rather than being optional: an unset value
//! is the empty string or empty vector, never a distinct "missing" marker.
//! Section-presence checks throughout the renderer rely on this. Field names
//! serialize in camelCase so snapshots written by earlier builds load
//! unchanged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Theme identifier
// ---------------------------------------------------------------------------

/// One of the fixed visual layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeId {
    #[default]
    Corporate,
    Modern,
    Academic,
}

impl ThemeId {
    /// Parse a theme identifier. Anything outside the fixed enumeration maps
    /// to `Corporate` – an observable policy, not an error.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => ThemeId::Modern,
            "academic" => ThemeId::Academic,
            _ => ThemeId::Corporate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Corporate => "corporate",
            ThemeId::Modern => "modern",
            ThemeId::Academic => "academic",
        }
    }

    /// All known identifiers, in presentation order.
    pub fn all() -> [ThemeId; 3] {
        [ThemeId::Corporate, ThemeId::Modern, ThemeId::Academic]
    }
}

impl From<String> for ThemeId {
    fn from(s: String) -> Self {
        ThemeId::from_str(&s)
    }
}

impl From<ThemeId> for String {
    fn from(t: ThemeId) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The canonical résumé record. Owned by the editing session and passed by
/// reference into every render call; rendering never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub personal: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    /// Comma-delimited list semantics.
    pub skills: String,
    /// Newline-delimited list semantics.
    pub certifications: String,
    /// Newline-delimited list semantics.
    pub languages: String,
    pub hobbies: String,
    /// Carried in the snapshot envelope on the wire, not inside `formData`.
    #[serde(skip)]
    pub selected_theme: ThemeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub github: String,
    /// Opaque image reference (typically a base64 data URI), or empty.
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub technologies: String,
    pub link: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_corporate() {
        assert_eq!(ThemeId::from_str("corporate"), ThemeId::Corporate);
        assert_eq!(ThemeId::from_str("modern"), ThemeId::Modern);
        assert_eq!(ThemeId::from_str("ACADEMIC"), ThemeId::Academic);
        assert_eq!(ThemeId::from_str("nonexistent-theme"), ThemeId::Corporate);
        assert_eq!(ThemeId::from_str(""), ThemeId::Corporate);
    }

    #[test]
    fn document_defaults_are_empty() {
        let doc = Document::default();
        assert!(doc.personal.full_name.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());
        assert_eq!(doc.selected_theme, ThemeId::Corporate);
    }

    #[test]
    fn camel_case_wire_format() {
        let json = r#"{
            "personal": {"fullName": "Ada Lovelace", "email": "ada@example.com"},
            "experience": [{"title": "Engineer", "company": "Analytical Engines",
                            "startDate": "1842", "endDate": "1843", "description": ""}]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.personal.full_name, "Ada Lovelace");
        assert_eq!(doc.experience[0].start_date, "1842");
        // Unlisted fields come back empty, never missing.
        assert!(doc.personal.photo.is_empty());
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn entry_removal_is_positional() {
        let mut doc = Document::default();
        for t in ["A", "B", "C"] {
            doc.experience.push(ExperienceEntry {
                title: t.to_string(),
                ..ExperienceEntry::default()
            });
        }
        doc.experience.remove(1);
        let titles: Vec<&str> = doc.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
