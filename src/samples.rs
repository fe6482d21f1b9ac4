//! Sample résumé documents for testing and demonstration.

use crate::model::{
    Document, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ThemeId,
};

/// 1×1 PNG data URI – smallest embeddable photo for exercising the image
/// path end to end.
pub const SAMPLE_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// A fully populated résumé exercising every section of every theme.
pub fn sample_document() -> Document {
    Document {
        personal: PersonalInfo {
            full_name: "Jordan Rivera".to_string(),
            email: "jordan.rivera@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            location: "Portland, OR".to_string(),
            linkedin: "https://linkedin.com/in/jordanrivera".to_string(),
            portfolio: "https://jordanrivera.dev".to_string(),
            github: "https://github.com/jordanrivera".to_string(),
            photo: SAMPLE_PHOTO.to_string(),
        },
        summary: "Backend engineer with eight years of experience building \
                  document processing pipelines and storage services."
            .to_string(),
        education: vec![
            EducationEntry {
                degree: "B.Sc. Computer Science".to_string(),
                institution: "Oregon State University".to_string(),
                start_date: "Sep 2012".to_string(),
                end_date: "Jun 2016".to_string(),
                description: "Focus on distributed systems; teaching assistant \
                              for the operating systems course."
                    .to_string(),
            },
            EducationEntry {
                degree: "M.Sc. Software Engineering".to_string(),
                institution: "Portland State University".to_string(),
                start_date: "Sep 2016".to_string(),
                end_date: "Jun 2018".to_string(),
                description: String::new(),
            },
        ],
        experience: vec![
            ExperienceEntry {
                title: "Senior Software Engineer".to_string(),
                company: "Cascadia Systems".to_string(),
                start_date: "Jul 2021".to_string(),
                end_date: "Present".to_string(),
                description: "Own the report-generation service; cut p99 render \
                              latency by 60% and led the migration to a typed \
                              layout pipeline."
                    .to_string(),
            },
            ExperienceEntry {
                title: "Software Engineer".to_string(),
                company: "Riverbed Labs".to_string(),
                start_date: "Jul 2018".to_string(),
                end_date: "Jun 2021".to_string(),
                description: "Built ingestion workers and the internal template \
                              catalog used by four product teams."
                    .to_string(),
            },
        ],
        projects: vec![
            ProjectEntry {
                name: "Tracker".to_string(),
                technologies: "Rust, SQLite".to_string(),
                link: "https://github.com/jordanrivera/tracker".to_string(),
                description: "A command-line time tracker with weekly summaries."
                    .to_string(),
            },
            ProjectEntry {
                name: "Paperweight".to_string(),
                technologies: String::new(),
                link: String::new(),
                description: "Static-site generator for personal wikis.".to_string(),
            },
        ],
        skills: "Rust, Go, PostgreSQL, Kubernetes, gRPC".to_string(),
        certifications: "AWS Solutions Architect Associate\nCKA: Certified \
                         Kubernetes Administrator"
            .to_string(),
        languages: "English\nSpanish".to_string(),
        hobbies: "Trail running, film photography, chess.".to_string(),
        selected_theme: ThemeId::Corporate,
    }
}

/// Name and a single job only – the smallest document that still renders
/// an entry section.
pub fn minimal_document() -> Document {
    Document {
        personal: PersonalInfo {
            full_name: "Sam Doe".to_string(),
            email: "sam@example.com".to_string(),
            ..PersonalInfo::default()
        },
        experience: vec![ExperienceEntry {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020".to_string(),
            end_date: "2024".to_string(),
            description: String::new(),
        }],
        ..Document::default()
    }
}

/// The all-empty defaults a fresh session starts from.
pub fn empty_document() -> Document {
    Document::default()
}
