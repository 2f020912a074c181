//! Document renderers (HTML, Markdown, JSON) and output writing.

use thiserror::Error;

use crate::domain::{OutputFormat, ResumeDocument, Style};

pub mod html;
pub mod json;
pub mod markdown;
pub mod output;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use output::{check_output_writable, default_output_path, write_output};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Serialize(e.to_string())
    }
}

/// Turns a document into the bytes of one output format.
pub trait DocumentRenderer {
    fn render(&self, document: &ResumeDocument, style: Style) -> Result<String, RenderError>;

    fn format(&self) -> OutputFormat;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Render `document` in `format` with `style`.
pub fn render_document(
    document: &ResumeDocument,
    format: OutputFormat,
    style: Style,
) -> Result<String, RenderError> {
    renderer_for(format).render(document, style)
}

/// Endorsement suffix shown next to a skill, e.g. ` (+2)`.
pub(crate) fn endorsement_suffix(document: &ResumeDocument, skill: &str) -> String {
    match document.endorsement_for(skill) {
        Some(e) if e.count() > 0 => format!(" (+{})", e.count()),
        _ => String::new(),
    }
}

/// Endorsement suffix naming who endorsed, e.g. ` (+2: Grace, Linus)`.
pub(crate) fn endorsement_roster_suffix(document: &ResumeDocument, skill: &str) -> String {
    match document.endorsement_for(skill) {
        Some(e) if e.count() > 0 => format!(" (+{}: {})", e.count(), e.endorsers.join(", ")),
        _ => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::*;

    pub fn sample_document() -> ResumeDocument {
        ResumeDocument {
            personal: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                title: "Software Engineer".to_string(),
                email: "ada@example.com".to_string(),
                link: "https://github.com/ada".to_string(),
            },
            summary: "Builds <fast> & reliable tools.".to_string(),
            skills: Skills {
                technical: vec!["Rust".to_string(), "TypeScript".to_string()],
                frameworks: vec!["React".to_string()],
                tools: vec![],
                databases: vec!["PostgreSQL".to_string()],
            },
            experience: vec![ExperienceEntry {
                project_name: "widget".to_string(),
                description: "Core developer".to_string(),
                achievements: vec!["Delivered 12 commits spanning 2 languages".to_string()],
                technologies: vec!["Rust".to_string()],
                duration: "Jan 2024 - Mar 2024".to_string(),
            }],
            projects: vec![ProjectEntry {
                name: "widget".to_string(),
                description: "Makes widgets".to_string(),
                technologies: vec!["Rust".to_string(), "React".to_string()],
                highlights: vec!["Fast".to_string()],
                link: Some("https://github.com/ada/widget".to_string()),
            }],
            endorsements: vec![SkillEndorsement {
                skill: "Rust".to_string(),
                endorsers: vec!["Grace".to_string(), "Linus".to_string()],
            }],
        }
    }
}
