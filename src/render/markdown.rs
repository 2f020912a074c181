//! Markdown output. Styles only change heading decoration here.

use std::fmt::Write as _;

use super::{endorsement_roster_suffix, DocumentRenderer, RenderError};
use crate::domain::{OutputFormat, ResumeDocument, Style};

fn section_heading(style: Style, title: &str) -> String {
    match style {
        Style::Classic => format!("## {}", title.to_uppercase()),
        Style::Developer => format!("## `{}`", title.to_lowercase()),
        Style::Modern | Style::Minimal => format!("## {title}"),
    }
}

fn write_bullets(out: &mut String, items: &[String]) -> std::fmt::Result {
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}

pub struct MarkdownRenderer;

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, doc: &ResumeDocument, style: Style) -> Result<String, RenderError> {
        let mut out = String::new();
        let personal = &doc.personal;
        let name = if personal.name.trim().is_empty() { "Resume" } else { personal.name.as_str() };
        writeln!(out, "# {name}")?;
        if !personal.title.is_empty() {
            writeln!(out, "\n**{}**", personal.title)?;
        }
        let contact: Vec<String> = [
            (!personal.email.is_empty()).then(|| format!("<{}>", personal.email)),
            (!personal.link.is_empty()).then(|| format!("[{0}]({0})", personal.link)),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !contact.is_empty() {
            writeln!(out, "\n{}", contact.join(" | "))?;
        }
        if style == Style::Classic {
            writeln!(out, "\n---")?;
        }

        if !doc.summary.is_empty() {
            writeln!(out, "\n{}\n\n{}", section_heading(style, "Summary"), doc.summary)?;
        }

        if !doc.skills.is_empty() {
            writeln!(out, "\n{}\n", section_heading(style, "Skills"))?;
            let categories = [
                ("Technical", &doc.skills.technical),
                ("Frameworks", &doc.skills.frameworks),
                ("Tools", &doc.skills.tools),
                ("Databases", &doc.skills.databases),
            ];
            for (label, skills) in categories {
                if skills.is_empty() {
                    continue;
                }
                let rendered: Vec<String> = skills
                    .iter()
                    .map(|s| format!("{s}{}", endorsement_roster_suffix(doc, s)))
                    .collect();
                writeln!(out, "- **{label}:** {}", rendered.join(", "))?;
            }
        }

        if !doc.experience.is_empty() {
            writeln!(out, "\n{}", section_heading(style, "Experience"))?;
            for entry in &doc.experience {
                writeln!(out, "\n### {}", entry.project_name)?;
                if !entry.duration.is_empty() {
                    writeln!(out, "\n*{}*", entry.duration)?;
                }
                if !entry.description.is_empty() {
                    writeln!(out, "\n{}", entry.description)?;
                }
                if !entry.achievements.is_empty() {
                    writeln!(out)?;
                    write_bullets(&mut out, &entry.achievements)?;
                }
                if !entry.technologies.is_empty() {
                    writeln!(out, "\n_Technologies: {}_", entry.technologies.join(", "))?;
                }
            }
        }

        if !doc.projects.is_empty() {
            writeln!(out, "\n{}", section_heading(style, "Projects"))?;
            for project in &doc.projects {
                match &project.link {
                    Some(link) => writeln!(out, "\n### [{}]({link})", project.name)?,
                    None => writeln!(out, "\n### {}", project.name)?,
                }
                if !project.description.is_empty() {
                    writeln!(out, "\n{}", project.description)?;
                }
                if !project.highlights.is_empty() {
                    writeln!(out)?;
                    write_bullets(&mut out, &project.highlights)?;
                }
                if !project.technologies.is_empty() {
                    writeln!(out, "\n_Technologies: {}_", project.technologies.join(", "))?;
                }
            }
        }
        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}
