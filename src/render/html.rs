//! Self-contained HTML output, one theme per [`Style`].
//!
//! Pagination is left to the browser's print engine through `@page` rules,
//! so "print to PDF" yields a paginated document.

use std::fmt::Write as _;

use super::{endorsement_suffix, DocumentRenderer, RenderError};
use crate::domain::{OutputFormat, ResumeDocument, Style};

struct Theme {
    font: &'static str,
    heading_font: &'static str,
    accent: &'static str,
    text: &'static str,
    muted: &'static str,
    background: &'static str,
    section_rule: &'static str,
    heading_case: &'static str,
    chip_background: &'static str,
}

fn theme(style: Style) -> Theme {
    match style {
        Style::Modern => Theme {
            font: "'Inter', 'Segoe UI', Helvetica, Arial, sans-serif",
            heading_font: "'Inter', 'Segoe UI', Helvetica, Arial, sans-serif",
            accent: "#2563eb",
            text: "#1f2937",
            muted: "#6b7280",
            background: "#ffffff",
            section_rule: "2px solid #2563eb",
            heading_case: "none",
            chip_background: "#eff6ff",
        },
        Style::Classic => Theme {
            font: "Georgia, 'Times New Roman', serif",
            heading_font: "Georgia, 'Times New Roman', serif",
            accent: "#111827",
            text: "#111827",
            muted: "#4b5563",
            background: "#ffffff",
            section_rule: "1px solid #111827",
            heading_case: "uppercase",
            chip_background: "transparent",
        },
        Style::Minimal => Theme {
            font: "-apple-system, 'Helvetica Neue', Arial, sans-serif",
            heading_font: "-apple-system, 'Helvetica Neue', Arial, sans-serif",
            accent: "#374151",
            text: "#374151",
            muted: "#9ca3af",
            background: "#ffffff",
            section_rule: "none",
            heading_case: "none",
            chip_background: "transparent",
        },
        Style::Developer => Theme {
            font: "'JetBrains Mono', 'Fira Code', Menlo, Consolas, monospace",
            heading_font: "'JetBrains Mono', 'Fira Code', Menlo, Consolas, monospace",
            accent: "#22c55e",
            text: "#e5e7eb",
            muted: "#9ca3af",
            background: "#0f172a",
            section_rule: "1px dashed #22c55e",
            heading_case: "lowercase",
            chip_background: "#1e293b",
        },
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn stylesheet(theme: &Theme) -> String {
    format!(
        r#"@page {{ size: A4; margin: 16mm 14mm; }}
* {{ box-sizing: border-box; }}
body {{
  margin: 0 auto; max-width: 820px; padding: 32px;
  font-family: {font}; font-size: 14px; line-height: 1.5;
  color: {text}; background: {background};
}}
header {{ margin-bottom: 20px; }}
h1 {{ font-family: {heading_font}; margin: 0; font-size: 30px; color: {accent}; }}
.title {{ color: {muted}; font-size: 16px; margin-top: 2px; }}
.contact {{ color: {muted}; margin-top: 6px; }}
.contact a {{ color: {accent}; text-decoration: none; }}
h2 {{
  font-family: {heading_font}; font-size: 16px; letter-spacing: 0.04em;
  text-transform: {heading_case}; color: {accent};
  border-bottom: {section_rule}; padding-bottom: 4px; margin: 24px 0 10px;
}}
.entry {{ margin-bottom: 14px; break-inside: avoid; page-break-inside: avoid; }}
.entry-head {{ display: flex; justify-content: space-between; align-items: baseline; gap: 12px; }}
.entry-name {{ font-weight: 600; }}
.duration, .tech {{ color: {muted}; font-size: 13px; }}
.skills dt {{ font-weight: 600; margin-top: 6px; }}
.skills dd {{ margin: 2px 0 0; }}
.chip {{
  display: inline-block; background: {chip_background};
  border-radius: 4px; padding: 1px 6px; margin: 2px 4px 2px 0;
}}
.endorsed {{ color: {accent}; font-size: 12px; }}
ul {{ margin: 6px 0 0; padding-left: 20px; }}
@media print {{
  body {{ padding: 0; max-width: none; }}
  h2 {{ break-after: avoid; page-break-after: avoid; }}
}}
"#,
        font = theme.font,
        heading_font = theme.heading_font,
        text = theme.text,
        background = theme.background,
        accent = theme.accent,
        muted = theme.muted,
        heading_case = theme.heading_case,
        section_rule = theme.section_rule,
        chip_background = theme.chip_background,
    )
}

fn write_list(out: &mut String, items: &[String]) -> std::fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "<ul>")?;
    for item in items {
        writeln!(out, "  <li>{}</li>", escape(item))?;
    }
    writeln!(out, "</ul>")
}

fn write_technologies(out: &mut String, technologies: &[String]) -> std::fmt::Result {
    if technologies.is_empty() {
        return Ok(());
    }
    writeln!(out, "<div class=\"tech\">{}</div>", escape(&technologies.join(" · ")))
}

fn write_skills(out: &mut String, doc: &ResumeDocument) -> std::fmt::Result {
    let categories = [
        ("Technical", &doc.skills.technical),
        ("Frameworks", &doc.skills.frameworks),
        ("Tools", &doc.skills.tools),
        ("Databases", &doc.skills.databases),
    ];
    writeln!(out, "<section class=\"skills\">\n<h2>Skills</h2>\n<dl>")?;
    for (label, skills) in categories.iter().filter(|(_, s)| !s.is_empty()) {
        writeln!(out, "<dt>{label}</dt>\n<dd>")?;
        for skill in skills.iter() {
            match doc.endorsement_for(skill) {
                Some(endorsement) => writeln!(
                    out,
                    "  <span class=\"chip\" title=\"Endorsed by {}\">{}\
                     <span class=\"endorsed\">{}</span></span>",
                    escape(&endorsement.endorsers.join(", ")),
                    escape(skill),
                    escape(&endorsement_suffix(doc, skill)),
                )?,
                None => writeln!(out, "  <span class=\"chip\">{}</span>", escape(skill))?,
            }
        }
        writeln!(out, "</dd>")?;
    }
    writeln!(out, "</dl>\n</section>")
}

fn write_body(out: &mut String, doc: &ResumeDocument) -> std::fmt::Result {
    let personal = &doc.personal;
    writeln!(out, "<header>")?;
    let name = if personal.name.trim().is_empty() { "Resume" } else { personal.name.as_str() };
    writeln!(out, "<h1>{}</h1>", escape(name))?;
    if !personal.title.is_empty() {
        writeln!(out, "<div class=\"title\">{}</div>", escape(&personal.title))?;
    }
    let mut contact = Vec::new();
    if !personal.email.is_empty() {
        contact.push(format!(
            "<a href=\"mailto:{0}\">{0}</a>",
            escape(&personal.email)
        ));
    }
    if !personal.link.is_empty() {
        contact.push(format!("<a href=\"{0}\">{0}</a>", escape(&personal.link)));
    }
    if !contact.is_empty() {
        writeln!(out, "<div class=\"contact\">{}</div>", contact.join(" · "))?;
    }
    writeln!(out, "</header>")?;

    if !doc.summary.is_empty() {
        writeln!(out, "<section>\n<h2>Summary</h2>\n<p>{}</p>\n</section>", escape(&doc.summary))?;
    }

    if !doc.skills.is_empty() {
        write_skills(out, doc)?;
    }

    if !doc.experience.is_empty() {
        writeln!(out, "<section>\n<h2>Experience</h2>")?;
        for entry in &doc.experience {
            writeln!(out, "<div class=\"entry\">\n<div class=\"entry-head\">")?;
            writeln!(out, "<span class=\"entry-name\">{}</span>", escape(&entry.project_name))?;
            if !entry.duration.is_empty() {
                writeln!(out, "<span class=\"duration\">{}</span>", escape(&entry.duration))?;
            }
            writeln!(out, "</div>")?;
            if !entry.description.is_empty() {
                writeln!(out, "<div>{}</div>", escape(&entry.description))?;
            }
            write_list(out, &entry.achievements)?;
            write_technologies(out, &entry.technologies)?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</section>")?;
    }

    if !doc.projects.is_empty() {
        writeln!(out, "<section>\n<h2>Projects</h2>")?;
        for project in &doc.projects {
            writeln!(out, "<div class=\"entry\">\n<div class=\"entry-head\">")?;
            match &project.link {
                Some(link) => writeln!(
                    out,
                    "<a class=\"entry-name\" href=\"{}\">{}</a>",
                    escape(link),
                    escape(&project.name)
                )?,
                None => {
                    writeln!(out, "<span class=\"entry-name\">{}</span>", escape(&project.name))?
                }
            }
            writeln!(out, "</div>")?;
            if !project.description.is_empty() {
                writeln!(out, "<div>{}</div>", escape(&project.description))?;
            }
            write_list(out, &project.highlights)?;
            write_technologies(out, &project.technologies)?;
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</section>")?;
    }
    Ok(())
}

pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, document: &ResumeDocument, style: Style) -> Result<String, RenderError> {
        let theme = theme(style);
        let title = if document.personal.name.trim().is_empty() {
            "Resume".to_string()
        } else {
            format!("{} - Resume", document.personal.name)
        };

        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(out, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">")?;
        writeln!(out, "<title>{}</title>", escape(&title))?;
        writeln!(out, "<style>\n{}</style>\n</head>", stylesheet(&theme))?;
        writeln!(out, "<body class=\"style-{}\">", style.as_str())?;
        write_body(&mut out, document)?;
        writeln!(out, "</body>\n</html>")?;
        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::sample_document;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn renders_every_section_escaped() {
        let html = HtmlRenderer.render(&sample_document(), Style::Modern).expect("render");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@page"));
        assert!(html.contains("<h1>Ada Lovelace</h1>"));
        assert!(html.contains("Builds &lt;fast&gt; &amp; reliable tools."));
        assert!(html.contains("<h2>Experience</h2>"));
        assert!(html.contains("href=\"https://github.com/ada/widget\""));
        assert!(html.contains("title=\"Endorsed by Grace, Linus\""));
        assert!(html.contains("(+2)"));
        assert!(!html.contains("<dt>Tools</dt>"));
    }

    #[test]
    fn each_style_has_its_own_theme() {
        let doc = sample_document();
        let modern = HtmlRenderer.render(&doc, Style::Modern).expect("modern");
        let developer = HtmlRenderer.render(&doc, Style::Developer).expect("developer");
        assert!(modern.contains("class=\"style-modern\""));
        assert!(developer.contains("class=\"style-developer\""));
        assert!(developer.contains("monospace"));
        assert_ne!(modern, developer);
    }

    #[test]
    fn empty_document_still_renders() {
        let html = HtmlRenderer.render(&ResumeDocument::default(), Style::Minimal).expect("render");
        assert!(html.contains("<h1>Resume</h1>"));
        assert!(!html.contains("<h2>"));
    }
}
