//! Heuristic, line-oriented README extraction.
//!
//! Lines are classified once; title, description, sections, features, and
//! technologies are then independent passes over that same line array, so a
//! missing title does not suppress any other field.

use std::path::Path;
use tracing::{debug, warn};

use crate::domain::ReadmeInfo;
use crate::infer::detect_readme_technologies;
use crate::utils::read_file_safe;

/// README candidates in priority order; the first existing file wins.
pub const README_CANDIDATES: &[&str] = &[
    "README.md",
    "readme.md",
    "Readme.md",
    "README.MD",
    "README.markdown",
    "README.rst",
    "README.txt",
    "README",
];

/// Description accumulation stops once it grows past this many characters.
pub const DESCRIPTION_CAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Heading { level: usize, text: &'a str },
    Bullet(&'a str),
    Text(&'a str),
    Blank,
    /// Inside a fenced code block, or decoration such as badges and raw HTML.
    Ignored,
}

fn classify(content: &str) -> Vec<Line<'_>> {
    let mut in_fence = false;
    content
        .lines()
        .map(|raw| {
            let line = raw.trim();
            if line.starts_with("```") || line.starts_with("~~~") {
                in_fence = !in_fence;
                return Line::Ignored;
            }
            if in_fence {
                return Line::Ignored;
            }
            if line.is_empty() {
                return Line::Blank;
            }
            if let Some(heading) = parse_heading(line) {
                return heading;
            }
            if let Some(item) = parse_bullet(line) {
                return Line::Bullet(item);
            }
            if line.starts_with("![") || line.starts_with("[![") || line.starts_with('<') {
                return Line::Ignored;
            }
            Line::Text(line)
        })
        .collect()
}

fn parse_heading(line: &str) -> Option<Line<'_>> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let text = rest.trim().trim_end_matches('#').trim();
    Some(Line::Heading { level, text })
}

fn parse_bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn extract_title(lines: &[Line<'_>]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(idx, line)| match line {
        Line::Heading { level: 1, text } if !text.is_empty() => Some((idx, text.to_string())),
        _ => None,
    })
}

fn extract_description(lines: &[Line<'_>], start: usize) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut length = 0usize;

    for line in lines.iter().skip(start) {
        match line {
            Line::Heading { level, .. } if *level >= 2 => break,
            Line::Text(text) | Line::Bullet(text) => {
                parts.push(text);
                length += text.len() + 1;
                if length > DESCRIPTION_CAP {
                    break;
                }
            }
            _ => {}
        }
    }

    let description = parts.join(" ");
    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}

fn extract_sections(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| match line {
            Line::Heading { level: 2, text } if !text.is_empty() => Some(text.to_string()),
            _ => None,
        })
        .collect()
}

fn extract_features(lines: &[Line<'_>]) -> Vec<String> {
    let mut features = Vec::new();
    let mut in_features = false;

    for line in lines {
        match line {
            Line::Heading { level, text } if *level <= 2 => {
                in_features = *level == 2 && text.to_lowercase().contains("feature");
            }
            Line::Bullet(item) if in_features => {
                let cleaned = item.replace("**", "").trim().to_string();
                if !cleaned.is_empty() {
                    features.push(cleaned);
                }
            }
            _ => {}
        }
    }

    features
}

/// Parse README text into its structured fields.
pub fn parse_readme(content: &str) -> ReadmeInfo {
    let lines = classify(content);

    let title = extract_title(&lines);
    let description_start = title.as_ref().map(|(idx, _)| idx + 1).unwrap_or(0);

    ReadmeInfo {
        description: extract_description(&lines, description_start),
        title: title.map(|(_, text)| text),
        sections: extract_sections(&lines),
        features: extract_features(&lines),
        technologies: detect_readme_technologies(content),
    }
}

/// Read and parse the first README candidate under `root`.
pub fn read_readme(root: &Path) -> Option<ReadmeInfo> {
    let path = README_CANDIDATES.iter().map(|name| root.join(name)).find(|p| p.is_file())?;
    match read_file_safe(&path, None, None) {
        Ok((content, _)) => {
            debug!("Parsing README {}", path.display());
            Some(parse_readme(&content))
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}
