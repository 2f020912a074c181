//! Locating JSON inside free-form model output and validating its shape.
//!
//! Responses may wrap the payload in prose or code fences. Extraction scans
//! for a balanced bracket span (string- and escape-aware) that parses as JSON.
//! Validation then keeps only well-shaped fields; anything else is treated as
//! absent so the caller can fall back for that section.

use serde_json::{Map, Value};

use crate::domain::{ExperienceEntry, ProjectEntry, Skills};
use crate::llm::strip_code_fences;

/// End index (exclusive) of the balanced span starting at `start`, which must
/// hold `open`.
fn balanced_end(text: &str, start: usize, open: u8, close: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn extract_balanced(text: &str, open: u8, close: u8) -> Option<Value> {
    let text = strip_code_fences(text);
    text.bytes()
        .enumerate()
        .filter(|(_, b)| *b == open)
        .filter_map(|(start, _)| {
            let end = balanced_end(text, start, open, close)?;
            serde_json::from_str::<Value>(&text[start..end]).ok()
        })
        .next()
}

/// First parseable `{...}` object embedded in `text`.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    match extract_balanced(text, b'{', b'}')? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// First parseable `[...]` array embedded in `text`.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    match extract_balanced(text, b'[', b']')? {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Non-empty trimmed string, or `None`.
fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String items of an array field; non-string items are dropped. `None` when
/// no key holds an array.
fn string_list(map: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    let items = keys.iter().find_map(|key| map.get(*key).and_then(Value::as_array))?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Categorized skills from a model response. `None` when no object is found
/// or none of the four categories is an array.
pub fn parse_skills(text: &str) -> Option<Skills> {
    let map = extract_json_object(text)?;
    let technical = string_list(&map, &["technical", "technical_skills", "languages"]);
    let frameworks = string_list(&map, &["frameworks"]);
    let tools = string_list(&map, &["tools"]);
    let databases = string_list(&map, &["databases", "datastores"]);

    if technical.is_none() && frameworks.is_none() && tools.is_none() && databases.is_none() {
        return None;
    }
    Some(Skills {
        technical: technical.unwrap_or_default(),
        frameworks: frameworks.unwrap_or_default(),
        tools: tools.unwrap_or_default(),
        databases: databases.unwrap_or_default(),
    })
}

/// Experience entries from a model response. Entries missing a project name
/// or description are dropped; `None` when nothing valid remains.
pub fn parse_experience(text: &str) -> Option<Vec<ExperienceEntry>> {
    let entries: Vec<ExperienceEntry> = extract_json_array(text)?
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|map| {
            Some(ExperienceEntry {
                project_name: string_field(map, &["project_name", "project", "title", "name"])?,
                description: string_field(map, &["description", "summary"])?,
                achievements: string_list(map, &["achievements", "highlights"]).unwrap_or_default(),
                technologies: string_list(map, &["technologies", "tech"]).unwrap_or_default(),
                duration: string_field(map, &["duration"]).unwrap_or_default(),
            })
        })
        .collect();
    (!entries.is_empty()).then_some(entries)
}

/// Project entries from a model response, validated like experience entries.
pub fn parse_projects(text: &str) -> Option<Vec<ProjectEntry>> {
    let entries: Vec<ProjectEntry> = extract_json_array(text)?
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|map| {
            Some(ProjectEntry {
                name: string_field(map, &["name", "project_name", "title"])?,
                description: string_field(map, &["description", "summary"])?,
                technologies: string_list(map, &["technologies", "tech"]).unwrap_or_default(),
                highlights: string_list(map, &["highlights", "features", "achievements"])
                    .unwrap_or_default(),
                link: string_field(map, &["link", "url"]).filter(|l| l.starts_with("http")),
            })
        })
        .collect();
    (!entries.is_empty()).then_some(entries)
}

/// Plain-text summary: fences and wrapping quotes removed, whitespace
/// collapsed. `None` when nothing usable is left or the model answered with JSON.
pub fn parse_summary(text: &str) -> Option<String> {
    let text = strip_code_fences(text);
    let text = text.trim_matches(|c: char| c == '"' || c.is_whitespace());
    if text.starts_with('{') || text.starts_with('[') {
        return None;
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_object_inside_prose_and_fences() {
        let text = "Sure! Here you go:\n```json\n{\"technical\": [\"Rust\"], \"note\": \"a } brace\"}\n```\nThanks";
        let map = extract_json_object(text).expect("object");
        assert_eq!(map.get("note").and_then(Value::as_str), Some("a } brace"));
    }

    #[test]
    fn skips_unparseable_spans() {
        let text = "Use {braces} like {\"tools\": [\"Docker\"]}";
        let map = extract_json_object(text).expect("object");
        assert!(map.contains_key("tools"));
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let text = r#"[{"name": "a \"quoted\" ] name", "description": "d"}]"#;
        let items = extract_json_array(text).expect("array");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn prose_yields_nothing() {
        assert!(extract_json_object("I think the skills are Rust and Go.").is_none());
        assert!(parse_skills("I think the skills are Rust and Go.").is_none());
        assert!(extract_json_array("no array [here").is_none());
    }

    #[test]
    fn skills_shape_failures_become_absent() {
        let raw = r#"{"technical": ["Rust", 5, " "], "frameworks": "Axum", "tools": ["Docker"]}"#;
        let skills = parse_skills(raw).expect("skills");
        assert_eq!(skills.technical, vec!["Rust"]);
        assert!(skills.frameworks.is_empty());
        assert_eq!(skills.tools, vec!["Docker"]);

        assert!(parse_skills(r#"{"technical": "Rust"}"#).is_none());
    }

    #[test]
    fn experience_entries_require_name_and_description() {
        let text = r#"Here:
        [
          {"project_name": "widget", "description": "Built it", "achievements": ["Shipped v1"], "technologies": ["Rust"]},
          {"project_name": "", "description": "nameless"},
          {"description": "no name"},
          "not an object"
        ]"#;
        let entries = parse_experience(text).expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project_name, "widget");
        assert_eq!(entries[0].achievements, vec!["Shipped v1"]);
        assert!(entries[0].duration.is_empty());

        assert!(parse_experience(r#"[{"description": "no name"}]"#).is_none());
    }

    #[test]
    fn project_links_must_look_like_urls() {
        let text = r#"[{"name": "widget", "description": "d", "link": "null"},
                       {"name": "gadget", "description": "d", "link": "https://github.com/ada/gadget"}]"#;
        let projects = parse_projects(text).expect("projects");
        assert!(projects[0].link.is_none());
        assert_eq!(projects[1].link.as_deref(), Some("https://github.com/ada/gadget"));
    }

    #[test]
    fn summary_is_cleaned() {
        assert_eq!(
            parse_summary("\"Engineer who   builds\n tools.\"").as_deref(),
            Some("Engineer who builds tools.")
        );
        assert!(parse_summary("   ").is_none());
        assert!(parse_summary("{\"summary\": \"x\"}").is_none());
    }
}
