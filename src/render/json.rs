//! JSON output: the document itself plus the style it was rendered with.

use serde::Serialize;

use super::{DocumentRenderer, RenderError};
use crate::domain::{OutputFormat, ResumeDocument, Style};

#[derive(Serialize)]
struct JsonResume<'a> {
    style: Style,
    #[serde(flatten)]
    document: &'a ResumeDocument,
}

pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn render(&self, document: &ResumeDocument, style: Style) -> Result<String, RenderError> {
        let mut out = serde_json::to_string_pretty(&JsonResume { style, document })?;
        out.push('\n');
        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::sample_document;
    use serde_json::Value;

    #[test]
    fn document_parses_back() {
        let doc = sample_document();
        let text = JsonRenderer.render(&doc, Style::Developer).expect("render");
        let value: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["style"], "developer");
        assert_eq!(value["personal"]["name"], "Ada Lovelace");
        assert_eq!(value["endorsements"][0]["endorsers"].as_array().map(Vec::len), Some(2));

        let parsed: ResumeDocument = serde_json::from_value(value).expect("document");
        assert_eq!(parsed, doc);
    }
}
