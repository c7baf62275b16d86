//! Document extraction from the editor's delta change log.
//!
//! A delta is an ordered list of `{insert, attributes?}` operations. Text is
//! split on `\n`; the operation carrying a newline supplies the `align`
//! attribute of the line that newline terminates.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{Align, Document, Line, Run, StyleAttributes};

/// A single delta operation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeltaOp {
    /// A string, or an embed object (ignored by the renderer).
    pub insert: Value,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

impl DeltaOp {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Value::String(text.into()),
            attributes: None,
        }
    }

    pub fn styled(text: impl Into<String>, attributes: Value) -> Self {
        Self {
            insert: Value::String(text.into()),
            attributes: match attributes {
                Value::Object(map) => Some(map),
                _ => None,
            },
        }
    }

    fn align(&self) -> Align {
        self.attributes
            .as_ref()
            .and_then(|a| a.get("align"))
            .and_then(Value::as_str)
            .map_or(Align::Left, Align::from_attr)
    }

    fn style_attributes(&self) -> StyleAttributes {
        let Some(map) = self.attributes.as_ref() else {
            return StyleAttributes::default();
        };
        StyleAttributes {
            bold: lenient(map, "bold", Value::as_bool),
            italic: lenient(map, "italic", Value::as_bool),
            underline: lenient(map, "underline", Value::as_bool),
            color: lenient(map, "color", owned_str),
            background: lenient(map, "background", owned_str),
            font: lenient(map, "font", owned_str),
            size: lenient(map, "size", |v| match v {
                Value::Number(n) => Some(n.to_string()),
                other => owned_str(other),
            }),
        }
    }
}

/// Decode one attribute, dropping only that key when it has the wrong type.
/// `null` is the editor's way of clearing a format and is not logged.
fn lenient<T>(
    map: &Map<String, Value>,
    key: &str,
    decode: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = map.get(key)?;
    let decoded = decode(value);
    if decoded.is_none() && !value.is_null() {
        log::debug!("ignoring malformed `{key}` attribute: {value}");
    }
    decoded
}

fn owned_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Either `{"ops": [...]}` or a bare op array.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DeltaPayload {
    Wrapped { ops: Vec<DeltaOp> },
    Bare(Vec<DeltaOp>),
}

impl DeltaPayload {
    pub(crate) fn into_ops(self) -> Vec<DeltaOp> {
        match self {
            Self::Wrapped { ops } | Self::Bare(ops) => ops,
        }
    }
}

/// Parse a delta from JSON. Accepts both `{"ops": [...]}` and a bare array.
pub fn parse_delta(json: &str) -> Result<Vec<DeltaOp>> {
    let payload: DeltaPayload = serde_json::from_str(json)?;
    Ok(payload.into_ops())
}

/// Turn delta operations into a [`Document`].
///
/// Text after the final newline forms a trailing left-aligned line. An empty
/// delta yields one empty line.
pub fn document_from_ops(ops: &[DeltaOp]) -> Document {
    let mut lines = Vec::new();
    let mut pending: Vec<Run> = Vec::new();

    for op in ops {
        let Some(text) = op.insert.as_str() else {
            continue;
        };
        let attrs = op.style_attributes();
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                pending.push(Run::new(segment, attrs.clone()));
            }
            if segments.peek().is_some() {
                lines.push(Line::new(std::mem::take(&mut pending), op.align()));
            }
        }
    }

    if !pending.is_empty() {
        lines.push(Line::new(pending, Align::Left));
    }

    Document::new(lines)
}

/// Parse and extract in one step.
pub fn document_from_json(json: &str) -> Result<Document> {
    Ok(document_from_ops(&parse_delta(json)?))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_delta_normalizes() {
        let doc = document_from_ops(&[]);
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.lines[0].runs, vec![Run::plain("")]);
        assert_eq!(doc.lines[0].align, Align::Left);
    }

    #[test]
    fn test_newline_op_carries_alignment() {
        let ops = vec![
            DeltaOp::styled("Title", json!({"bold": true})),
            DeltaOp::styled("\n", json!({"align": "center"})),
            DeltaOp::text("body\n"),
        ];
        let doc = document_from_ops(&ops);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[0].align, Align::Center);
        assert_eq!(doc.lines[0].runs[0].attributes.bold, Some(true));
        assert_eq!(doc.lines[1].align, Align::Left);
        assert_eq!(doc.lines[1].plain_text(), "body");
    }

    #[test]
    fn test_blank_paragraph_gets_empty_run() {
        let doc = document_from_ops(&[DeltaOp::text("a\n\nb\n")]);
        assert_eq!(doc.lines.len(), 3);
        assert_eq!(doc.lines[1].runs, vec![Run::plain("")]);
        assert_eq!(doc.plain_text(), "a\n\nb");
    }

    #[test]
    fn test_trailing_text_without_newline() {
        let doc = document_from_ops(&[DeltaOp::text("one\ntwo")]);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[1].plain_text(), "two");
    }

    #[test]
    fn test_embeds_are_skipped() {
        let ops = vec![
            DeltaOp {
                insert: json!({"image": "data:..."}),
                attributes: None,
            },
            DeltaOp::text("x\n"),
        ];
        let doc = document_from_ops(&ops);
        assert_eq!(doc.plain_text(), "x");
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped = r#"{"ops":[{"insert":"hi\n","attributes":{"size":"large"}}]}"#;
        let bare = r#"[{"insert":"hi\n"}]"#;
        assert_eq!(parse_delta(wrapped).unwrap().len(), 1);
        assert_eq!(parse_delta(bare).unwrap().len(), 1);
        let doc = document_from_json(wrapped).unwrap();
        assert_eq!(doc.lines[0].runs[0].attributes.size.as_deref(), Some("large"));
    }

    #[test]
    fn test_numeric_size_attribute() {
        let doc = document_from_ops(&[DeltaOp::styled("x\n", json!({"size": 20}))]);
        assert_eq!(doc.lines[0].runs[0].attributes.size.as_deref(), Some("20"));
    }

    #[test]
    fn test_bad_attribute_keeps_its_neighbours() {
        let doc = document_from_ops(&[DeltaOp::styled(
            "x\n",
            json!({"font": false, "bold": true, "size": "large", "color": 7, "italic": null}),
        )]);
        let attrs = &doc.lines[0].runs[0].attributes;
        assert_eq!(attrs.bold, Some(true));
        assert_eq!(attrs.size.as_deref(), Some("large"));
        assert_eq!(attrs.font, None);
        assert_eq!(attrs.color, None);
        assert_eq!(attrs.italic, None);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(parse_delta("{not json").is_err());
    }
}
