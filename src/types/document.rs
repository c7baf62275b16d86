use serde::{Deserialize, Deserializer, Serialize};

/// Horizontal alignment of a line within the content width.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Parse an editor alignment value. Unknown values (e.g. `justify`) map to left.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Formatting attributes attached to a run, as produced by the editor.
///
/// Every field is optional; the style resolver fills in defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Key into the font registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Key into the size registry, or a numeric size such as `"20px"` / `20`.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A contiguous span of text sharing one set of attributes.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub attributes: StyleAttributes,
}

impl Run {
    pub fn new(text: impl Into<String>, attributes: StyleAttributes) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    /// A run with default attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleAttributes::default())
    }
}

/// One paragraph of the document.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub runs: Vec<Run>,
    #[serde(default)]
    pub align: Align,
}

impl Line {
    pub fn new(runs: Vec<Run>, align: Align) -> Self {
        Self { runs, align }
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        let total_len: usize = self.runs.iter().map(|r| r.text.len()).sum();
        let mut combined = String::with_capacity(total_len);
        for run in &self.runs {
            combined.push_str(&run.text);
        }
        combined
    }
}

/// Ordered lines; always holds at least one line once built through
/// [`Document::new`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub lines: Vec<Line>,
}

impl Document {
    /// Build a document, normalizing to one empty left-aligned line when
    /// `lines` is empty and synthesizing an empty run for run-less lines.
    pub fn new(lines: Vec<Line>) -> Self {
        let mut lines: Vec<Line> = lines
            .into_iter()
            .map(|mut line| {
                if line.runs.is_empty() {
                    line.runs.push(Run::plain(""));
                }
                line
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::new(vec![Run::plain("")], Align::Left));
        }
        Self { lines }
    }

    /// Plain text with lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
