//! Contentful rich text document tree

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of a rich text document.
///
/// Block and inline nodes carry `content`; text nodes carry `value` and `marks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextNode {
    pub node_type: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<RichTextNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Text formatting mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
}

impl RichTextNode {
    pub fn is_text(&self) -> bool {
        self.node_type == "text"
    }

    /// `data.uri` of hyperlink nodes.
    pub fn uri(&self) -> Option<&str> {
        self.data.get("uri").and_then(Value::as_str)
    }

    /// `data.target.sys.id` of embedded and linked nodes.
    pub fn target_id(&self) -> Option<&str> {
        self.data
            .get("target")
            .and_then(|t| t.get("sys"))
            .and_then(|s| s.get("id"))
            .and_then(Value::as_str)
    }
}
