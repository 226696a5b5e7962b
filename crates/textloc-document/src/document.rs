//! Serializable document tree.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use textloc_core::{Error, Result};

/// A rendered document: an optional title and the nodes of its body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Document title, never part of the flattened text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Top-level nodes of the body
    #[serde(default)]
    pub body: Vec<Node>,
}

impl Document {
    /// Create a document from its body nodes.
    pub fn new(body: Vec<Node>) -> Self {
        Self { title: None, body }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check structural sanity: every element needs a tag name made of
    /// alphanumerics or `-`.
    pub fn validate(&self) -> Result<()> {
        fn check(node: &Node, path: &mut Vec<usize>) -> Result<()> {
            if let Node::Element { tag, children, .. } = node {
                let valid = !tag.is_empty()
                    && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
                if !valid {
                    return Err(Error::InvalidDocument(format!(
                        "Invalid tag name '{}' at body{}",
                        tag,
                        path.iter().map(|i| format!("/{i}")).collect::<String>()
                    )));
                }
                for (i, child) in children.iter().enumerate() {
                    path.push(i);
                    check(child, path)?;
                    path.pop();
                }
            }
            Ok(())
        }

        let mut path = Vec::new();
        for (i, node) in self.body.iter().enumerate() {
            path.push(i);
            check(node, &mut path)?;
            path.pop();
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Element with a tag name, attributes and children
    Element {
        /// Lower-case tag name, e.g. `input`
        tag: String,
        /// Attribute values by name
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        /// Child nodes in document order
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
        /// Not displayed; descendants inherit the flag
        #[serde(default, skip_serializing_if = "is_false")]
        hidden: bool,
    },

    /// Character data
    Text {
        /// Raw text, whitespace is normalized during indexing
        text: String,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Node {
    /// Create an element without attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            hidden: false,
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Tag name for elements, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag.as_str()),
            Node::Text { .. } => None,
        }
    }

    /// Attribute value for elements.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            Node::Text { .. } => None,
        }
    }

    /// Child nodes; empty for text.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "body": [
                {"kind": "text", "text": "Username"},
                {"kind": "element", "tag": "input", "attributes": {"id": "user", "type": "text"}}
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.title, None);
        assert_eq!(doc.body.len(), 2);
        assert_eq!(doc.body[1].tag(), Some("input"));
        assert_eq!(doc.body[1].attribute("id"), Some("user"));
        assert_eq!(doc.body[0].attribute("id"), None);
    }

    #[test]
    fn test_hidden_defaults_to_false() {
        let json = r#"{"body": [{"kind": "element", "tag": "div"}]}"#;
        let doc = Document::from_json(json).unwrap();
        match &doc.body[0] {
            Node::Element { hidden, children, .. } => {
                assert!(!hidden);
                assert!(children.is_empty());
            }
            Node::Text { .. } => panic!("Expected element"),
        }
    }

    #[test]
    fn test_roundtrip_skips_defaults() {
        let doc = Document::new(vec![Node::element("BR"), Node::text("x")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"body":[{"kind":"element","tag":"br"},{"kind":"text","text":"x"}]}"#
        );
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_validate_rejects_bad_tag() {
        let doc = Document::new(vec![Node::Element {
            tag: "div".to_string(),
            attributes: BTreeMap::new(),
            children: vec![Node::text("x"), Node::element("")],
            hidden: false,
        }]);
        let err = doc.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid document: Invalid tag name '' at body/0/1");

        let ok = Document::new(vec![Node::element("my-widget"), Node::text("")]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = Document::from_json("{\"body\": 3}").unwrap_err();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
