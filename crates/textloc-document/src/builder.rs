//! Fluent construction of documents, mainly for tests and benches.
//!
//! ```
//! use textloc_document::{DocumentBuilder, ElementBuilder};
//!
//! let document = DocumentBuilder::new()
//!     .text("Username")
//!     .child(ElementBuilder::new("input").id("user").attr("type", "text"))
//!     .build();
//! assert_eq!(document.body.len(), 2);
//! ```

use crate::document::{Document, Node};

/// Builder for one node of the tree.
///
/// Usually an element; [`ElementBuilder::text_node`] creates a bare text
/// node so text and elements can be mixed in
/// [`ElementBuilder::children`]. Element-only methods leave text nodes
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBuilder {
    node: Node,
}

impl ElementBuilder {
    /// Start an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Node::element(tag),
        }
    }

    /// A bare text node.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            node: Node::text(text),
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element { attributes, .. } = &mut self.node {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Mark the element as not displayed.
    pub fn hidden(mut self) -> Self {
        if let Node::Element { hidden, .. } = &mut self.node {
            *hidden = true;
        }
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ElementBuilder::text_node(text))
    }

    /// Append a child.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        if let Node::Element { children, .. } = &mut self.node {
            children.push(child.build());
        }
        self
    }

    /// Append several children.
    pub fn children(self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        children.into_iter().fold(self, ElementBuilder::child)
    }

    /// Finish the node.
    pub fn build(self) -> Node {
        self.node
    }
}

impl From<ElementBuilder> for Node {
    fn from(builder: ElementBuilder) -> Self {
        builder.build()
    }
}

/// Builder for a whole [`Document`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Start an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.document.title = Some(title.into());
        self
    }

    /// Append a text node to the body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.document.body.push(Node::text(text));
        self
    }

    /// Append a node to the body.
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.document.body.push(child.build());
        self
    }

    /// Finish the document.
    pub fn build(self) -> Document {
        self.document
    }
}
