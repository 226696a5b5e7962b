//! Element classification by tag name and input type.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The `type` of an `input` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Single-line text, also used for unknown types
    Text,
    /// Masked text
    Password,
    /// Never rendered
    Hidden,
    /// File chooser, never rendered as text
    File,
    /// Submit button
    Submit,
    /// Reset button
    Reset,
    /// Plain button
    Button,
    /// Checkbox
    Checkbox,
    /// Radio button
    Radio,
    /// Image button
    Image,
}

impl InputType {
    /// Classify a `type` attribute value.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("password") => InputType::Password,
            Some("hidden") => InputType::Hidden,
            Some("file") => InputType::File,
            Some("submit") => InputType::Submit,
            Some("reset") => InputType::Reset,
            Some("button") => InputType::Button,
            Some("checkbox") => InputType::Checkbox,
            Some("radio") => InputType::Radio,
            Some("image") => InputType::Image,
            _ => InputType::Text,
        }
    }
}

/// What an element is, as far as text flattening and locating care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// The document body
    Body,
    /// `a`
    Anchor,
    /// `button`
    Button,
    /// `input` of the given type
    Input(InputType),
    /// `select`
    Select,
    /// `option`
    Option,
    /// `optgroup`
    OptionGroup,
    /// `textarea`
    TextArea,
    /// `img`
    Image,
    /// `label`
    Label,
    /// `form`
    Form,
    /// `table`
    Table,
    /// `tr`
    TableRow,
    /// `td` or `th`
    TableCell,
    /// `ol`
    OrderedList,
    /// `li`
    ListItem,
    /// `br`
    Break,
    /// `legend`
    Legend,
    /// Content that never renders: `head`, `title`, `script`, `style`, `applet`
    NonRendered,
    /// Block-level container: `div`, `p`, `ul`, `h1`..`h6`
    Block,
    /// Anything else
    Inline,
}

impl ElementKind {
    /// Classify an element by tag and optional `type` attribute.
    pub fn classify(tag: &str, type_attribute: Option<&str>) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "body" => ElementKind::Body,
            "a" => ElementKind::Anchor,
            "button" => ElementKind::Button,
            "input" => ElementKind::Input(InputType::from_attribute(type_attribute)),
            "select" => ElementKind::Select,
            "option" => ElementKind::Option,
            "optgroup" => ElementKind::OptionGroup,
            "textarea" => ElementKind::TextArea,
            "img" => ElementKind::Image,
            "label" => ElementKind::Label,
            "form" => ElementKind::Form,
            "table" => ElementKind::Table,
            "tr" => ElementKind::TableRow,
            "td" | "th" => ElementKind::TableCell,
            "ol" => ElementKind::OrderedList,
            "li" => ElementKind::ListItem,
            "br" => ElementKind::Break,
            "legend" => ElementKind::Legend,
            "head" | "title" | "script" | "style" | "applet" => ElementKind::NonRendered,
            "div" | "p" | "ul" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => ElementKind::Block,
            _ => ElementKind::Inline,
        }
    }

    /// Whether the element is surrounded by separating spaces in the text.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            ElementKind::Block
                | ElementKind::Table
                | ElementKind::TableRow
                | ElementKind::TableCell
                | ElementKind::ListItem
        )
    }

    /// A visible form control that would be submitted with its form.
    pub fn is_submittable(&self) -> bool {
        match self {
            ElementKind::Input(InputType::Hidden) => false,
            ElementKind::Input(_)
            | ElementKind::Select
            | ElementKind::TextArea
            | ElementKind::Button => true,
            _ => false,
        }
    }

    /// Whether the element contributes no text at all.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ElementKind::NonRendered
                | ElementKind::Input(InputType::Hidden)
                | ElementKind::Input(InputType::File)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_inputs() {
        assert_eq!(
            ElementKind::classify("INPUT", Some("Checkbox")),
            ElementKind::Input(InputType::Checkbox)
        );
        assert_eq!(
            ElementKind::classify("input", None),
            ElementKind::Input(InputType::Text)
        );
        assert_eq!(
            ElementKind::classify("input", Some("tel")),
            ElementKind::Input(InputType::Text)
        );
    }

    #[test]
    fn test_classify_tags() {
        assert_eq!(ElementKind::classify("th", None), ElementKind::TableCell);
        assert_eq!(ElementKind::classify("h3", None), ElementKind::Block);
        assert_eq!(ElementKind::classify("span", None), ElementKind::Inline);
        assert_eq!(ElementKind::classify("script", None), ElementKind::NonRendered);
    }

    #[test]
    fn test_submittable() {
        assert!(ElementKind::Button.is_submittable());
        assert!(ElementKind::Input(InputType::Radio).is_submittable());
        assert!(!ElementKind::Input(InputType::Hidden).is_submittable());
        assert!(!ElementKind::Anchor.is_submittable());
    }

    #[test]
    fn test_block_and_silent() {
        assert!(ElementKind::TableCell.is_block());
        assert!(!ElementKind::Anchor.is_block());
        assert!(ElementKind::Input(InputType::File).is_silent());
        assert!(!ElementKind::Input(InputType::Text).is_silent());
    }
}
