//! Control kinds a locator can be restricted to, and the strategies that
//! apply to each kind of element.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use textloc_core::Error;
use textloc_document::{ElementKind, InputType};

use crate::strategies::Strategy;

/// The kind of control a caller is looking for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(
    feature = "clap",
    derive(clap::ValueEnum),
    value(rename_all = "snake_case")
)]
pub enum ControlKind {
    /// Any control
    #[default]
    Any,
    /// Single-line text input
    TextInput,
    /// Password input
    Password,
    /// `button` elements and submit/reset/button inputs
    Button,
    /// Checkbox input
    Checkbox,
    /// Radio button input
    Radio,
    /// `select`
    Select,
    /// `option` or `optgroup`
    Option,
    /// `textarea`
    TextArea,
    /// `img`
    Image,
    /// Image input
    ImageInput,
    /// `a`
    Anchor,
}

impl ControlKind {
    /// All kinds, `Any` first.
    pub const ALL: [ControlKind; 12] = [
        ControlKind::Any,
        ControlKind::TextInput,
        ControlKind::Password,
        ControlKind::Button,
        ControlKind::Checkbox,
        ControlKind::Radio,
        ControlKind::Select,
        ControlKind::Option,
        ControlKind::TextArea,
        ControlKind::Image,
        ControlKind::ImageInput,
        ControlKind::Anchor,
    ];

    /// The control kind of an element, `None` for non-controls.
    pub fn of(kind: ElementKind) -> Option<ControlKind> {
        match kind {
            ElementKind::Input(InputType::Text) => Some(ControlKind::TextInput),
            ElementKind::Input(InputType::Password) => Some(ControlKind::Password),
            ElementKind::Input(InputType::Submit | InputType::Reset | InputType::Button)
            | ElementKind::Button => Some(ControlKind::Button),
            ElementKind::Input(InputType::Checkbox) => Some(ControlKind::Checkbox),
            ElementKind::Input(InputType::Radio) => Some(ControlKind::Radio),
            ElementKind::Input(InputType::Image) => Some(ControlKind::ImageInput),
            ElementKind::Input(InputType::Hidden | InputType::File) => None,
            ElementKind::Select => Some(ControlKind::Select),
            ElementKind::Option | ElementKind::OptionGroup => Some(ControlKind::Option),
            ElementKind::TextArea => Some(ControlKind::TextArea),
            ElementKind::Image => Some(ControlKind::Image),
            ElementKind::Anchor => Some(ControlKind::Anchor),
            _ => None,
        }
    }

    /// Whether an element of `kind` is a control of this kind.
    pub fn accepts(&self, kind: ElementKind) -> bool {
        match ControlKind::of(kind) {
            Some(control) => *self == ControlKind::Any || *self == control,
            None => false,
        }
    }

    /// Lower-case name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Any => "any",
            ControlKind::TextInput => "text_input",
            ControlKind::Password => "password",
            ControlKind::Button => "button",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Radio => "radio",
            ControlKind::Select => "select",
            ControlKind::Option => "option",
            ControlKind::TextArea => "text_area",
            ControlKind::Image => "image",
            ControlKind::ImageInput => "image_input",
            ControlKind::Anchor => "anchor",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ControlKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Unknown control kind '{}', expected one of {}",
                    s,
                    ControlKind::ALL.map(|k| k.as_str()).join(", ")
                ))
            })
    }
}

/// Strategies evaluated for a candidate element of the given kind, in
/// evaluation order.
///
/// Table coordinates are not listed: they apply to every kind once an
/// expression has coordinates but no target.
pub fn strategies_for(kind: ElementKind) -> &'static [Strategy] {
    use Strategy::*;

    match kind {
        ElementKind::Input(InputType::Text | InputType::Password) => &[
            LabelingTextBeforeAsText,
            LabelTextBefore,
            Placeholder,
            AriaLabel,
            Title,
            Name,
            Id,
        ],
        ElementKind::TextArea => &[
            LabelingTextBeforeAsText,
            LabelTextBefore,
            Placeholder,
            Name,
            Id,
        ],
        ElementKind::Select => &[WholeTextBefore, LabelTextBefore, Name, Id],
        ElementKind::Input(InputType::Submit | InputType::Reset | InputType::Button) => {
            &[Value, Name, Id]
        }
        ElementKind::Button => &[InnerImage, Text, AriaLabel, Title, Name, Id],
        ElementKind::Input(InputType::Checkbox) => &[
            LabelingTextBeforeAsText,
            LabelTextAfter,
            Title,
            Name,
            Id,
        ],
        ElementKind::Input(InputType::Radio) => &[
            LabelingTextBeforeAsText,
            LabelingTextAfter,
            Title,
            Name,
            Id,
        ],
        ElementKind::Input(InputType::Image) => &[ImgAlt, ImgSrc, ImgTitle, Name, Id],
        ElementKind::Image => &[ImgAlt, ImgSrc, ImgTitle, AriaLabel, Name, Id],
        ElementKind::Anchor => &[InnerImage, Text, Title, AriaLabel, Name, Id],
        ElementKind::Option => &[Text, LabelAttribute, Id],
        ElementKind::OptionGroup => &[LabelAttribute, Id],
        ElementKind::Label => &[HtmlLabel],
        _ => &[],
    }
}
