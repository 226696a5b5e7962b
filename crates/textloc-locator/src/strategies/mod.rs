//! Locator strategies.
//!
//! Every strategy scores one candidate element against the target pattern
//! and yields zero or more [`MatchResult`]s. Strategies never fail; "no
//! match" is an empty list.

pub mod attribute;
pub mod html_label;
pub mod inner_image;
pub mod table;
pub mod text;

use std::fmt;

use serde::{Deserialize, Serialize};

use textloc_core::FoundType;
use textloc_document::NodeId;
use textloc_pattern::SearchPattern;

use crate::context::MatchContext;
use crate::result::MatchResult;

pub use table::is_in_table_coordinates;

/// How a value has to relate to the target pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The whole value; coverage is always 0
    Exact,
    /// The value starts with a match; coverage counts the characters after it
    StartsWith,
    /// The value ends with a match; coverage counts the characters before it
    EndsWith,
    /// A match anywhere; coverage counts the characters around it
    Contains,
}

impl MatchKind {
    /// Coverage of `value`, `None` if the pattern does not relate to it in
    /// this way.
    pub fn coverage(&self, pattern: &SearchPattern, value: &str) -> Option<usize> {
        match self {
            MatchKind::Exact => {
                if !pattern.matches(value) {
                    return None;
                }
                pattern.no_of_surrounding_chars_in(value)
            }
            MatchKind::EndsWith => {
                if !pattern.matches_at_end(value) {
                    return None;
                }
                pattern.no_of_chars_before_last_occurence_in(value)
            }
            MatchKind::StartsWith => pattern.no_of_chars_after_last_occurence_in(value),
            MatchKind::Contains => pattern.no_of_surrounding_chars_in(value),
        }
    }
}

/// The closed set of locator strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `id` attribute, whole value
    Id,
    /// `name` attribute, whole value
    Name,
    /// `aria-label` attribute
    AriaLabel,
    /// `label` attribute (options and option groups)
    LabelAttribute,
    /// `placeholder` attribute of empty fields
    Placeholder,
    /// `title` attribute
    Title,
    /// `value` attribute of button inputs
    Value,
    /// `src` attribute of images, matched at the end
    ImgSrc,
    /// `alt` attribute of images
    ImgAlt,
    /// `title` attribute of images
    ImgTitle,
    /// Attributes of images nested in the candidate
    InnerImage,
    /// Rendered text of the candidate
    Text,
    /// Text between the previous control and the candidate
    LabelTextBefore,
    /// Text between the candidate and the next control (checkboxes)
    LabelTextAfter,
    /// Text between the candidate and the next control (radio buttons)
    LabelingTextAfter,
    /// Text before the candidate, with the path as a prefix when the target is empty
    LabelingTextBeforeAsText,
    /// The whole path and target occurring before the candidate
    WholeTextBefore,
    /// A `label` element pointing at or wrapping the target
    HtmlLabel,
    /// Table coordinates without a target segment
    TableCoordinates,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Strategy; 19] = [
        Strategy::Id,
        Strategy::Name,
        Strategy::AriaLabel,
        Strategy::LabelAttribute,
        Strategy::Placeholder,
        Strategy::Title,
        Strategy::Value,
        Strategy::ImgSrc,
        Strategy::ImgAlt,
        Strategy::ImgTitle,
        Strategy::InnerImage,
        Strategy::Text,
        Strategy::LabelTextBefore,
        Strategy::LabelTextAfter,
        Strategy::LabelingTextAfter,
        Strategy::LabelingTextBeforeAsText,
        Strategy::WholeTextBefore,
        Strategy::HtmlLabel,
        Strategy::TableCoordinates,
    ];

    /// Strategy name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::AriaLabel => "aria_label",
            Strategy::LabelAttribute => "label_attribute",
            Strategy::Placeholder => "placeholder",
            Strategy::Title => "title",
            Strategy::Value => "value",
            Strategy::ImgSrc => "img_src",
            Strategy::ImgAlt => "img_alt",
            Strategy::ImgTitle => "img_title",
            Strategy::InnerImage => "inner_image",
            Strategy::Text => "text",
            Strategy::LabelTextBefore => "label_text_before",
            Strategy::LabelTextAfter => "label_text_after",
            Strategy::LabelingTextAfter => "labeling_text_after",
            Strategy::LabelingTextBeforeAsText => "labeling_text_before_as_text",
            Strategy::WholeTextBefore => "whole_text_before",
            Strategy::HtmlLabel => "html_label",
            Strategy::TableCoordinates => "table_coordinates",
        }
    }

    /// Found types this strategy can report.
    pub fn found_types(&self) -> &'static [FoundType] {
        match self {
            Strategy::Id => &[FoundType::ById],
            Strategy::Name => &[FoundType::ByName],
            Strategy::AriaLabel => &[FoundType::ByAriaLabelAttribute],
            Strategy::LabelAttribute
            | Strategy::Text
            | Strategy::LabelTextBefore
            | Strategy::LabelTextAfter => &[FoundType::ByLabelText],
            Strategy::Placeholder => &[FoundType::ByPlaceholder],
            Strategy::Title => &[FoundType::ByTitleAttribute],
            Strategy::Value | Strategy::LabelingTextAfter => &[FoundType::ByLabelingText],
            Strategy::ImgSrc => &[FoundType::ByImgSrcAttribute],
            Strategy::ImgAlt => &[FoundType::ByImgAltAttribute],
            Strategy::ImgTitle => &[FoundType::ByImgTitleAttribute],
            Strategy::InnerImage => &[
                FoundType::ByInnerImgAltAttribute,
                FoundType::ByInnerImgTitleAttribute,
                FoundType::ByInnerImgSrcAttribute,
                FoundType::ByInnerName,
            ],
            Strategy::LabelingTextBeforeAsText | Strategy::WholeTextBefore => &[FoundType::ByText],
            Strategy::HtmlLabel => &[FoundType::ByLabel],
            Strategy::TableCoordinates => &[FoundType::ByTableCoordinate],
        }
    }

    /// Attribute name, match kind and found type of the plain attribute
    /// strategies.
    fn attribute_rule(&self) -> Option<(&'static str, MatchKind, FoundType)> {
        let rule = match self {
            Strategy::Id => ("id", MatchKind::Exact, FoundType::ById),
            Strategy::Name => ("name", MatchKind::Exact, FoundType::ByName),
            Strategy::AriaLabel => (
                "aria-label",
                MatchKind::Contains,
                FoundType::ByAriaLabelAttribute,
            ),
            Strategy::LabelAttribute => ("label", MatchKind::Contains, FoundType::ByLabelText),
            Strategy::Title => ("title", MatchKind::Contains, FoundType::ByTitleAttribute),
            Strategy::Value => ("value", MatchKind::Contains, FoundType::ByLabelingText),
            Strategy::ImgSrc => ("src", MatchKind::EndsWith, FoundType::ByImgSrcAttribute),
            Strategy::ImgAlt => ("alt", MatchKind::Contains, FoundType::ByImgAltAttribute),
            Strategy::ImgTitle => ("title", MatchKind::Contains, FoundType::ByImgTitleAttribute),
            _ => return None,
        };
        Some(rule)
    }

    /// Score one candidate.
    pub fn evaluate(&self, context: &MatchContext<'_>, candidate: NodeId) -> Vec<MatchResult> {
        if *self == Strategy::TableCoordinates {
            return table::by_table_coordinates(context, candidate)
                .into_iter()
                .collect();
        }

        let Some(pattern) = context.search_pattern.as_deref() else {
            return Vec::new();
        };

        if let Some((name, match_kind, found_type)) = self.attribute_rule() {
            return attribute::by_attribute(context, pattern, candidate, name, match_kind, found_type)
                .into_iter()
                .collect();
        }

        let result = match self {
            Strategy::Placeholder => attribute::by_placeholder(context, pattern, candidate),
            Strategy::Text => text::by_text(context, pattern, candidate),
            Strategy::LabelTextBefore => text::by_label_text_before(context, pattern, candidate),
            Strategy::LabelTextAfter => {
                text::by_text_after(context, pattern, candidate, FoundType::ByLabelText)
            }
            Strategy::LabelingTextAfter => {
                text::by_text_after(context, pattern, candidate, FoundType::ByLabelingText)
            }
            Strategy::LabelingTextBeforeAsText => {
                text::by_labeling_text_before_as_text(context, pattern, candidate)
            }
            Strategy::WholeTextBefore => text::by_whole_text_before(context, pattern, candidate),
            Strategy::InnerImage => return inner_image::by_inner_image(context, pattern, candidate),
            Strategy::HtmlLabel => return html_label::by_html_label(context, pattern, candidate),
            _ => None,
        };
        result.into_iter().collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared scoring flow of all value-based strategies.
///
/// `element` provides position and text-before; `value` is the text the
/// pattern is matched against. `distance_text` may shorten the text before
/// the element prior to measuring the distance.
pub(crate) fn score_value(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    element: NodeId,
    value: Option<&str>,
    match_kind: MatchKind,
    found_type: FoundType,
    distance_text: impl FnOnce(String) -> String,
) -> Option<MatchResult> {
    if context.anchor.is_not_found() || pattern.min_length() == 0 {
        return None;
    }

    let spot = context.index.position(element)?;
    if !context.anchor.precedes(spot.start) {
        return None;
    }

    let value = value.filter(|value| !value.is_empty())?;
    let coverage = match_kind.coverage(pattern, value)?;

    let text_before = distance_text(context.index.text_before(element)?);
    let distance = context.distance(&text_before);
    Some(MatchResult::new(element, found_type, coverage, distance, spot.start))
}

/// Cut `text` before the last shortest occurrence of `pattern`; unchanged
/// if the pattern does not occur.
pub(crate) fn cut_before_last_shortest(pattern: &SearchPattern, text: String) -> String {
    match pattern.no_of_chars_before_last_shortest_occurence_in(&text) {
        Some(before) => text.chars().take(before).collect(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_kind_coverage() {
        let pattern = SearchPattern::compile("picture.png");
        assert_eq!(MatchKind::EndsWith.coverage(&pattern, "web/picture.png"), Some(4));
        assert_eq!(MatchKind::Exact.coverage(&pattern, "web/picture.png"), None);
        assert_eq!(MatchKind::Exact.coverage(&pattern, "picture.png"), Some(0));
        assert_eq!(MatchKind::Contains.coverage(&pattern, "web/picture.png"), Some(4));

        let partial = SearchPattern::compile("icture.pn");
        assert_eq!(MatchKind::EndsWith.coverage(&partial, "web/picture.png"), None);
        assert_eq!(MatchKind::Contains.coverage(&partial, "web/picture.png"), Some(6));

        let prefix = SearchPattern::compile("Mark");
        assert_eq!(MatchKind::StartsWith.coverage(&prefix, "Marker"), Some(2));
    }

    #[test]
    fn test_cut_before_last_shortest() {
        let pattern = SearchPattern::compile("Marker");
        assert_eq!(
            cut_before_last_shortest(&pattern, "Some text .... Marker".to_string()),
            "Some text .... "
        );
        assert_eq!(
            cut_before_last_shortest(&pattern, "nothing".to_string()),
            "nothing"
        );
    }

    #[test]
    fn test_every_strategy_reports_found_types() {
        for strategy in Strategy::ALL {
            assert!(!strategy.found_types().is_empty(), "{strategy}");
        }
    }
}
