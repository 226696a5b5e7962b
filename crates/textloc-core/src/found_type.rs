//! Names of the strategies that produced a match.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which locator strategy produced a match.
///
/// The names are a stable, externally visible vocabulary: they appear
/// verbatim in reports and serialized results. Each type carries a weight,
/// smaller weights rank first when results of different strategies compete.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoundType {
    /// Found by id match
    ById,
    /// Found by name of an inner element
    ByInnerName,
    /// Found by name match
    ByName,
    /// Found by a label element
    ByLabel,
    /// Found by aria-label attribute match
    ByAriaLabelAttribute,
    /// Found by label text match
    ByLabelText,
    /// Found by labeling text match
    ByLabelingText,
    /// Found by placeholder match
    ByPlaceholder,
    /// Found by title attribute match
    ByTitleAttribute,
    /// Found by inner image source attribute match
    ByInnerImgSrcAttribute,
    /// Found by inner image alt attribute match
    ByInnerImgAltAttribute,
    /// Found by inner image title attribute match
    ByInnerImgTitleAttribute,
    /// Found by image source attribute match
    ByImgSrcAttribute,
    /// Found by image alt attribute match
    ByImgAltAttribute,
    /// Found by image title attribute match
    ByImgTitleAttribute,
    /// Found by table coordinates
    ByTableCoordinate,
    /// Found by text match
    ByText,
}

impl FoundType {
    /// All found types, ordered by weight.
    pub const ALL: [FoundType; 17] = [
        FoundType::ById,
        FoundType::ByInnerName,
        FoundType::ByName,
        FoundType::ByLabel,
        FoundType::ByAriaLabelAttribute,
        FoundType::ByLabelText,
        FoundType::ByLabelingText,
        FoundType::ByPlaceholder,
        FoundType::ByTitleAttribute,
        FoundType::ByInnerImgSrcAttribute,
        FoundType::ByInnerImgAltAttribute,
        FoundType::ByInnerImgTitleAttribute,
        FoundType::ByImgSrcAttribute,
        FoundType::ByImgAltAttribute,
        FoundType::ByImgTitleAttribute,
        FoundType::ByTableCoordinate,
        FoundType::ByText,
    ];

    /// Ranking weight, smaller is more important.
    pub fn weight(&self) -> u32 {
        match self {
            FoundType::ById => 400,
            FoundType::ByInnerName => 900,
            FoundType::ByName => 1000,
            FoundType::ByLabel => 2000,
            FoundType::ByAriaLabelAttribute => 2500,
            FoundType::ByLabelText => 3000,
            FoundType::ByLabelingText => 3200,
            FoundType::ByPlaceholder => 3300,
            FoundType::ByTitleAttribute => 3500,
            FoundType::ByInnerImgSrcAttribute
            | FoundType::ByInnerImgAltAttribute
            | FoundType::ByInnerImgTitleAttribute => 4000,
            FoundType::ByImgSrcAttribute
            | FoundType::ByImgAltAttribute
            | FoundType::ByImgTitleAttribute => 5000,
            FoundType::ByTableCoordinate => 6000,
            FoundType::ByText => 9999,
        }
    }

    /// The stable report name, e.g. `BY_ARIA_LABEL_ATTRIBUTE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FoundType::ById => "BY_ID",
            FoundType::ByInnerName => "BY_INNER_NAME",
            FoundType::ByName => "BY_NAME",
            FoundType::ByLabel => "BY_LABEL",
            FoundType::ByAriaLabelAttribute => "BY_ARIA_LABEL_ATTRIBUTE",
            FoundType::ByLabelText => "BY_LABEL_TEXT",
            FoundType::ByLabelingText => "BY_LABELING_TEXT",
            FoundType::ByPlaceholder => "BY_PLACEHOLDER",
            FoundType::ByTitleAttribute => "BY_TITLE_ATTRIBUTE",
            FoundType::ByInnerImgSrcAttribute => "BY_INNER_IMG_SRC_ATTRIBUTE",
            FoundType::ByInnerImgAltAttribute => "BY_INNER_IMG_ALT_ATTRIBUTE",
            FoundType::ByInnerImgTitleAttribute => "BY_INNER_IMG_TITLE_ATTRIBUTE",
            FoundType::ByImgSrcAttribute => "BY_IMG_SRC_ATTRIBUTE",
            FoundType::ByImgAltAttribute => "BY_IMG_ALT_ATTRIBUTE",
            FoundType::ByImgTitleAttribute => "BY_IMG_TITLE_ATTRIBUTE",
            FoundType::ByTableCoordinate => "BY_TABLE_COORDINATE",
            FoundType::ByText => "BY_TEXT",
        }
    }
}

impl fmt::Display for FoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
