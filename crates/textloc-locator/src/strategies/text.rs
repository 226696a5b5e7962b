//! Strategies matching rendered text around or inside the candidate.

use textloc_core::FoundType;
use textloc_document::NodeId;
use textloc_pattern::SearchPattern;

use super::{cut_before_last_shortest, score_value, MatchKind};
use crate::context::MatchContext;
use crate::result::MatchResult;

/// The candidate's own rendered text.
pub fn by_text(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Option<MatchResult> {
    let text = context.index.as_text(candidate);
    score_value(
        context,
        pattern,
        candidate,
        text.as_deref(),
        MatchKind::Contains,
        FoundType::ByLabelText,
        |text| text,
    )
}

/// Text between the previous control (or the anchor) and the candidate.
///
/// The label itself is part of the text before the candidate, so the
/// distance is measured up to where the label starts.
pub fn by_label_text_before(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Option<MatchResult> {
    let start = context.anchor.end().unwrap_or(0);
    let label = context.index.label_text_before(candidate, start);
    score_value(
        context,
        pattern,
        candidate,
        label.as_deref(),
        MatchKind::Contains,
        FoundType::ByLabelText,
        |text| cut_before_last_shortest(pattern, text),
    )
}

/// Text between the candidate and the next control.
pub fn by_text_after(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
    found_type: FoundType,
) -> Option<MatchResult> {
    let label = context.index.label_text_after(candidate);
    score_value(
        context,
        pattern,
        candidate,
        label.as_deref(),
        MatchKind::Contains,
        found_type,
        |text| text,
    )
}

/// Labeling text before the candidate.
///
/// An empty target after a path (`"Marker > "`) means "the control right
/// after the last path segment": the last segment becomes a prefix the
/// labeling text has to start with.
pub fn by_labeling_text_before_as_text(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Option<MatchResult> {
    let prefixed;
    let (pattern, match_kind) = match context.path_nodes.last() {
        Some(last) if pattern.min_length() == 0 => {
            prefixed = SearchPattern::create_from_list(&[last.as_str(), pattern.source()]);
            (&prefixed, MatchKind::StartsWith)
        }
        _ => (pattern, MatchKind::Contains),
    };

    let start = match match_kind {
        MatchKind::StartsWith => 0,
        _ => context.anchor.end().unwrap_or(0),
    };
    let label = context.index.labeling_text_before(candidate, start);
    score_value(
        context,
        pattern,
        candidate,
        label.as_deref(),
        match_kind,
        FoundType::ByText,
        |text| match match_kind {
            MatchKind::StartsWith => text,
            _ => cut_before_last_shortest(pattern, text),
        },
    )
}

/// Path and target, in this order, somewhere in the text before the
/// candidate.
pub fn by_whole_text_before(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Option<MatchResult> {
    if pattern.min_length() == 0 {
        return None;
    }

    let mut segments: Vec<&str> = context.path_nodes.iter().map(String::as_str).collect();
    segments.push(pattern.source());
    let whole = SearchPattern::create_from_list(&segments);

    let text_before = context.index.text_before(candidate);
    score_value(
        context,
        &whole,
        candidate,
        text_before.as_deref(),
        MatchKind::Contains,
        FoundType::ByText,
        |text| text,
    )
}
