//! Property-based tests for the locate pipeline.
//!
//! Random expressions are evaluated against a fixed form so that parsing,
//! anchoring and scoring are all exercised.

use proptest::prelude::*;

use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder as E, TextIndex};
use textloc_locator::{ControlKind, Locator, PathExpression};

fn form() -> DocumentIndex {
    let document = DocumentBuilder::new()
        .child(E::new("p").text("Some text .... "))
        .child(E::new("form").children([
            E::text_node("Username"),
            E::new("input").id("user").attr("name", "username"),
            E::new("p").text("Marker"),
            E::new("input")
                .id("pass")
                .attr("type", "password")
                .attr("title", "Secret"),
            E::new("table").children([
                E::new("tr").children([E::new("th").text("Name"), E::new("th").text("City")]),
                E::new("tr").children([
                    E::new("td").child(E::new("input").id("name_1")),
                    E::new("td").child(E::new("input").id("city_1")),
                ]),
            ]),
            E::new("input")
                .attr("type", "checkbox")
                .id("remember"),
            E::text_node("Remember me"),
            E::new("button").id("go").text("Log in"),
        ]))
        .build();
    DocumentIndex::new(&document)
}

/// Expressions built from words of the form, wildcards and separators.
fn expression() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("Some".to_string()),
        Just("text".to_string()),
        Just("Username".to_string()),
        Just("Marker".to_string()),
        Just("Name".to_string()),
        Just("City".to_string()),
        Just("Remember".to_string()),
        Just("Log in".to_string()),
        "[a-zA-Z*? ]{0,6}",
    ]
    .boxed();
    let part = prop_oneof![
        word.clone(),
        (word.clone(), word.clone()).prop_map(|(column, row)| format!("[{column}; {row}]")),
        word.prop_map(|column| format!("[{column}]")),
    ];
    prop::collection::vec(part, 0..4).prop_map(|parts| parts.join(" > "))
}

fn kind() -> impl Strategy<Value = ControlKind> {
    prop_oneof![
        Just(ControlKind::Any),
        Just(ControlKind::TextInput),
        Just(ControlKind::Password),
        Just(ControlKind::Checkbox),
        Just(ControlKind::Button),
    ]
}

proptest! {
    /// Locating never panics; invalid expressions are reported as errors.
    #[test]
    fn locate_never_panics(source in expression(), kind in kind()) {
        let index = form();
        let locator = Locator::default();
        let parsed = PathExpression::parse(&source);
        match locator.locate(&index, &source, kind) {
            Ok(_) => prop_assert!(parsed.validate().is_ok()),
            Err(_) => prop_assert!(parsed.validate().is_err()),
        }
    }

    /// Distances never exceed the start, and starts lie inside the text.
    #[test]
    fn scores_are_bounded(source in expression(), kind in kind()) {
        let index = form();
        let length = index.text().chars().count();
        let Ok(matches) = Locator::default().locate(&index, &source, kind) else {
            return Ok(());
        };
        for entry in matches.entries() {
            prop_assert!(entry.distance <= entry.start, "{}", entry);
            prop_assert!(entry.start <= length, "{}", entry);
        }
    }

    /// Every match is an element the request accepts.
    #[test]
    fn matches_have_requested_kind(source in expression(), kind in kind()) {
        let index = form();
        let Ok(matches) = Locator::default().locate(&index, &source, kind) else {
            return Ok(());
        };
        for entry in matches.entries() {
            let element_kind = index.kind(entry.element);
            prop_assert!(element_kind.is_some_and(|k| kind.accepts(k)), "{}", entry);
        }
    }

    /// Deduplicated rankings hold each element at most once and keep the
    /// best entry first.
    #[test]
    fn ranking_is_deduplicated(source in expression()) {
        let index = form();
        let Ok(matches) = Locator::default().locate(&index, &source, ControlKind::Any) else {
            return Ok(());
        };
        let sorted = matches.entries_sorted();
        let mut elements: Vec<_> = sorted.iter().map(|entry| entry.element).collect();
        elements.sort();
        elements.dedup();
        prop_assert_eq!(elements.len(), sorted.len());

        let best = matches.best();
        if let Some(first) = sorted.first() {
            prop_assert_eq!(&best[0], first);
        } else {
            prop_assert!(best.is_empty());
        }
    }
}
