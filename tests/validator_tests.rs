//! Validator integration tests
//!
//! Covers the reference scenarios and the required-URL fallback, A/B
//! completeness and geo all-or-nothing rules over small exhaustive grids.

use linkcraft::models::{
    EditMode, FormNumber, GeoRuleDraft, LinkDraft, SplitMethod, VariantDraft,
};
use linkcraft::services::{FieldGroup, ValidationErrors, messages, validate};
use strum::IntoEnumIterator;

fn create(draft: &LinkDraft) -> ValidationErrors {
    validate(draft, &EditMode::Create)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_blank_draft_requires_original_url() {
    let errors = create(&LinkDraft::new());

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(FieldGroup::OriginalUrl),
        Some("Original URL is required (or configure targeting rules)")
    );
}

#[test]
fn test_geo_rule_satisfies_original_url_fallback() {
    let mut draft = LinkDraft::new();
    draft.geo_rules = vec![GeoRuleDraft::new(["US"], "https://us.example.com")];

    assert!(create(&draft).is_empty());
}

#[test]
fn test_incomplete_variant() {
    let mut draft = LinkDraft::new();
    draft.ab_test.enabled = true;
    draft.ab_test.split_method = SplitMethod::Weighted;
    draft.ab_test.variants = vec![
        VariantDraft::new("A", "https://a.com", 50.0),
        VariantDraft::new("", "", 50.0),
    ];

    let errors = create(&draft);
    assert_eq!(
        errors.get(FieldGroup::AbTest),
        Some("All variants must have a name and URL")
    );
    assert!(!errors.contains(FieldGroup::GeoRules));
}

#[test]
fn test_geo_rule_without_target_url() {
    let mut draft = LinkDraft::with_original_url("https://example.com");
    draft.geo_rules = vec![GeoRuleDraft::new(["FR"], "")];

    let errors = create(&draft);
    assert_eq!(errors.len(), 1);
    assert!(
        errors
            .get(FieldGroup::GeoRules)
            .unwrap()
            .starts_with("Each geo rule must have BOTH countries AND target URL")
    );
}

#[test]
fn test_schedule_end_before_start() {
    let mut draft = LinkDraft::with_original_url("https://example.com");
    draft.schedule.enabled = true;
    draft.schedule.start_date = "2025-01-10T00:00".into();
    draft.schedule.end_date = "2025-01-01T00:00".into();

    let errors = create(&draft);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(FieldGroup::Schedule),
        Some("End date must be after start date")
    );
}

#[test]
fn test_field_group_names_match_wire_keys() {
    for group in FieldGroup::iter() {
        let key = serde_json::to_value(group).unwrap();
        assert_eq!(key, serde_json::Value::String(group.to_string()));
    }
    assert_eq!(FieldGroup::iter().count(), 7);
}

#[test]
fn test_errors_serialize_keyed_by_group() {
    let errors = create(&LinkDraft::new());
    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"originalUrl": messages::ORIGINAL_URL_REQUIRED})
    );
}

// =============================================================================
// Required-URL fallback
// =============================================================================

#[test]
fn test_original_url_fallback_grid() {
    let urls = ["", "https://example.com", "http://example.com/path?q=1"];
    for url in urls {
        for complete_ab in [false, true] {
            for complete_geo in [false, true] {
                for device_url in ["", "https://m.example.com"] {
                    let mut draft = LinkDraft::with_original_url(url);
                    if complete_ab {
                        draft.ab_test.enabled = true;
                        draft.ab_test.variants = vec![
                            VariantDraft::new("A", "https://a.com", 50.0),
                            VariantDraft::new("B", "https://b.com", 50.0),
                        ];
                    }
                    if complete_geo {
                        draft.geo_rules = vec![GeoRuleDraft::new(["US"], "https://us.com")];
                    }
                    draft.device_rules.mobile = device_url.into();

                    let has_fallback = complete_ab || complete_geo || !device_url.is_empty();
                    let expect_error = url.is_empty() && !has_fallback;
                    assert_eq!(
                        create(&draft).contains(FieldGroup::OriginalUrl),
                        expect_error,
                        "url={:?} ab={} geo={} device={:?}",
                        url,
                        complete_ab,
                        complete_geo,
                        device_url
                    );
                }
            }
        }
    }
}

#[test]
fn test_invalid_original_url_not_rescued_by_targeting() {
    let mut draft = LinkDraft::with_original_url("example.com");
    draft.device_rules.mobile = "https://m.example.com".into();

    assert_eq!(
        create(&draft).get(FieldGroup::OriginalUrl),
        Some(messages::ORIGINAL_URL_INVALID)
    );
}

#[test]
fn test_edit_mode_never_checks_original_url() {
    let errors = validate(&LinkDraft::new(), &EditMode::edit("promo"));
    assert!(errors.is_empty());
}

// =============================================================================
// A/B completeness
// =============================================================================

#[test]
fn test_ab_test_completeness_grid() {
    let variant_sets: Vec<Vec<(&str, &str, &str)>> = vec![
        vec![],
        vec![("A", "https://a.com", "50")],
        vec![("A", "https://a.com", "50"), ("B", "https://b.com", "50")],
        vec![("A", "https://a.com", "0"), ("B", "https://b.com", "0")],
        vec![("A", "https://a.com", ""), ("B", "https://b.com", "abc")],
        vec![("A", "https://a.com", "50"), ("", "https://b.com", "50")],
        vec![("A", "https://a.com", "50"), ("B", " ", "50")],
        vec![
            ("A", "https://a.com", "0"),
            ("B", "https://b.com", "0"),
            ("C", "https://c.com", "10"),
        ],
    ];

    for method in [SplitMethod::Weighted, SplitMethod::Random, SplitMethod::Optimized] {
        for set in &variant_sets {
            let mut draft = LinkDraft::with_original_url("https://example.com");
            draft.ab_test.enabled = true;
            draft.ab_test.split_method = method;
            draft.ab_test.variants = set
                .iter()
                .map(|(name, url, weight)| VariantDraft {
                    name: name.to_string(),
                    url: url.to_string(),
                    weight: FormNumber::from(*weight),
                })
                .collect();

            let too_few = set.len() < 2;
            let blank = set
                .iter()
                .any(|(n, u, _)| n.trim().is_empty() || u.trim().is_empty());
            let zero_total = method == SplitMethod::Weighted
                && draft.ab_test.total_weight() == 0.0;
            let expected = too_few || blank || zero_total;

            assert_eq!(
                create(&draft).contains(FieldGroup::AbTest),
                expected,
                "method={:?} variants={:?}",
                method,
                set
            );
        }
    }
}

#[test]
fn test_disabled_ab_test_is_not_checked() {
    let mut draft = LinkDraft::with_original_url("https://example.com");
    draft.ab_test.variants = vec![VariantDraft::new("", "", 0.0)];
    assert!(create(&draft).is_empty());
}

// =============================================================================
// Geo all-or-nothing
// =============================================================================

#[test]
fn test_geo_all_or_nothing_grid() {
    let countries: [Vec<&str>; 2] = [vec![], vec!["DE", "AT"]];
    let targets = ["", "https://dach.example.com"];
    let priorities = ["", "10"];

    for c in &countries {
        for target in targets {
            for priority in priorities {
                let rule = GeoRuleDraft {
                    countries: c.iter().map(|s| s.to_string()).collect(),
                    target_url: target.into(),
                    priority: FormNumber::from(priority),
                };
                let touched = !rule.is_empty();
                let complete = !c.is_empty() && !target.is_empty();

                let mut draft = LinkDraft::with_original_url("https://example.com");
                draft.geo_rules = vec![rule];
                let errors = create(&draft);

                if touched {
                    assert_eq!(
                        errors.contains(FieldGroup::GeoRules),
                        !complete,
                        "countries={:?} target={:?} priority={:?}",
                        c,
                        target,
                        priority
                    );
                } else {
                    assert!(errors.is_empty());
                }
            }
        }
    }
}
