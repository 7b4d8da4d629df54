//! Draft validation
//!
//! All field groups are checked on every run and each failing group reports
//! one message, so a single pass shows the user everything that blocks
//! submission.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::draft::WEIGHT_TARGET;
use crate::models::{EditMode, LinkDraft, SplitMethod};
use crate::utils::url_validator::is_valid_http_url;
use crate::utils::{TimeParser, is_blank, is_valid_custom_alias};

/// User-facing validation messages
pub mod messages {
    pub const ORIGINAL_URL_REQUIRED: &str =
        "Original URL is required (or configure targeting rules)";
    pub const ORIGINAL_URL_INVALID: &str =
        "Please enter a valid URL (must start with http:// or https://)";
    pub const CUSTOM_ALIAS_INVALID: &str =
        "Custom alias must be 3-50 characters (letters, numbers, hyphens, underscores)";
    pub const AB_TEST_TOO_FEW_VARIANTS: &str = "A/B test requires at least 2 variants";
    pub const AB_TEST_INCOMPLETE_VARIANT: &str = "All variants must have a name and URL";
    pub const AB_TEST_INVALID_URL: &str = "Variant URLs must be valid (http:// or https://)";
    pub const AB_TEST_NEGATIVE_WEIGHT: &str = "Variant weights cannot be negative";
    pub const AB_TEST_ZERO_WEIGHT: &str = "Total weight must be greater than 0";
    pub const GEO_RULE_INCOMPLETE: &str =
        "Each geo rule must have BOTH countries AND target URL (or remove the rule)";
    pub const GEO_RULE_INVALID_URL: &str =
        "Geo rule target URLs must be valid (http:// or https://)";
    pub const DEVICE_RULE_INVALID_URL: &str =
        "Device rule URLs must be valid (http:// or https://)";
    pub const SCHEDULE_DATES_REQUIRED: &str = "Schedule requires both start and end dates";
    pub const SCHEDULE_DATES_INVALID: &str = "Schedule dates must be valid date-times";
    pub const SCHEDULE_END_BEFORE_START: &str = "End date must be after start date";
    pub const SCHEDULE_REDIRECT_INVALID: &str =
        "Redirect-after-expiry URL must be valid (http:// or https://)";
    pub const PIXEL_INCOMPLETE: &str =
        "Each pixel must have both platform and pixel ID (or remove it)";
}

/// Form section an error belongs to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldGroup {
    OriginalUrl,
    CustomAlias,
    AbTest,
    GeoRules,
    DeviceRules,
    Schedule,
    Pixels,
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Field group → message. Empty means the draft can be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldGroup, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a group is kept
    pub fn add(&mut self, group: FieldGroup, message: impl Into<String>) {
        self.0.entry(group).or_insert_with(|| message.into());
    }

    pub fn get(&self, group: FieldGroup) -> Option<&str> {
        self.0.get(&group).map(String::as_str)
    }

    pub fn contains(&self, group: FieldGroup) -> bool {
        self.0.contains_key(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldGroup, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(group, message)| format!("{}: {}", group, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Non-blocking observation about a draft
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Weighted split that does not add up to the target; the server
    /// re-normalizes, the editor offers a rebalance
    WeightsOffTarget { total: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::WeightsOffTarget { total } => write!(
                f,
                "Variant weights add up to {}, not {}; they will be re-normalized",
                total, WEIGHT_TARGET
            ),
        }
    }
}

fn check_original_url(draft: &LinkDraft) -> Option<&'static str> {
    if is_blank(&draft.original_url) {
        (!draft.has_any_targeting()).then_some(messages::ORIGINAL_URL_REQUIRED)
    } else {
        (!is_valid_http_url(&draft.original_url)).then_some(messages::ORIGINAL_URL_INVALID)
    }
}

fn check_custom_alias(draft: &LinkDraft) -> Option<&'static str> {
    let alias = draft.custom_alias.trim();
    (!alias.is_empty() && !is_valid_custom_alias(alias)).then_some(messages::CUSTOM_ALIAS_INVALID)
}

fn check_ab_test(draft: &LinkDraft) -> Option<&'static str> {
    let ab_test = &draft.ab_test;
    if !ab_test.enabled {
        return None;
    }
    if ab_test.variants.len() < 2 {
        return Some(messages::AB_TEST_TOO_FEW_VARIANTS);
    }
    if !ab_test.variants.iter().all(|v| v.is_complete()) {
        return Some(messages::AB_TEST_INCOMPLETE_VARIANT);
    }
    if !ab_test.variants.iter().all(|v| is_valid_http_url(&v.url)) {
        return Some(messages::AB_TEST_INVALID_URL);
    }
    if ab_test.variants.iter().any(|v| v.weight.value_or_zero() < 0.0) {
        return Some(messages::AB_TEST_NEGATIVE_WEIGHT);
    }
    if ab_test.split_method == SplitMethod::Weighted && ab_test.total_weight() <= 0.0 {
        return Some(messages::AB_TEST_ZERO_WEIGHT);
    }
    None
}

fn check_geo_rules(draft: &LinkDraft) -> Option<&'static str> {
    draft
        .geo_rules
        .iter()
        .filter(|rule| !rule.is_empty())
        .find_map(|rule| {
            if !rule.is_complete() {
                Some(messages::GEO_RULE_INCOMPLETE)
            } else if !is_valid_http_url(&rule.target_url) {
                Some(messages::GEO_RULE_INVALID_URL)
            } else {
                None
            }
        })
}

fn check_device_rules(draft: &LinkDraft) -> Option<&'static str> {
    draft
        .device_rules
        .urls()
        .iter()
        .any(|url| !is_blank(url) && !is_valid_http_url(url))
        .then_some(messages::DEVICE_RULE_INVALID_URL)
}

fn check_schedule(draft: &LinkDraft) -> Option<&'static str> {
    let schedule = &draft.schedule;
    if !schedule.enabled {
        return None;
    }
    if is_blank(&schedule.start_date) || is_blank(&schedule.end_date) {
        return Some(messages::SCHEDULE_DATES_REQUIRED);
    }
    let (Ok(start), Ok(end)) = (
        TimeParser::parse_form_datetime(&schedule.start_date),
        TimeParser::parse_form_datetime(&schedule.end_date),
    ) else {
        return Some(messages::SCHEDULE_DATES_INVALID);
    };
    if start >= end {
        return Some(messages::SCHEDULE_END_BEFORE_START);
    }
    let redirect = &schedule.redirect_after_expiry;
    (!is_blank(redirect) && !is_valid_http_url(redirect))
        .then_some(messages::SCHEDULE_REDIRECT_INVALID)
}

fn check_pixels(draft: &LinkDraft) -> Option<&'static str> {
    draft
        .pixels
        .iter()
        .any(|p| !p.is_complete() && !p.is_empty())
        .then_some(messages::PIXEL_INCOMPLETE)
}

/// Validate a draft.
///
/// Original URL and custom alias are only checked when creating; both are
/// fixed once a link exists. A blank original URL is accepted when a
/// complete A/B test, a complete geo rule or any device URL gives visitors
/// somewhere to go.
pub fn validate(draft: &LinkDraft, mode: &EditMode) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut record = |group: FieldGroup, outcome: Option<&'static str>| {
        if let Some(message) = outcome {
            errors.add(group, message);
        }
    };

    if !mode.is_editing() {
        record(FieldGroup::OriginalUrl, check_original_url(draft));
        record(FieldGroup::CustomAlias, check_custom_alias(draft));
    }
    record(FieldGroup::AbTest, check_ab_test(draft));
    record(FieldGroup::GeoRules, check_geo_rules(draft));
    record(FieldGroup::DeviceRules, check_device_rules(draft));
    record(FieldGroup::Schedule, check_schedule(draft));
    record(FieldGroup::Pixels, check_pixels(draft));

    errors
}

/// Advisories that do not block submission
pub fn advisories(draft: &LinkDraft) -> Vec<Advisory> {
    let mut found = Vec::new();
    let ab_test = &draft.ab_test;
    if ab_test.enabled && ab_test.split_method == SplitMethod::Weighted {
        let total = ab_test.total_weight();
        if total > 0.0 && (total - WEIGHT_TARGET).abs() > f64::EPSILON {
            found.push(Advisory::WeightsOffTarget { total });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormNumber, GeoRuleDraft, PixelDraft, PixelPlatform, VariantDraft};

    fn create() -> EditMode {
        EditMode::Create
    }

    fn ab_draft(variants: Vec<VariantDraft>) -> LinkDraft {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.ab_test.enabled = true;
        draft.ab_test.variants = variants;
        draft
    }

    #[test]
    fn test_valid_minimal_draft() {
        let draft = LinkDraft::with_original_url("https://example.com");
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_invalid_original_url() {
        let draft = LinkDraft::with_original_url("ftp://example.com");
        let errors = validate(&draft, &create());
        assert_eq!(
            errors.get(FieldGroup::OriginalUrl),
            Some(messages::ORIGINAL_URL_INVALID)
        );
    }

    #[test]
    fn test_edit_mode_skips_original_url_and_alias() {
        let mut draft = LinkDraft::new();
        draft.custom_alias = "!!".into();
        assert!(validate(&draft, &EditMode::edit("abc")).is_empty());
    }

    #[test]
    fn test_custom_alias() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.custom_alias = "ab".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::CustomAlias),
            Some(messages::CUSTOM_ALIAS_INVALID)
        );
        draft.custom_alias = "summer-sale_25".into();
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_ab_test_message_precedence() {
        let draft = ab_draft(vec![VariantDraft::new("A", "https://a.com", 50.0)]);
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::AbTest),
            Some(messages::AB_TEST_TOO_FEW_VARIANTS)
        );

        let draft = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", 50.0),
            VariantDraft::new("B", "b.com", 50.0),
        ]);
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::AbTest),
            Some(messages::AB_TEST_INVALID_URL)
        );

        let draft = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", 0.0),
            VariantDraft::new("B", "https://b.com", 0.0),
        ]);
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::AbTest),
            Some(messages::AB_TEST_ZERO_WEIGHT)
        );
    }

    #[test]
    fn test_zero_weight_allowed_for_random_split() {
        let mut draft = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", 0.0),
            VariantDraft::new("B", "https://b.com", 0.0),
        ]);
        draft.ab_test.split_method = SplitMethod::Random;
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut draft = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", -10.0),
            VariantDraft::new("B", "https://b.com", 60.0),
        ]);
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::AbTest),
            Some(messages::AB_TEST_NEGATIVE_WEIGHT)
        );

        draft.ab_test.variants[0].weight = FormNumber::from("-5");
        draft.ab_test.split_method = SplitMethod::Random;
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::AbTest),
            Some(messages::AB_TEST_NEGATIVE_WEIGHT)
        );
    }

    #[test]
    fn test_off_target_weights_are_advisory_only() {
        let draft = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", 30.0),
            VariantDraft::new("B", "https://b.com", 30.0),
        ]);
        assert!(validate(&draft, &create()).is_empty());
        assert_eq!(
            advisories(&draft),
            vec![Advisory::WeightsOffTarget { total: 60.0 }]
        );

        let balanced = ab_draft(vec![
            VariantDraft::new("A", "https://a.com", 50.0),
            VariantDraft::new("B", "https://b.com", 50.0),
        ]);
        assert!(advisories(&balanced).is_empty());
    }

    #[test]
    fn test_geo_rule_invalid_url() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.geo_rules = vec![GeoRuleDraft::new(["DE"], "not a url")];
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::GeoRules),
            Some(messages::GEO_RULE_INVALID_URL)
        );
    }

    #[test]
    fn test_empty_geo_rules_and_pixels_are_ignored() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.geo_rules = vec![GeoRuleDraft::default()];
        draft.pixels = vec![PixelDraft::default()];
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_partial_pixel() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.pixels = vec![PixelDraft::new(PixelPlatform::Facebook, "  ")];
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::Pixels),
            Some(messages::PIXEL_INCOMPLETE)
        );
    }

    #[test]
    fn test_device_rule_url() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.device_rules.desktop = "javascript:alert(1)".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::DeviceRules),
            Some(messages::DEVICE_RULE_INVALID_URL)
        );
    }

    #[test]
    fn test_schedule_rules() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.schedule.enabled = true;
        draft.schedule.start_date = "2025-01-01T00:00".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::Schedule),
            Some(messages::SCHEDULE_DATES_REQUIRED)
        );

        draft.schedule.end_date = "soon".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::Schedule),
            Some(messages::SCHEDULE_DATES_INVALID)
        );

        draft.schedule.end_date = "2025-01-01T00:00".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::Schedule),
            Some(messages::SCHEDULE_END_BEFORE_START)
        );

        draft.schedule.end_date = "2025-01-02T00:00".into();
        draft.schedule.redirect_after_expiry = "mailto:x@example.com".into();
        assert_eq!(
            validate(&draft, &create()).get(FieldGroup::Schedule),
            Some(messages::SCHEDULE_REDIRECT_INVALID)
        );

        draft.schedule.redirect_after_expiry = "https://later.example.com".into();
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_disabled_schedule_is_not_checked() {
        let mut draft = LinkDraft::with_original_url("https://example.com");
        draft.schedule.start_date = "garbage".into();
        assert!(validate(&draft, &create()).is_empty());
    }

    #[test]
    fn test_all_groups_reported_in_one_pass() {
        let mut draft = LinkDraft::with_original_url("example.com");
        draft.custom_alias = "x".into();
        draft.ab_test.enabled = true;
        draft.geo_rules = vec![GeoRuleDraft::new(["FR"], "")];
        draft.device_rules.mobile = "m.example.com".into();
        draft.schedule.enabled = true;
        draft.pixels = vec![PixelDraft::new(PixelPlatform::Google, "")];

        let errors = validate(&draft, &create());
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_errors_serialize_by_group_name() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldGroup::GeoRules, "first");
        errors.add(FieldGroup::GeoRules, "second");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({"geoRules": "first"}));
        assert_eq!(errors.to_string(), "geoRules: first");
    }
}
