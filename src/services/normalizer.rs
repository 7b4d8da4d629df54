//! Draft → payload normalization
//!
//! Runs after validation. It never fails: incomplete entries are dropped,
//! numeric inputs are coerced, and a feature block is only sent when at
//! least one complete entry survives.

use crate::models::{
    AbTestDraft, AbTestPayload, DEFAULT_GEO_PRIORITY, DEFAULT_VARIANT_WEIGHT, DeviceRulesDraft,
    DeviceRulesPayload, EditMode, GeoRuleDraft, GeoRulePayload, LinkDraft, LinkPayload,
    PixelDraft, PixelPayload, ScheduleDraft, SchedulePayload, VariantPayload,
};
use crate::utils::{is_blank, non_blank};

fn normalize_ab_test(ab_test: &AbTestDraft, mode: &EditMode) -> Option<AbTestPayload> {
    if !ab_test.enabled {
        // Only an edit can have a previously stored test that needs clearing
        return mode.is_editing().then(AbTestPayload::cleared);
    }

    let variants: Vec<VariantPayload> = ab_test
        .complete_variants()
        .map(|v| VariantPayload {
            name: v.name.trim().to_string(),
            url: v.url.trim().to_string(),
            weight: v.weight.coerce(DEFAULT_VARIANT_WEIGHT),
        })
        .collect();

    (variants.len() >= 2).then(|| AbTestPayload {
        enabled: true,
        split_method: Some(ab_test.split_method),
        variants,
        auto_optimize: Some(ab_test.auto_optimize.clone()),
    })
}

fn normalize_countries(countries: &[String]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::with_capacity(countries.len());
    for country in countries {
        let code = country.trim().to_uppercase();
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn normalize_geo_rules(rules: &[GeoRuleDraft]) -> Option<Vec<GeoRulePayload>> {
    let rules: Vec<GeoRulePayload> = rules
        .iter()
        .filter(|rule| rule.is_complete())
        .map(|rule| GeoRulePayload {
            countries: normalize_countries(&rule.countries),
            target_url: rule.target_url.trim().to_string(),
            priority: rule.priority.coerce(DEFAULT_GEO_PRIORITY).clamp(0.0, 100.0),
        })
        .collect();
    (!rules.is_empty()).then_some(rules)
}

fn normalize_device_rules(rules: &DeviceRulesDraft) -> Option<DeviceRulesPayload> {
    rules.has_any_url().then(|| DeviceRulesPayload {
        mobile: rules.mobile.trim().to_string(),
        desktop: rules.desktop.trim().to_string(),
        tablet: rules.tablet.trim().to_string(),
    })
}

fn normalize_schedule(schedule: &ScheduleDraft) -> Option<SchedulePayload> {
    if !schedule.enabled || is_blank(&schedule.start_date) || is_blank(&schedule.end_date) {
        return None;
    }
    Some(SchedulePayload {
        enabled: true,
        start_date: schedule.start_date.trim().to_string(),
        end_date: schedule.end_date.trim().to_string(),
        redirect_after_expiry: non_blank(&schedule.redirect_after_expiry),
    })
}

fn normalize_pixels(pixels: &[PixelDraft]) -> Option<Vec<PixelPayload>> {
    let pixels: Vec<PixelPayload> = pixels
        .iter()
        .filter_map(|pixel| match pixel.platform {
            Some(platform) if !is_blank(&pixel.pixel_id) => Some(PixelPayload {
                platform,
                pixel_id: pixel.pixel_id.trim().to_string(),
                event: pixel.event,
            }),
            _ => None,
        })
        .collect();
    (!pixels.is_empty()).then_some(pixels)
}

fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Build the request body for a validated draft.
///
/// Original URL and alias are only sent on creation. A/B tests are the one
/// block that is cleared explicitly: editing a link with the test switched
/// off sends `{"enabled":false,"variants":[]}`, every other block is simply
/// omitted.
pub fn normalize(draft: &LinkDraft, mode: &EditMode) -> LinkPayload {
    let creating = !mode.is_editing();

    LinkPayload {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        tags: normalize_tags(&draft.tags),
        expires_at: non_blank(&draft.expires_at),
        original_url: non_blank(&draft.original_url).filter(|_| creating),
        custom_alias: non_blank(&draft.custom_alias).filter(|_| creating),
        password: (!is_blank(&draft.password)).then(|| draft.password.clone()),
        ab_test: normalize_ab_test(&draft.ab_test, mode),
        geo_rules: normalize_geo_rules(&draft.geo_rules),
        device_rules: normalize_device_rules(&draft.device_rules),
        schedule: normalize_schedule(&draft.schedule),
        pixels: normalize_pixels(&draft.pixels),
    }
}
