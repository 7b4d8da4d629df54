//! Draft reducer
//!
//! Every change to a draft goes through [`reduce`] as a [`DraftAction`], so
//! the sequence of actions fully explains how a draft came to be.

use crate::models::{
    AutoOptimize, Device, FormNumber, GeoRuleDraft, LinkDraft, PixelDraft, PixelEvent,
    PixelPlatform, SplitMethod, VariantDraft,
};

/// Total the weighted split is expected to add up to
pub const WEIGHT_TARGET: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum VariantField {
    Name(String),
    Url(String),
    Weight(FormNumber),
}

/// One user edit, grouped by form section
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetOriginalUrl(String),
    SetCustomAlias(String),
    SetTitle(String),
    SetDescription(String),
    AddTag(String),
    RemoveTag(String),
    SetExpiresAt(String),
    SetPassword(String),

    SetAbTestEnabled(bool),
    SetSplitMethod(SplitMethod),
    AddVariant,
    UpdateVariant { index: usize, field: VariantField },
    RemoveVariant(usize),
    /// Spread the target total evenly over the variants
    RebalanceWeights,
    SetAutoOptimize(AutoOptimize),

    AddGeoRule,
    AddCountry { rule: usize, country: String },
    RemoveCountry { rule: usize, country: String },
    SetGeoTargetUrl { rule: usize, url: String },
    SetGeoPriority { rule: usize, priority: FormNumber },
    RemoveGeoRule(usize),

    SetDeviceUrl { device: Device, url: String },

    SetScheduleEnabled(bool),
    SetScheduleStart(String),
    SetScheduleEnd(String),
    SetRedirectAfterExpiry(String),

    AddPixel,
    SetPixelPlatform { index: usize, platform: Option<PixelPlatform> },
    SetPixelId { index: usize, pixel_id: String },
    SetPixelEvent { index: usize, event: PixelEvent },
    RemovePixel(usize),

    /// Back to an empty draft
    Reset,
}

impl DraftAction {
    /// Actions that only make sense while creating a link
    pub fn is_creation_only(&self) -> bool {
        matches!(
            self,
            DraftAction::SetOriginalUrl(_) | DraftAction::SetCustomAlias(_)
        )
    }
}

/// Split `target` into `count` whole shares, remainder to the first ones
pub fn even_weights(count: usize, target: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let total = target.max(0.0).round() as u64;
    let base = total / count as u64;
    let remainder = (total % count as u64) as usize;
    (0..count)
        .map(|i| (base + u64::from(i < remainder)) as f64)
        .collect()
}

/// Apply one action to a draft. Indices that do not exist are ignored.
pub fn reduce(mut draft: LinkDraft, action: DraftAction) -> LinkDraft {
    match action {
        DraftAction::SetOriginalUrl(url) => draft.original_url = url,
        DraftAction::SetCustomAlias(alias) => draft.custom_alias = alias,
        DraftAction::SetTitle(title) => draft.title = title,
        DraftAction::SetDescription(description) => draft.description = description,
        DraftAction::AddTag(tag) => {
            let tag = tag.trim();
            if !tag.is_empty() && !draft.tags.iter().any(|t| t == tag) {
                draft.tags.push(tag.to_string());
            }
        }
        DraftAction::RemoveTag(tag) => draft.tags.retain(|t| *t != tag),
        DraftAction::SetExpiresAt(expires_at) => draft.expires_at = expires_at,
        DraftAction::SetPassword(password) => draft.password = password,

        DraftAction::SetAbTestEnabled(enabled) => {
            draft.ab_test.enabled = enabled;
            if enabled && draft.ab_test.variants.is_empty() {
                draft.ab_test.variants = vec![VariantDraft::default(), VariantDraft::default()];
            }
        }
        DraftAction::SetSplitMethod(method) => draft.ab_test.split_method = method,
        DraftAction::AddVariant => draft.ab_test.variants.push(VariantDraft::default()),
        DraftAction::UpdateVariant { index, field } => {
            if let Some(variant) = draft.ab_test.variants.get_mut(index) {
                match field {
                    VariantField::Name(name) => variant.name = name,
                    VariantField::Url(url) => variant.url = url,
                    VariantField::Weight(weight) => variant.weight = weight,
                }
            }
        }
        DraftAction::RemoveVariant(index) => {
            if index < draft.ab_test.variants.len() {
                draft.ab_test.variants.remove(index);
            }
        }
        DraftAction::RebalanceWeights => {
            let weights = even_weights(draft.ab_test.variants.len(), WEIGHT_TARGET);
            for (variant, weight) in draft.ab_test.variants.iter_mut().zip(weights) {
                variant.weight = FormNumber::Number(weight);
            }
        }
        DraftAction::SetAutoOptimize(auto_optimize) => draft.ab_test.auto_optimize = auto_optimize,

        DraftAction::AddGeoRule => draft.geo_rules.push(GeoRuleDraft::default()),
        DraftAction::AddCountry { rule, country } => {
            if let Some(rule) = draft.geo_rules.get_mut(rule) {
                let code = country.trim().to_uppercase();
                if !code.is_empty() && !rule.countries.contains(&code) {
                    rule.countries.push(code);
                }
            }
        }
        DraftAction::RemoveCountry { rule, country } => {
            if let Some(rule) = draft.geo_rules.get_mut(rule) {
                let code = country.trim().to_uppercase();
                rule.countries.retain(|c| c.trim().to_uppercase() != code);
            }
        }
        DraftAction::SetGeoTargetUrl { rule, url } => {
            if let Some(rule) = draft.geo_rules.get_mut(rule) {
                rule.target_url = url;
            }
        }
        DraftAction::SetGeoPriority { rule, priority } => {
            if let Some(rule) = draft.geo_rules.get_mut(rule) {
                rule.priority = priority;
            }
        }
        DraftAction::RemoveGeoRule(index) => {
            if index < draft.geo_rules.len() {
                draft.geo_rules.remove(index);
            }
        }

        DraftAction::SetDeviceUrl { device, url } => *draft.device_rules.url_mut(device) = url,

        DraftAction::SetScheduleEnabled(enabled) => draft.schedule.enabled = enabled,
        DraftAction::SetScheduleStart(start) => draft.schedule.start_date = start,
        DraftAction::SetScheduleEnd(end) => draft.schedule.end_date = end,
        DraftAction::SetRedirectAfterExpiry(url) => draft.schedule.redirect_after_expiry = url,

        DraftAction::AddPixel => draft.pixels.push(PixelDraft::default()),
        DraftAction::SetPixelPlatform { index, platform } => {
            if let Some(pixel) = draft.pixels.get_mut(index) {
                pixel.platform = platform;
            }
        }
        DraftAction::SetPixelId { index, pixel_id } => {
            if let Some(pixel) = draft.pixels.get_mut(index) {
                pixel.pixel_id = pixel_id;
            }
        }
        DraftAction::SetPixelEvent { index, event } => {
            if let Some(pixel) = draft.pixels.get_mut(index) {
                pixel.event = event;
            }
        }
        DraftAction::RemovePixel(index) => {
            if index < draft.pixels.len() {
                draft.pixels.remove(index);
            }
        }

        DraftAction::Reset => draft = LinkDraft::default(),
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(actions: impl IntoIterator<Item = DraftAction>) -> LinkDraft {
        actions.into_iter().fold(LinkDraft::new(), reduce)
    }

    #[test]
    fn test_tags_dedup_and_keep_order() {
        let draft = apply_all([
            DraftAction::AddTag("work".into()),
            DraftAction::AddTag(" promo ".into()),
            DraftAction::AddTag("work".into()),
            DraftAction::AddTag("   ".into()),
            DraftAction::AddTag("launch".into()),
        ]);
        assert_eq!(draft.tags, vec!["work", "promo", "launch"]);

        let draft = reduce(draft, DraftAction::RemoveTag("promo".into()));
        assert_eq!(draft.tags, vec!["work", "launch"]);
    }

    #[test]
    fn test_enabling_ab_test_seeds_two_variants() {
        let draft = apply_all([DraftAction::SetAbTestEnabled(true)]);
        assert_eq!(draft.ab_test.variants.len(), 2);

        // Re-enabling keeps what is there
        let draft = apply_all([
            DraftAction::SetAbTestEnabled(true),
            DraftAction::AddVariant,
            DraftAction::SetAbTestEnabled(false),
            DraftAction::SetAbTestEnabled(true),
        ]);
        assert_eq!(draft.ab_test.variants.len(), 3);
    }

    #[test]
    fn test_update_and_remove_variant() {
        let draft = apply_all([
            DraftAction::SetAbTestEnabled(true),
            DraftAction::UpdateVariant {
                index: 0,
                field: VariantField::Name("Control".into()),
            },
            DraftAction::UpdateVariant {
                index: 0,
                field: VariantField::Weight("70".into()),
            },
            DraftAction::UpdateVariant {
                index: 9,
                field: VariantField::Name("ignored".into()),
            },
            DraftAction::RemoveVariant(1),
            DraftAction::RemoveVariant(5),
        ]);
        assert_eq!(draft.ab_test.variants.len(), 1);
        assert_eq!(draft.ab_test.variants[0].name, "Control");
        assert_eq!(draft.ab_test.variants[0].weight, FormNumber::from("70"));
    }

    #[test]
    fn test_even_weights() {
        assert_eq!(even_weights(2, 100.0), vec![50.0, 50.0]);
        assert_eq!(even_weights(3, 100.0), vec![34.0, 33.0, 33.0]);
        assert_eq!(even_weights(0, 100.0), Vec::<f64>::new());
        assert_eq!(even_weights(7, 100.0).iter().sum::<f64>(), 100.0);
    }

    #[test]
    fn test_rebalance_weights() {
        let draft = apply_all([
            DraftAction::SetAbTestEnabled(true),
            DraftAction::AddVariant,
            DraftAction::UpdateVariant {
                index: 0,
                field: VariantField::Weight(FormNumber::Number(90.0)),
            },
            DraftAction::RebalanceWeights,
        ]);
        assert_eq!(draft.ab_test.total_weight(), 100.0);
        assert_eq!(draft.ab_test.variants[0].weight, FormNumber::Number(34.0));
    }

    #[test]
    fn test_countries_uppercased_and_deduped() {
        let draft = apply_all([
            DraftAction::AddGeoRule,
            DraftAction::AddCountry {
                rule: 0,
                country: "us".into(),
            },
            DraftAction::AddCountry {
                rule: 0,
                country: "US".into(),
            },
            DraftAction::AddCountry {
                rule: 0,
                country: "ca".into(),
            },
            DraftAction::AddCountry {
                rule: 3,
                country: "fr".into(),
            },
            DraftAction::RemoveCountry {
                rule: 0,
                country: "Us".into(),
            },
        ]);
        assert_eq!(draft.geo_rules.len(), 1);
        assert_eq!(draft.geo_rules[0].countries, vec!["CA"]);
    }

    #[test]
    fn test_device_and_schedule_actions() {
        let draft = apply_all([
            DraftAction::SetDeviceUrl {
                device: Device::Mobile,
                url: "https://m.example.com".into(),
            },
            DraftAction::SetScheduleEnabled(true),
            DraftAction::SetScheduleStart("2025-01-01T00:00".into()),
            DraftAction::SetScheduleEnd("2025-01-10T00:00".into()),
        ]);
        assert_eq!(draft.device_rules.mobile, "https://m.example.com");
        assert!(draft.schedule.enabled);
        assert_eq!(draft.schedule.end_date, "2025-01-10T00:00");
    }

    #[test]
    fn test_pixel_actions() {
        let draft = apply_all([
            DraftAction::AddPixel,
            DraftAction::SetPixelPlatform {
                index: 0,
                platform: Some(PixelPlatform::Facebook),
            },
            DraftAction::SetPixelId {
                index: 0,
                pixel_id: "123".into(),
            },
            DraftAction::SetPixelEvent {
                index: 0,
                event: PixelEvent::Lead,
            },
            DraftAction::AddPixel,
            DraftAction::RemovePixel(1),
        ]);
        assert_eq!(draft.pixels.len(), 1);
        assert!(draft.pixels[0].is_complete());
        assert_eq!(draft.pixels[0].event, PixelEvent::Lead);
    }

    #[test]
    fn test_reset() {
        let draft = apply_all([DraftAction::SetTitle("x".into()), DraftAction::Reset]);
        assert_eq!(draft, LinkDraft::default());
    }
}
