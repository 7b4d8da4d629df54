//! Building drafts from existing data

use crate::models::{
    AbTestDraft, AbTestPayload, DeviceRulesDraft, DeviceRulesPayload, FormNumber, GeoRuleDraft,
    GeoRulePayload, Link, LinkDraft, LinkPayload, PixelDraft, PixelPayload, ScheduleDraft,
    SchedulePayload, VariantDraft,
};

fn ab_test_draft(ab_test: Option<&AbTestPayload>) -> AbTestDraft {
    let Some(ab_test) = ab_test else {
        return AbTestDraft::default();
    };
    AbTestDraft {
        enabled: ab_test.enabled,
        split_method: ab_test.split_method.unwrap_or_default(),
        variants: ab_test
            .variants
            .iter()
            .map(|v| VariantDraft {
                name: v.name.clone(),
                url: v.url.clone(),
                weight: FormNumber::Number(v.weight),
            })
            .collect(),
        auto_optimize: ab_test.auto_optimize.clone().unwrap_or_default(),
    }
}

fn geo_rule_drafts(rules: &[GeoRulePayload]) -> Vec<GeoRuleDraft> {
    rules
        .iter()
        .map(|r| GeoRuleDraft {
            countries: r.countries.clone(),
            target_url: r.target_url.clone(),
            priority: FormNumber::Number(r.priority),
        })
        .collect()
}

fn device_rules_draft(rules: Option<&DeviceRulesPayload>) -> DeviceRulesDraft {
    rules
        .map(|r| DeviceRulesDraft {
            mobile: r.mobile.clone(),
            desktop: r.desktop.clone(),
            tablet: r.tablet.clone(),
        })
        .unwrap_or_default()
}

fn schedule_draft(schedule: Option<&SchedulePayload>) -> ScheduleDraft {
    schedule
        .map(|s| ScheduleDraft {
            enabled: s.enabled,
            start_date: s.start_date.clone(),
            end_date: s.end_date.clone(),
            redirect_after_expiry: s.redirect_after_expiry.clone().unwrap_or_default(),
        })
        .unwrap_or_default()
}

fn pixel_drafts(pixels: &[PixelPayload]) -> Vec<PixelDraft> {
    pixels
        .iter()
        .map(|p| PixelDraft {
            platform: Some(p.platform),
            pixel_id: p.pixel_id.clone(),
            event: p.event,
        })
        .collect()
}

impl LinkDraft {
    /// Draft for editing an existing link.
    ///
    /// The password is never sent back by the API in usable form and the
    /// alias cannot change after creation, so both start empty.
    pub fn from_link(link: &Link) -> Self {
        Self {
            original_url: link.original_url.clone(),
            custom_alias: String::new(),
            title: link.title.clone(),
            description: link.description.clone(),
            tags: link.tags.clone(),
            expires_at: link.expires_at.clone().unwrap_or_default(),
            password: String::new(),
            ab_test: ab_test_draft(link.ab_test.as_ref()),
            geo_rules: geo_rule_drafts(&link.geo_rules),
            device_rules: device_rules_draft(link.device_rules.as_ref()),
            schedule: schedule_draft(link.schedule.as_ref()),
            pixels: pixel_drafts(&link.pixels),
        }
    }

    /// Draft that normalizes back into `payload`
    pub fn from_payload(payload: &LinkPayload) -> Self {
        Self {
            original_url: payload.original_url.clone().unwrap_or_default(),
            custom_alias: payload.custom_alias.clone().unwrap_or_default(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            tags: payload.tags.clone(),
            expires_at: payload.expires_at.clone().unwrap_or_default(),
            password: payload.password.clone().unwrap_or_default(),
            ab_test: ab_test_draft(payload.ab_test.as_ref()),
            geo_rules: geo_rule_drafts(payload.geo_rules.as_deref().unwrap_or_default()),
            device_rules: device_rules_draft(payload.device_rules.as_ref()),
            schedule: schedule_draft(payload.schedule.as_ref()),
            pixels: pixel_drafts(payload.pixels.as_deref().unwrap_or_default()),
        }
    }
}
