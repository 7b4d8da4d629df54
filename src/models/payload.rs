//! Wire payload for `POST /api/links` and `PUT /api/links/{shortCode}`
//!
//! Every optional block is either absent or fully specified. Absent blocks
//! are left out of the JSON entirely.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};
use ts_rs::TS;

use super::serde_helpers::{null_as_default, skip_invalid};

/// How traffic is split between A/B variants
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SplitMethod {
    #[default]
    Weighted,
    Random,
    Optimized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase", default)]
pub struct AutoOptimize {
    pub enabled: bool,
    pub min_sample_size: u32,
    pub confidence_level: f64,
}

impl Default for AutoOptimize {
    fn default() -> Self {
        Self {
            enabled: false,
            min_sample_size: 100,
            confidence_level: 95.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PixelPlatform {
    Facebook,
    Google,
    Tiktok,
    Linkedin,
    Twitter,
    Pinterest,
    Snapchat,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, EnumIter, AsRefStr,
)]
#[ts(export, export_to = "link-payload.generated.ts")]
pub enum PixelEvent {
    #[default]
    PageView,
    ViewContent,
    Lead,
    Purchase,
    AddToCart,
    CompleteRegistration,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(default)]
pub struct VariantPayload {
    pub name: String,
    pub url: String,
    pub weight: f64,
}

/// A/B block.
///
/// `split_method` and `auto_optimize` are absent only in the explicit clear
/// block (`{"enabled":false,"variants":[]}`) sent when editing a link whose
/// test was switched off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct AbTestPayload {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_method: Option<SplitMethod>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub variants: Vec<VariantPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_optimize: Option<AutoOptimize>,
}

impl AbTestPayload {
    pub fn cleared() -> Self {
        Self {
            enabled: false,
            split_method: None,
            variants: Vec::new(),
            auto_optimize: None,
        }
    }

    pub fn is_clear_signal(&self) -> bool {
        !self.enabled && self.variants.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase", default)]
pub struct GeoRulePayload {
    pub countries: Vec<String>,
    pub target_url: String,
    pub priority: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(default)]
pub struct DeviceRulesPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub mobile: String,
    #[serde(deserialize_with = "null_as_default")]
    pub desktop: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tablet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulePayload {
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_after_expiry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct PixelPayload {
    pub platform: PixelPlatform,
    #[serde(default)]
    pub pixel_id: String,
    #[serde(default)]
    pub event: PixelEvent,
}

/// Body of a create or update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct LinkPayload {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ab_test: Option<AbTestPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_rules: Option<Vec<GeoRulePayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_rules: Option<DeviceRulesPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<SchedulePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<PixelPayload>>,
}
