//! Draft link: the raw, possibly half-filled form state of one editor session

use serde::{Deserialize, Serialize};

use super::payload::{AutoOptimize, PixelEvent, PixelPlatform, SplitMethod};
use super::serde_helpers::blank_as_none;
use crate::utils::number::parse_float_prefix;

/// Weight given to a variant when the input cannot be read as a number
pub const DEFAULT_VARIANT_WEIGHT: f64 = 50.0;
/// Priority given to a geo rule when the input cannot be read as a number
pub const DEFAULT_GEO_PRIORITY: f64 = 0.0;

/// A numeric form input.
///
/// Form fields deliver text while API records deliver numbers, so both are
/// accepted. Coercion mirrors a lenient `parseFloat`: the longest numeric
/// prefix of the text wins, anything else falls back to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl FormNumber {
    pub fn coerce(&self, default: f64) -> f64 {
        match self {
            FormNumber::Number(n) if n.is_finite() => *n,
            FormNumber::Number(_) => default,
            FormNumber::Text(s) => parse_float_prefix(s).unwrap_or(default),
        }
    }

    /// Value used for sums; unreadable input counts as zero
    pub fn value_or_zero(&self) -> f64 {
        self.coerce(0.0)
    }
}

impl Default for FormNumber {
    fn default() -> Self {
        FormNumber::Text(String::new())
    }
}

impl From<f64> for FormNumber {
    fn from(n: f64) -> Self {
        FormNumber::Number(n)
    }
}

impl From<&str> for FormNumber {
    fn from(s: &str) -> Self {
        FormNumber::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantDraft {
    pub name: String,
    pub url: String,
    pub weight: FormNumber,
}

impl Default for VariantDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            weight: FormNumber::Number(DEFAULT_VARIANT_WEIGHT),
        }
    }
}

impl VariantDraft {
    pub fn new(name: impl Into<String>, url: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            weight: FormNumber::Number(weight),
        }
    }

    /// Name and URL both filled in
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbTestDraft {
    pub enabled: bool,
    pub split_method: SplitMethod,
    pub variants: Vec<VariantDraft>,
    pub auto_optimize: AutoOptimize,
}

impl AbTestDraft {
    pub fn complete_variants(&self) -> impl Iterator<Item = &VariantDraft> {
        self.variants.iter().filter(|v| v.is_complete())
    }

    /// Enabled with at least two complete variants
    pub fn is_complete(&self) -> bool {
        self.enabled && self.complete_variants().count() >= 2
    }

    pub fn total_weight(&self) -> f64 {
        self.variants.iter().map(|v| v.weight.value_or_zero()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoRuleDraft {
    pub countries: Vec<String>,
    pub target_url: String,
    pub priority: FormNumber,
}

impl Default for GeoRuleDraft {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            target_url: String::new(),
            priority: FormNumber::Number(DEFAULT_GEO_PRIORITY),
        }
    }
}

impl GeoRuleDraft {
    pub fn new<I, S>(countries: I, target_url: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            target_url: target_url.into(),
            ..Self::default()
        }
    }

    fn has_countries(&self) -> bool {
        self.countries.iter().any(|c| !c.trim().is_empty())
    }

    /// Countries and target URL both present
    pub fn is_complete(&self) -> bool {
        self.has_countries() && !self.target_url.trim().is_empty()
    }

    /// Neither countries nor target URL present
    pub fn is_empty(&self) -> bool {
        !self.has_countries() && self.target_url.trim().is_empty()
    }
}

/// Device kinds that can carry their own destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
    Tablet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRulesDraft {
    pub mobile: String,
    pub desktop: String,
    pub tablet: String,
}

impl DeviceRulesDraft {
    pub fn url(&self, device: Device) -> &str {
        match device {
            Device::Mobile => &self.mobile,
            Device::Desktop => &self.desktop,
            Device::Tablet => &self.tablet,
        }
    }

    pub fn url_mut(&mut self, device: Device) -> &mut String {
        match device {
            Device::Mobile => &mut self.mobile,
            Device::Desktop => &mut self.desktop,
            Device::Tablet => &mut self.tablet,
        }
    }

    pub fn urls(&self) -> [&str; 3] {
        [&self.mobile, &self.desktop, &self.tablet]
    }

    pub fn has_any_url(&self) -> bool {
        self.urls().iter().any(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleDraft {
    pub enabled: bool,
    pub start_date: String,
    pub end_date: String,
    pub redirect_after_expiry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixelDraft {
    /// `""` is an untouched platform picker
    #[serde(deserialize_with = "blank_as_none")]
    pub platform: Option<PixelPlatform>,
    pub pixel_id: String,
    pub event: PixelEvent,
}

impl PixelDraft {
    pub fn new(platform: PixelPlatform, pixel_id: impl Into<String>) -> Self {
        Self {
            platform: Some(platform),
            pixel_id: pixel_id.into(),
            event: PixelEvent::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.platform.is_some() && !self.pixel_id.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.pixel_id.trim().is_empty()
    }
}

/// The link being edited.
///
/// Every field holds what the user typed; nothing here is guaranteed to be
/// complete or valid. The validator decides whether it can be sent and the
/// normalizer turns it into a [`LinkPayload`](super::LinkPayload).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkDraft {
    pub original_url: String,
    pub custom_alias: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub expires_at: String,
    pub password: String,
    pub ab_test: AbTestDraft,
    pub geo_rules: Vec<GeoRuleDraft>,
    pub device_rules: DeviceRulesDraft,
    pub schedule: ScheduleDraft,
    pub pixels: Vec<PixelDraft>,
}

impl LinkDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_original_url(url: impl Into<String>) -> Self {
        Self {
            original_url: url.into(),
            ..Self::default()
        }
    }

    pub fn has_complete_geo_rule(&self) -> bool {
        self.geo_rules.iter().any(GeoRuleDraft::is_complete)
    }

    /// Whether some routing path other than the original URL is configured
    pub fn has_any_targeting(&self) -> bool {
        self.ab_test.is_complete()
            || self.has_complete_geo_rule()
            || self.device_rules.has_any_url()
    }
}
