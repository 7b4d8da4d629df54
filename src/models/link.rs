//! Records returned by the remote Link API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::payload::{
    AbTestPayload, DeviceRulesPayload, GeoRulePayload, PixelPayload, SchedulePayload,
};
use super::serde_helpers::{invalid_as_none, null_as_default, skip_invalid};

/// A stored short link as the API reports it.
///
/// Only `short_code` is required. The API omits or nulls blocks a link never
/// had; a block or list entry this client cannot read is dropped instead of
/// failing the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub short_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "skip_invalid")]
    pub tags: Vec<String>,
    pub expires_at: Option<String>,
    #[serde(deserialize_with = "invalid_as_none")]
    pub ab_test: Option<AbTestPayload>,
    #[serde(deserialize_with = "skip_invalid")]
    pub geo_rules: Vec<GeoRulePayload>,
    #[serde(deserialize_with = "invalid_as_none")]
    pub device_rules: Option<DeviceRulesPayload>,
    #[serde(deserialize_with = "invalid_as_none")]
    pub schedule: Option<SchedulePayload>,
    #[serde(deserialize_with = "skip_invalid")]
    pub pixels: Vec<PixelPayload>,
    #[serde(deserialize_with = "null_as_default")]
    pub clicks: u64,
    #[serde(deserialize_with = "invalid_as_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Link {
    pub fn new(short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
            ..Self::default()
        }
    }
}

/// Error body of a failed create/update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "link-payload.generated.ts")]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_index: Option<usize>,
}
