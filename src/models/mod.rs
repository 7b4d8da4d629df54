//! Data types shared by the editor, the validator and the API client
//!
//! - `draft`: raw form state of the link being edited
//! - `payload`: the canonical request body sent to the API
//! - `link`: records and error bodies the API sends back
//! - `mode`: create vs. edit

mod draft;
mod link;
mod mode;
mod payload;
mod serde_helpers;

pub use draft::{
    AbTestDraft, DEFAULT_GEO_PRIORITY, DEFAULT_VARIANT_WEIGHT, Device, DeviceRulesDraft,
    FormNumber, GeoRuleDraft, LinkDraft, PixelDraft, ScheduleDraft, VariantDraft,
};
pub use link::{ApiErrorBody, Link};
pub use mode::EditMode;
pub use payload::{
    AbTestPayload, AutoOptimize, DeviceRulesPayload, GeoRulePayload, LinkPayload, PixelEvent,
    PixelPayload, PixelPlatform, SchedulePayload, SplitMethod, VariantPayload,
};
