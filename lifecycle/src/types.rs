//! # Types
//!
//! The campaign record as the backend serves it, and the embedded lifecycle
//! flag tuple.
//!
//! ## Design decisions
//!
//! ### Flags as a separate tuple
//!
//! [`LifecycleFlags`] is split out of [`Campaign`] (and flattened back into
//! its JSON form) because it is the only part of the record the client ever
//! writes on its own authority. Review transitions operate on the tuple
//! alone; everything else on the record is backend-owned.
//!
//! ### Full-record round-trips must not clobber
//!
//! Lifecycle transitions are full-record updates: fetch, merge flag changes,
//! `PUT` the whole object. Fields this client does not model (`created`,
//! `updated`, anything the backend adds later) are captured in
//! [`Campaign::extra`] so they ride along unchanged instead of being dropped
//! on the write.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The three independent lifecycle booleans on a campaign.
///
/// `is_live` gates public donatability; `is_approved` and `is_fulfilled`
/// are review outcomes. The backend stores the latter two as nullable, so
/// deserialization treats `null` as `false`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleFlags {
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_live: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_approved: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_fulfilled: bool,
}

impl LifecycleFlags {
    /// Flag tuple of a freshly submitted campaign: live, awaiting review.
    pub fn submitted() -> Self {
        LifecycleFlags {
            is_live: true,
            is_approved: false,
            is_fulfilled: false,
        }
    }
}

/// A fundraising campaign as served by the backend.
///
/// Monetary and counter fields (`fund_raised`, `donor_count`,
/// `priority_score`) are accumulated server-side; the client only ever
/// writes their initial zeros at creation and otherwise reflects what it
/// last fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Backend-assigned identity; absent on a creation payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub beneficiary_id: i64,
    pub institution_id: i64,
    pub title: String,
    pub description: String,
    /// Supporting-document reference (e.g. an uploaded report), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_file_id: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub fund_raised: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub donor_count: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub priority_score: i32,
    #[serde(flatten)]
    pub flags: LifecycleFlags,
    /// Reviewer identity, set by the backend when a campaign is verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<i64>,
    /// Backend fields this client does not model. Preserved verbatim so a
    /// fetch–modify–write cycle never drops them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    /// Build a creation payload: zeroed counters, [`LifecycleFlags::submitted`].
    pub fn new_submission(
        beneficiary_id: i64,
        institution_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        report_file_id: Option<String>,
    ) -> Self {
        Campaign {
            id: None,
            beneficiary_id,
            institution_id,
            title: title.into(),
            description: description.into(),
            report_file_id,
            fund_raised: 0.0,
            donor_count: 0,
            priority_score: 0,
            flags: LifecycleFlags::submitted(),
            verified_by: None,
            extra: Map::new(),
        }
    }
}

/// Deserialize `null` as `T::default()`. The backend emits explicit nulls
/// for unset nullable columns.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
