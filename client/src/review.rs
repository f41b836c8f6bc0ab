//! Institution review operations — the client side of the campaign
//! lifecycle controller.
//!
//! Each transition is a full-record update: re-fetch the campaign, apply
//! the flag change to the freshest representation (unmodeled backend fields
//! ride along in `Campaign::extra`), `PUT` the whole record, then re-fetch
//! the complete list to resynchronize the tabs. Nothing is updated
//! optimistically, and concurrent reviewers are not coordinated — last
//! write wins at the backend.

use tracing::info;

use campaign_lifecycle::{partition, ReviewSummary, TabbedCampaigns, Transition};

use crate::api::Backend;
use crate::errors::Result;
use crate::session::Session;

/// Fetch the complete campaign set and group it for review.
pub async fn review_tabs(backend: &Backend) -> Result<(TabbedCampaigns, ReviewSummary)> {
    let campaigns = backend.all_campaigns().await?;
    let summary = ReviewSummary::of(&campaigns);
    Ok((partition(&campaigns), summary))
}

/// Apply a lifecycle transition to one campaign and return the
/// re-partitioned tabs.
///
/// Fails fast on the role gate; a failure at any later step leaves the
/// campaign's displayed state stale-but-safe, because the list re-fetch
/// that would reflect the change never runs.
pub async fn transition(
    backend: &Backend,
    session: &Session,
    campaign_id: i64,
    transition: Transition,
) -> Result<TabbedCampaigns> {
    session.require_institution()?;

    let mut record = backend.campaign_by_id(campaign_id).await?;
    record.flags = transition.apply(record.flags);
    backend.update_campaign(campaign_id, &record).await?;
    info!(
        "Applied {} to campaign {campaign_id}",
        transition.as_str()
    );

    let campaigns = backend.all_campaigns().await?;
    Ok(partition(&campaigns))
}

pub async fn approve(
    backend: &Backend,
    session: &Session,
    campaign_id: i64,
) -> Result<TabbedCampaigns> {
    transition(backend, session, campaign_id, Transition::Approve).await
}

pub async fn reject(
    backend: &Backend,
    session: &Session,
    campaign_id: i64,
) -> Result<TabbedCampaigns> {
    transition(backend, session, campaign_id, Transition::Reject).await
}

pub async fn close(
    backend: &Backend,
    session: &Session,
    campaign_id: i64,
) -> Result<TabbedCampaigns> {
    transition(backend, session, campaign_id, Transition::Close).await
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
