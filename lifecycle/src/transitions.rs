//! # Transitions & review tabs
//!
//! The institution review operations expressed as a flag algebra, plus the
//! derived tab classification the review surface is built on.

use serde::{Deserialize, Serialize};

use crate::types::{Campaign, LifecycleFlags};

// ─────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────

/// An institution review action on a campaign.
///
/// Each variant is a total function over the flag tuple: it sets its flags
/// unconditionally and leaves the rest untouched, so re-applying a
/// transition is always a no-op on an already-transitioned tuple.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Accept a pending campaign: `isApproved = true`, `isLive = true`.
    Approve,
    /// Turn a pending campaign away: `isApproved = false`, `isLive = false`.
    Reject,
    /// End an approved campaign: `isLive = false`, `isFulfilled = true`.
    Close,
}

impl Transition {
    /// Apply this transition to a flag tuple and return the result.
    ///
    /// `is_fulfilled` is sticky: no transition clears it.
    pub fn apply(self, flags: LifecycleFlags) -> LifecycleFlags {
        let mut next = flags;
        match self {
            Transition::Approve => {
                next.is_approved = true;
                next.is_live = true;
            }
            Transition::Reject => {
                next.is_approved = false;
                next.is_live = false;
            }
            Transition::Close => {
                next.is_live = false;
                next.is_fulfilled = true;
            }
        }
        next
    }

    /// Short identifier for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Approve => "approve",
            Transition::Reject => "reject",
            Transition::Close => "close",
        }
    }
}

// ─────────────────────────────────────────────────────────
// Review tabs
// ─────────────────────────────────────────────────────────

/// The three derived categories of the institution review surface.
///
/// Membership is a pure function of the flag tuple. The predicates are not
/// a true partition: a rejected tuple matches no tab, and a tuple that is
/// live, approved, and fulfilled matches both `Approved` and `Closed`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewTab {
    Pending,
    Approved,
    Closed,
}

impl ReviewTab {
    /// Whether a campaign with `flags` belongs on this tab.
    pub fn matches(self, flags: &LifecycleFlags) -> bool {
        match self {
            ReviewTab::Pending => !flags.is_approved && flags.is_live,
            ReviewTab::Approved => flags.is_approved && flags.is_live,
            ReviewTab::Closed => {
                flags.is_fulfilled || (!flags.is_live && flags.is_approved)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewTab::Pending => "pending",
            ReviewTab::Approved => "approved",
            ReviewTab::Closed => "closed",
        }
    }
}

/// Campaigns grouped by review tab.
///
/// Built by [`partition`]; each list is an independent, order-preserving
/// filter of the input, so one campaign may appear in more than one list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabbedCampaigns {
    pub pending: Vec<Campaign>,
    pub approved: Vec<Campaign>,
    pub closed: Vec<Campaign>,
}

impl TabbedCampaigns {
    pub fn tab(&self, tab: ReviewTab) -> &[Campaign] {
        match tab {
            ReviewTab::Pending => &self.pending,
            ReviewTab::Approved => &self.approved,
            ReviewTab::Closed => &self.closed,
        }
    }
}

/// Group campaigns into review tabs, preserving backend ordering.
pub fn partition(campaigns: &[Campaign]) -> TabbedCampaigns {
    let filter = |tab: ReviewTab| -> Vec<Campaign> {
        campaigns
            .iter()
            .filter(|c| tab.matches(&c.flags))
            .cloned()
            .collect()
    };
    TabbedCampaigns {
        pending: filter(ReviewTab::Pending),
        approved: filter(ReviewTab::Approved),
        closed: filter(ReviewTab::Closed),
    }
}

// ─────────────────────────────────────────────────────────
// Review summary
// ─────────────────────────────────────────────────────────

/// Header statistics for the review surface, computed over the full
/// campaign set exactly as fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReviewSummary {
    pub total_campaigns: usize,
    pub pending: usize,
    pub funds_raised: f64,
    pub donors: u64,
}

impl ReviewSummary {
    pub fn of(campaigns: &[Campaign]) -> Self {
        ReviewSummary {
            total_campaigns: campaigns.len(),
            pending: campaigns
                .iter()
                .filter(|c| ReviewTab::Pending.matches(&c.flags))
                .count(),
            funds_raised: campaigns.iter().map(|c| c.fund_raised).sum(),
            donors: campaigns.iter().map(|c| u64::from(c.donor_count)).sum(),
        }
    }
}
