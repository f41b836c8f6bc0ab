//! # Campaign Lifecycle
//!
//! Domain crate for the P2P donations platform client. It owns the one piece
//! of client-side logic with real state-transition semantics: the campaign
//! flag tuple `{isLive, isApproved, isFulfilled}` and the institution review
//! operations that drive it.
//!
//! ## Lifecycle as a Finite-State Machine
//!
//! A campaign is created with `isLive = true` and everything else false, and
//! is moved only by institution review actions:
//!
//! ```text
//!             Approve                Close
//! Pending ──────────────► Approved ─────────► Closed
//!    │
//!    │ Reject
//!    ▼
//! Rejected
//! ```
//!
//! Transitions are expressed as a total function over the flag tuple
//! ([`Transition::apply`]) rather than as guarded mutations: applying a
//! transition twice yields the same tuple, and `isFulfilled` is never
//! cleared once set.
//!
//! ## Review tabs
//!
//! The institution review surface groups campaigns into three derived tabs
//! ([`ReviewTab`]). The tab predicates are computed independently per tab
//! and are neither exhaustive nor disjoint by construction — a rejected
//! campaign matches no tab, and a fulfilled campaign that is still live and
//! approved matches two. Callers treat the three lists as a best-effort
//! partition; this crate does not force them into one.
//!
//! No I/O lives here. The sibling `donations-client` crate fetches records
//! from the backend and feeds them through these types.

mod transitions;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_tabs;
#[cfg(test)]
mod test_transitions;

pub use transitions::{partition, ReviewSummary, ReviewTab, TabbedCampaigns, Transition};
pub use types::{Campaign, LifecycleFlags};
