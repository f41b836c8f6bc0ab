use crate::invariants::{all_flag_tuples, assert_partition_consistent, assert_tab_membership_pure};
use crate::transitions::{partition, ReviewSummary, ReviewTab, Transition};
use crate::types::{Campaign, LifecycleFlags};

fn campaign(id: i64, flags: LifecycleFlags) -> Campaign {
    let mut c = Campaign::new_submission(1, 1, format!("campaign {id}"), "desc", None);
    c.id = Some(id);
    c.flags = flags;
    c
}

fn flags(is_live: bool, is_approved: bool, is_fulfilled: bool) -> LifecycleFlags {
    LifecycleFlags {
        is_live,
        is_approved,
        is_fulfilled,
    }
}

#[test]
fn test_tab_membership_is_pure_over_all_tuples() {
    for tuple in all_flag_tuples() {
        for tab in [ReviewTab::Pending, ReviewTab::Approved, ReviewTab::Closed] {
            assert_tab_membership_pure(tab, tuple);
        }
    }
}

#[test]
fn test_partition_preserves_backend_order() {
    let campaigns = vec![
        campaign(3, flags(true, false, false)),
        campaign(1, flags(true, false, false)),
        campaign(2, flags(true, true, false)),
    ];

    let tabs = partition(&campaigns);
    let pending_ids: Vec<_> = tabs.pending.iter().map(|c| c.id.unwrap()).collect();
    assert_eq!(pending_ids, vec![3, 1]);
    assert_eq!(tabs.approved[0].id, Some(2));
    assert!(tabs.closed.is_empty());
}

#[test]
fn test_fulfilled_live_approved_matches_two_tabs() {
    // The predicates are not disjoint. A campaign the backend marks
    // fulfilled without taking it off live shows up under both Approved
    // and Closed; the client reflects that rather than resolving it.
    let overlap = campaign(9, flags(true, true, true));
    let tabs = partition(std::slice::from_ref(&overlap));
    assert_eq!(tabs.approved.len(), 1);
    assert_eq!(tabs.closed.len(), 1);
    assert!(tabs.pending.is_empty());
}

#[test]
fn test_closed_tab_covers_both_exit_shapes() {
    // Fulfilled, however it got there.
    assert!(ReviewTab::Closed.matches(&flags(false, true, true)));
    // Off live while approved, fulfilled or not.
    assert!(ReviewTab::Closed.matches(&flags(false, true, false)));
    // Off live without approval is a rejection, not a close.
    assert!(!ReviewTab::Closed.matches(&flags(false, false, false)));
}

#[test]
fn test_partition_matches_filters_over_all_tuples() {
    let campaigns: Vec<_> = all_flag_tuples()
        .into_iter()
        .enumerate()
        .map(|(i, tuple)| campaign(i as i64, tuple))
        .collect();
    assert_partition_consistent(&campaigns);
}

#[test]
fn test_approving_moves_campaign_between_tabs() {
    // Institution reviews campaign #42, currently pending.
    let mut c42 = campaign(42, flags(true, false, false));
    let others = campaign(7, flags(true, true, false));

    let before = partition(&[c42.clone(), others.clone()]);
    assert!(before.pending.iter().any(|c| c.id == Some(42)));
    assert!(!before.approved.iter().any(|c| c.id == Some(42)));

    c42.flags = Transition::Approve.apply(c42.flags);

    let after = partition(&[c42, others]);
    assert!(!after.pending.iter().any(|c| c.id == Some(42)));
    assert!(after.approved.iter().any(|c| c.id == Some(42)));
}

#[test]
fn test_review_summary_totals() {
    let mut a = campaign(1, flags(true, false, false));
    a.fund_raised = 1_000.0;
    a.donor_count = 3;
    let mut b = campaign(2, flags(true, true, false));
    b.fund_raised = 2_500.5;
    b.donor_count = 10;

    let summary = ReviewSummary::of(&[a, b]);
    assert_eq!(summary.total_campaigns, 2);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.funds_raised, 3_500.5);
    assert_eq!(summary.donors, 13);
}
