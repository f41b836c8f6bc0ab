use crate::invariants::{
    all_flag_tuples, assert_fulfilled_sticky, assert_transition_deterministic,
    assert_transition_idempotent,
};
use crate::transitions::{ReviewTab, Transition};
use crate::types::LifecycleFlags;

fn pending() -> LifecycleFlags {
    LifecycleFlags::submitted()
}

fn approved() -> LifecycleFlags {
    Transition::Approve.apply(pending())
}

#[test]
fn test_approve_sets_approved_and_live() {
    let next = Transition::Approve.apply(pending());
    assert!(next.is_approved);
    assert!(next.is_live);
    assert!(!next.is_fulfilled);
}

#[test]
fn test_reject_takes_campaign_off_live() {
    let next = Transition::Reject.apply(pending());
    assert!(!next.is_approved);
    assert!(!next.is_live);
    assert!(!next.is_fulfilled);
}

#[test]
fn test_close_fulfills_an_approved_campaign() {
    let next = Transition::Close.apply(approved());
    assert!(!next.is_live);
    assert!(next.is_fulfilled);
    // Close does not touch approval.
    assert!(next.is_approved);
}

#[test]
fn test_close_again_is_a_no_op() {
    let closed = Transition::Close.apply(approved());
    assert_eq!(Transition::Close.apply(closed), closed);
}

#[test]
fn test_approve_is_idempotent() {
    let once = Transition::Approve.apply(pending());
    assert_eq!(Transition::Approve.apply(once), once);
}

#[test]
fn test_all_transitions_deterministic_and_idempotent_everywhere() {
    for flags in all_flag_tuples() {
        for transition in [Transition::Approve, Transition::Reject, Transition::Close] {
            assert_transition_deterministic(transition, flags);
            assert_transition_idempotent(transition, flags);
            assert_fulfilled_sticky(transition, flags);
        }
    }
}

#[test]
fn test_submitted_campaign_walks_the_happy_path() {
    let flags = pending();
    assert!(ReviewTab::Pending.matches(&flags));

    let flags = Transition::Approve.apply(flags);
    assert!(ReviewTab::Approved.matches(&flags));
    assert!(!ReviewTab::Pending.matches(&flags));

    let flags = Transition::Close.apply(flags);
    assert!(ReviewTab::Closed.matches(&flags));
    assert!(!ReviewTab::Approved.matches(&flags));
}

#[test]
fn test_rejected_campaign_matches_no_tab() {
    let flags = Transition::Reject.apply(pending());
    assert!(!ReviewTab::Pending.matches(&flags));
    assert!(!ReviewTab::Approved.matches(&flags));
    assert!(!ReviewTab::Closed.matches(&flags));
}
