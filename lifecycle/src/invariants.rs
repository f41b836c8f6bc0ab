#![allow(dead_code)]

use crate::transitions::{partition, ReviewTab, Transition};
use crate::types::{Campaign, LifecycleFlags};

/// All eight flag tuples, for exhaustive checks.
pub fn all_flag_tuples() -> Vec<LifecycleFlags> {
    let mut tuples = Vec::new();
    for is_live in [false, true] {
        for is_approved in [false, true] {
            for is_fulfilled in [false, true] {
                tuples.push(LifecycleFlags {
                    is_live,
                    is_approved,
                    is_fulfilled,
                });
            }
        }
    }
    tuples
}

/// INV-1: Transitions are deterministic — the same input tuple always
/// yields the same output tuple.
pub fn assert_transition_deterministic(transition: Transition, flags: LifecycleFlags) {
    assert_eq!(
        transition.apply(flags),
        transition.apply(flags),
        "INV-1 violated: {} is non-deterministic on {:?}",
        transition.as_str(),
        flags
    );
}

/// INV-2: Every transition is idempotent — applying it twice is the same
/// as applying it once.
pub fn assert_transition_idempotent(transition: Transition, flags: LifecycleFlags) {
    let once = transition.apply(flags);
    let twice = transition.apply(once);
    assert_eq!(
        once,
        twice,
        "INV-2 violated: {} is not idempotent on {:?}",
        transition.as_str(),
        flags
    );
}

/// INV-3: `is_fulfilled` is sticky — no transition clears it.
pub fn assert_fulfilled_sticky(transition: Transition, flags: LifecycleFlags) {
    if flags.is_fulfilled {
        assert!(
            transition.apply(flags).is_fulfilled,
            "INV-3 violated: {} cleared is_fulfilled on {:?}",
            transition.as_str(),
            flags
        );
    }
}

/// INV-4: Tab membership is a pure function of the tuple.
pub fn assert_tab_membership_pure(tab: ReviewTab, flags: LifecycleFlags) {
    let copy = flags;
    assert_eq!(
        tab.matches(&flags),
        tab.matches(&copy),
        "INV-4 violated: {} membership differs for equal tuples {:?}",
        tab.as_str(),
        flags
    );
}

/// INV-5: `partition` is exactly the three independent membership filters,
/// preserving input order.
pub fn assert_partition_consistent(campaigns: &[Campaign]) {
    let tabs = partition(campaigns);
    for tab in [ReviewTab::Pending, ReviewTab::Approved, ReviewTab::Closed] {
        let expected: Vec<_> = campaigns
            .iter()
            .filter(|c| tab.matches(&c.flags))
            .cloned()
            .collect();
        assert_eq!(
            tabs.tab(tab),
            &expected[..],
            "INV-5 violated: {} tab diverges from its membership filter",
            tab.as_str()
        );
    }
}
