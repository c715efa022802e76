//! Integration test: registration settling.
//!
//! A burst of registrations coalesces into one completion signal per
//! composite, completed when the host declares the burst finished.
//! Handles are queryable synchronously and awaitable as futures.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use formwork_engine::{FormTree, GroupConfig, LeafConfig, Settled};

fn poll_once(handle: &mut Settled) -> Poll<()> {
    let mut cx = Context::from_waker(Waker::noop());
    Pin::new(handle).poll(&mut cx)
}

#[test]
fn quiet_groups_are_already_settled() {
    let mut tree = FormTree::new();
    let group = tree.create_group(GroupConfig::new("g"));
    assert!(tree.registration_settled(group).is_settled());
}

#[test]
fn a_registration_burst_settles_on_the_host_checkpoint() {
    let mut tree = FormTree::new();
    let group = tree.create_group(GroupConfig::new("g"));
    let field = tree.create_leaf(LeafConfig::new("planet").value("earth"));
    tree.register(group, field).unwrap();

    let handle = tree.registration_settled(group);
    assert!(!handle.is_settled());

    tree.settle();
    assert!(handle.is_settled());
}

#[test]
fn registrations_within_a_burst_coalesce() {
    let mut tree = FormTree::new();
    let group = tree.create_group(GroupConfig::new("g"));
    let a = tree.create_leaf(LeafConfig::new("a"));
    tree.register(group, a).unwrap();

    let early = tree.registration_settled(group);

    // More registrations arrive before the burst settles; they merge
    // into the same signal rather than queueing a second one.
    let b = tree.create_leaf(LeafConfig::new("b"));
    tree.register(group, b).unwrap();
    let late = tree.registration_settled(group);
    assert!(!early.is_settled());
    assert!(!late.is_settled());

    tree.settle();
    assert!(early.is_settled());
    assert!(late.is_settled());
}

#[test]
fn a_new_burst_arms_a_fresh_signal() {
    let mut tree = FormTree::new();
    let group = tree.create_group(GroupConfig::new("g"));
    let a = tree.create_leaf(LeafConfig::new("a"));
    tree.register(group, a).unwrap();
    let first = tree.registration_settled(group);
    tree.settle();
    assert!(first.is_settled());

    let b = tree.create_leaf(LeafConfig::new("b"));
    tree.register(group, b).unwrap();
    let second = tree.registration_settled(group);
    assert!(!second.is_settled());
    assert!(first.is_settled(), "completed signals never un-complete");

    tree.settle();
    assert!(second.is_settled());
}

#[test]
fn bursts_settle_per_composite() {
    let mut tree = FormTree::new();
    let one = tree.create_group(GroupConfig::new("one"));
    let two = tree.create_group(GroupConfig::new("two"));
    let a = tree.create_leaf(LeafConfig::new("a"));
    tree.register(one, a).unwrap();

    assert!(!tree.registration_settled(one).is_settled());
    assert!(
        tree.registration_settled(two).is_settled(),
        "a composite with no pending burst reads as settled"
    );
}

#[test]
fn the_handle_is_awaitable() {
    let mut tree = FormTree::new();
    let group = tree.create_group(GroupConfig::new("g"));
    let field = tree.create_leaf(LeafConfig::new("a"));
    tree.register(group, field).unwrap();

    let mut handle = tree.registration_settled(group);
    assert_eq!(poll_once(&mut handle), Poll::Pending);

    tree.settle();
    assert_eq!(poll_once(&mut handle), Poll::Ready(()));

    // A stable subtree shape is now safe to read.
    use formwork_core::Value;
    assert_eq!(tree.value(group), Value::group([("a", Value::Unset)]));
}
