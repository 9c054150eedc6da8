//! End-to-end decisions over a small forum hierarchy.

mod support;

use agora_authorization::{
    AgoraAuthorizationError, CommentId, CommunityId, CommunityRoles, Decision, Denial, Gate,
    Grant, Operation, PostId, Predicate, Principal, ResourceGraph, Target,
};
use pretty_assertions::assert_eq;
use support::*;
use testresult::TestResult;

fn check(graph: &Fixture, principal: Principal, operation: Operation, target: Target) -> Decision {
    let resolved = graph.resolve(target).expect("target should resolve");
    Gate::new().check(&principal, operation, &resolved)
}

const P1: Target = Target::Post(PostId(1));
const K1: Target = Target::Comment(CommentId(1));
const C1: Target = Target::Community(CommunityId(1));

#[test_log::test]
fn it_decides_the_reference_scenario() {
    let forum = forum();

    assert_eq!(
        check(&forum, Principal::user(BOB), Operation::Delete, P1),
        Decision::Allow(Grant::Predicate(Predicate::CommunityStaff))
    );
    assert_eq!(
        check(&forum, Principal::user(DAVE), Operation::Delete, P1),
        Decision::Deny(Denial::Forbidden)
    );
    assert_eq!(
        check(&forum, Principal::user(CAROL), Operation::Update, P1),
        Decision::Allow(Grant::Predicate(Predicate::Author))
    );
    assert_eq!(
        check(&forum, Principal::Anonymous, Operation::Delete, P1),
        Decision::Deny(Denial::Unauthenticated)
    );
}

#[test]
fn it_lets_moderators_reach_comments_transitively() {
    let forum = forum();

    assert!(check(&forum, Principal::user(BOB), Operation::Delete, K1).is_allowed());
    assert!(check(&forum, Principal::user(ALICE), Operation::Update, K1).is_allowed());
    // The post's author has no standing over comments on it.
    assert_eq!(
        check(&forum, Principal::user(CAROL), Operation::Delete, K1),
        Decision::Deny(Denial::Forbidden)
    );
}

#[test]
fn it_keeps_roles_within_their_community() {
    let forum = forum();

    assert_eq!(
        check(&forum, Principal::user(ERIN), Operation::Delete, P1),
        Decision::Deny(Denial::Forbidden)
    );
}

#[test]
fn it_reserves_community_edits_for_owner_and_superuser() {
    let forum = forum();

    assert!(check(&forum, Principal::user(ALICE), Operation::Update, C1).is_allowed());
    assert_eq!(
        check(&forum, Principal::user(BOB), Operation::Delete, C1),
        Decision::Deny(Denial::Forbidden)
    );
    assert_eq!(
        check(&forum, Principal::superuser(99), Operation::Delete, C1),
        Decision::Allow(Grant::Superuser)
    );
}

#[test_log::test]
fn it_reevaluates_after_reassignment() {
    let mut forum = forum();
    assert!(check(&forum, Principal::user(BOB), Operation::Delete, P1).is_allowed());

    forum.move_post(1, 2);

    assert_eq!(
        check(&forum, Principal::user(BOB), Operation::Delete, P1),
        Decision::Deny(Denial::Forbidden)
    );
    assert!(check(&forum, Principal::user(ERIN), Operation::Delete, P1).is_allowed());
    // Comments follow their post.
    assert!(check(&forum, Principal::user(ERIN), Operation::Delete, K1).is_allowed());
    assert!(!check(&forum, Principal::user(BOB), Operation::Delete, K1).is_allowed());
}

#[test]
fn it_keeps_author_standing_across_reassignment() {
    let mut forum = forum().post(2, 1, Some(BOB));
    forum.move_post(2, 2);

    assert_eq!(
        check(&forum, Principal::user(BOB), Operation::Delete, Target::Post(PostId(2))),
        Decision::Allow(Grant::Predicate(Predicate::Author))
    );
}

#[test]
fn it_locks_ownerless_community_to_superusers() {
    let forum = Fixture::default()
        .community(1, CommunityRoles::new(None).with_moderator(BOB))
        .post(1, 1, None);

    assert_eq!(
        check(&forum, Principal::user(BOB), Operation::Update, C1),
        Decision::Deny(Denial::Forbidden)
    );
    assert!(check(&forum, Principal::superuser(99), Operation::Update, C1).is_allowed());
    // Moderators keep their standing over the community's posts.
    assert!(check(&forum, Principal::user(BOB), Operation::Delete, P1).is_allowed());
}

#[test]
fn it_authorizes_in_one_step() -> TestResult {
    let forum = forum();
    let gate = Gate::new();

    let resolved = gate.authorize(&forum, &Principal::user(BOB), Operation::Delete, P1)?;
    assert_eq!(resolved.community(), CommunityId(1));

    assert_eq!(
        gate.authorize(&forum, &Principal::user(DAVE), Operation::Delete, P1)
            .unwrap_err(),
        AgoraAuthorizationError::Denied(Denial::Forbidden)
    );
    assert_eq!(
        gate.authorize(
            &forum,
            &Principal::Anonymous,
            Operation::Delete,
            Target::Post(PostId(7))
        )
        .unwrap_err(),
        AgoraAuthorizationError::NotFound(Target::Post(PostId(7)))
    );
    Ok(())
}

#[test]
fn it_denies_when_an_ancestor_is_missing() {
    let forum = Fixture::default().post(1, 1, Some(CAROL));

    assert_eq!(
        Gate::new()
            .authorize(&forum, &Principal::user(CAROL), Operation::Update, P1)
            .unwrap_err(),
        AgoraAuthorizationError::Denied(Denial::AncestorNotFound {
            target: P1,
            missing: C1,
        })
    );
}
