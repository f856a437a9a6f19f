//! Tests for the swipe orchestrator.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, MockClock};

use super::ports::{
    MockFriendRepository, MockRewindQuotaStore, MockScoreIndex, MockSwipeLedger, RewindCommand,
    RewindRequest, SwipeRequest, SwipeSubmission,
};
use super::*;

fn utc_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn local_noon() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}

fn frozen_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(utc_noon());
    clock.expect_local().return_const(local_noon());
    Arc::new(clock)
}

fn make_service(
    ledger: MockSwipeLedger,
    friends: MockFriendRepository,
    scores: MockScoreIndex,
    quota: MockRewindQuotaStore,
) -> SwipeService<MockSwipeLedger, MockFriendRepository, MockScoreIndex, MockRewindQuotaStore> {
    SwipeService::new(
        Arc::new(ledger),
        Arc::new(friends),
        Arc::new(scores),
        Arc::new(quota),
        frozen_clock(),
        SwipeWeights::default(),
        3,
    )
}

fn like_request(actor: u64, target: u64) -> SwipeRequest {
    SwipeRequest {
        actor_id: UserId::new(actor),
        target_id: UserId::new(target),
        swipe_type: SwipeType::Like,
    }
}

#[tokio::test]
async fn reciprocated_like_forms_a_match() {
    let mut ledger = MockSwipeLedger::new();
    ledger.expect_append().times(1).return_once(|_| Ok(()));
    ledger
        .expect_has_positive_swipe()
        .withf(|actor, target| *actor == UserId::new(2) && *target == UserId::new(1))
        .times(1)
        .return_once(|_, _| Ok(true));

    let mut friends = MockFriendRepository::new();
    friends
        .expect_make_friends()
        .withf(|pair| pair.lower() == UserId::new(1) && pair.higher() == UserId::new(2))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(
        ledger,
        friends,
        MockScoreIndex::new(),
        MockRewindQuotaStore::new(),
    );

    let response = service.submit(like_request(1, 2)).await.expect("submit succeeds");
    assert!(response.matched);
}

#[tokio::test]
async fn unreciprocated_like_does_not_match() {
    let mut ledger = MockSwipeLedger::new();
    ledger.expect_append().times(1).return_once(|_| Ok(()));
    ledger
        .expect_has_positive_swipe()
        .times(1)
        .return_once(|_, _| Ok(false));

    // No make_friends expectation: forming a friendship would panic.
    let service = make_service(
        ledger,
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        MockRewindQuotaStore::new(),
    );

    let response = service.submit(like_request(1, 2)).await.expect("submit succeeds");
    assert!(!response.matched);
}

#[tokio::test]
async fn dislike_is_recorded_without_a_reciprocity_check() {
    let mut ledger = MockSwipeLedger::new();
    ledger.expect_append().times(1).return_once(|_| Ok(()));

    let service = make_service(
        ledger,
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        MockRewindQuotaStore::new(),
    );

    let response = service
        .submit(SwipeRequest {
            actor_id: UserId::new(1),
            target_id: UserId::new(2),
            swipe_type: SwipeType::Dislike,
        })
        .await
        .expect("submit succeeds");
    assert!(!response.matched);
}

#[tokio::test]
async fn self_swipes_are_rejected() {
    let service = make_service(
        MockSwipeLedger::new(),
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        MockRewindQuotaStore::new(),
    );

    let error = service.submit(like_request(7, 7)).await.expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn rewind_at_the_daily_limit_fails_without_side_effects() {
    let mut quota = MockRewindQuotaStore::new();
    quota.expect_count().times(1).return_once(|_, _| Ok(3));

    // Ledger, friends, and scores carry no expectations: touching them panics.
    let service = make_service(
        MockSwipeLedger::new(),
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        quota,
    );

    let error = service
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect_err("limited");
    assert_eq!(error.code(), ErrorCode::RewindLimited);
}

#[tokio::test]
async fn rewind_undoes_friendship_score_and_counts_the_use() {
    let event = SwipeEvent::new(UserId::new(1), UserId::new(2), SwipeType::Like, utc_noon());
    let event_id = event.id;

    let mut quota = MockRewindQuotaStore::new();
    quota.expect_count().times(1).return_once(|_, _| Ok(0));
    quota
        .expect_increment()
        .withf(move |user, day, ttl| {
            *user == UserId::new(1) && *day == local_noon().date_naive() && *ttl > 0
        })
        .times(1)
        .return_once(|_, _, _| Ok(1));

    let mut ledger = MockSwipeLedger::new();
    ledger
        .expect_latest_for_actor()
        .times(1)
        .return_once(move |_| Ok(Some(event)));
    ledger
        .expect_remove()
        .withf(move |actor, id| *actor == UserId::new(1) && *id == event_id)
        .times(1)
        .return_once(|_, _| Ok(true));

    let mut friends = MockFriendRepository::new();
    friends
        .expect_break_off()
        .withf(|pair| pair.lower() == UserId::new(1) && pair.higher() == UserId::new(2))
        .times(1)
        .return_once(|_| Ok(()));

    let mut scores = MockScoreIndex::new();
    scores
        .expect_increment()
        .withf(|user, delta| *user == UserId::new(2) && *delta == -5)
        .times(1)
        .return_once(|_, _| Ok(915));

    let service = make_service(ledger, friends, scores, quota);

    let response = service
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect("rewind succeeds");
    assert_eq!(response.undone_type, SwipeType::Like);
    assert_eq!(response.target_id, UserId::new(2));
    assert_eq!(response.used_today, 1);
}

#[tokio::test]
async fn rewinding_a_dislike_reverses_its_weight_but_keeps_friendships() {
    let event = SwipeEvent::new(UserId::new(1), UserId::new(2), SwipeType::Dislike, utc_noon());

    let mut quota = MockRewindQuotaStore::new();
    quota.expect_count().times(1).return_once(|_, _| Ok(1));
    quota
        .expect_increment()
        .times(1)
        .return_once(|_, _, _| Ok(2));

    let mut ledger = MockSwipeLedger::new();
    ledger
        .expect_latest_for_actor()
        .times(1)
        .return_once(move |_| Ok(Some(event)));
    ledger.expect_remove().times(1).return_once(|_, _| Ok(true));

    let mut scores = MockScoreIndex::new();
    scores
        .expect_increment()
        .withf(|user, delta| *user == UserId::new(2) && *delta == 5)
        .times(1)
        .return_once(|_, _| Ok(5));

    // No break_off expectation: a dislike never formed a friendship.
    let service = make_service(ledger, MockFriendRepository::new(), scores, quota);

    let response = service
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect("rewind succeeds");
    assert_eq!(response.undone_type, SwipeType::Dislike);
    assert_eq!(response.used_today, 2);
}

#[tokio::test]
async fn rewind_without_history_is_not_found() {
    let mut quota = MockRewindQuotaStore::new();
    quota.expect_count().times(1).return_once(|_, _| Ok(0));

    let mut ledger = MockSwipeLedger::new();
    ledger
        .expect_latest_for_actor()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(
        ledger,
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        quota,
    );

    let error = service
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect_err("no history");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn rewind_losing_the_delete_race_compensates_nothing() {
    let event = SwipeEvent::new(UserId::new(1), UserId::new(2), SwipeType::Like, utc_noon());

    let mut quota = MockRewindQuotaStore::new();
    quota.expect_count().times(1).return_once(|_, _| Ok(0));

    let mut ledger = MockSwipeLedger::new();
    ledger
        .expect_latest_for_actor()
        .times(1)
        .return_once(move |_| Ok(Some(event)));
    ledger.expect_remove().times(1).return_once(|_, _| Ok(false));

    // Friends, scores, and the quota increment stay untouched past the
    // failed commit point.
    let service = make_service(
        ledger,
        MockFriendRepository::new(),
        MockScoreIndex::new(),
        quota,
    );

    let error = service
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect_err("already rewound");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
