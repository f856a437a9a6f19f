//! End-to-end behaviour of the composed engine over in-memory adapters.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::{Clock, MockClock};

use swipe_engine::domain::ports::{
    FriendRepository, LeaderboardQuery, RecommendRequest, RecommendationQuery, RewindCommand,
    RewindRequest, ScoreIndex, SwipeLedger, SwipeRequest, SwipeSubmission, TopNRequest,
};
use swipe_engine::domain::{
    ErrorCode, FriendPair, LeaderboardService, RecommendationService, ScoreRecordingSubmission,
    Sex, SwipeService, SwipeType, SwipeWeights, UserId, UserProfile,
};
use swipe_engine::outbound::memory::{
    InMemoryFriendRepository, InMemoryRewindQuotaStore, InMemoryScoreIndex, InMemorySwipeLedger,
    InMemoryUserDirectory,
};

/// Shared adjustable time source backing a `mockable::MockClock`.
fn adjustable_clock(start: DateTime<Utc>) -> (Arc<Mutex<DateTime<Utc>>>, Arc<dyn Clock>) {
    let now = Arc::new(Mutex::new(start));
    let mut clock = MockClock::new();
    let utc_handle = Arc::clone(&now);
    clock
        .expect_utc()
        .returning(move || *utc_handle.lock().expect("clock handle"));
    let local_handle = Arc::clone(&now);
    clock.expect_local().returning(move || {
        local_handle
            .lock()
            .expect("clock handle")
            .with_timezone(&Local)
    });
    (now, Arc::new(clock))
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

struct Engine {
    now: Arc<Mutex<DateTime<Utc>>>,
    ledger: Arc<InMemorySwipeLedger>,
    friends: Arc<InMemoryFriendRepository>,
    scores: Arc<InMemoryScoreIndex>,
    directory: Arc<InMemoryUserDirectory>,
    orchestrator: Arc<
        SwipeService<
            InMemorySwipeLedger,
            InMemoryFriendRepository,
            InMemoryScoreIndex,
            InMemoryRewindQuotaStore,
        >,
    >,
    submission: ScoreRecordingSubmission<
        SwipeService<
            InMemorySwipeLedger,
            InMemoryFriendRepository,
            InMemoryScoreIndex,
            InMemoryRewindQuotaStore,
        >,
        InMemoryScoreIndex,
    >,
}

fn engine_with_limit(rewind_daily_limit: u32) -> Engine {
    let (now, clock) = adjustable_clock(start_time());
    let ledger = Arc::new(InMemorySwipeLedger::new());
    let friends = Arc::new(InMemoryFriendRepository::new());
    let scores = Arc::new(InMemoryScoreIndex::new());
    let quota = Arc::new(InMemoryRewindQuotaStore::new(Arc::clone(&clock)));
    let directory = Arc::new(InMemoryUserDirectory::new());
    let weights = SwipeWeights::default();

    let orchestrator = Arc::new(SwipeService::new(
        Arc::clone(&ledger),
        Arc::clone(&friends),
        Arc::clone(&scores),
        quota,
        Arc::clone(&clock),
        weights,
        rewind_daily_limit,
    ));
    let submission =
        ScoreRecordingSubmission::new(Arc::clone(&orchestrator), Arc::clone(&scores), weights);

    Engine {
        now,
        ledger,
        friends,
        scores,
        directory,
        orchestrator,
        submission,
    }
}

fn swipe(actor: u64, target: u64, swipe_type: SwipeType) -> SwipeRequest {
    SwipeRequest {
        actor_id: UserId::new(actor),
        target_id: UserId::new(target),
        swipe_type,
    }
}

fn pair(a: u64, b: u64) -> FriendPair {
    FriendPair::try_new(UserId::new(a), UserId::new(b)).expect("distinct users")
}

fn profile(id: u64, sex: Sex, dating_sex: Sex, location: &str, birth_year: i32) -> UserProfile {
    UserProfile {
        user_id: UserId::new(id),
        sex,
        dating_sex,
        location: location.to_owned(),
        birth_year,
        min_dating_age: 20,
        max_dating_age: 30,
    }
}

#[tokio::test]
async fn mutual_likes_match_and_rewind_compensates_everything() {
    let engine = engine_with_limit(3);

    let first = engine
        .submission
        .submit(swipe(1, 2, SwipeType::Like))
        .await
        .expect("first swipe");
    assert!(!first.matched);
    assert_eq!(engine.scores.score(UserId::new(2)), Some(5));

    let second = engine
        .submission
        .submit(swipe(2, 1, SwipeType::Like))
        .await
        .expect("second swipe");
    assert!(second.matched, "reciprocal like forms the match");
    assert!(engine
        .friends
        .are_friends(pair(1, 2))
        .await
        .expect("friend query"));
    assert_eq!(engine.scores.score(UserId::new(1)), Some(5));

    let rewound = engine
        .orchestrator
        .rewind(RewindRequest {
            user_id: UserId::new(2),
        })
        .await
        .expect("rewind succeeds");
    assert_eq!(rewound.undone_type, SwipeType::Like);
    assert_eq!(rewound.target_id, UserId::new(1));
    assert_eq!(rewound.used_today, 1);

    assert!(
        !engine
            .friends
            .are_friends(pair(1, 2))
            .await
            .expect("friend query"),
        "rewinding the qualifying like dissolves the friendship",
    );
    assert_eq!(
        engine.scores.score(UserId::new(1)),
        Some(0),
        "the like weight is reversed exactly",
    );
    assert!(
        engine
            .ledger
            .latest_for_actor(UserId::new(2))
            .await
            .expect("ledger query")
            .is_none(),
        "the rewound event leaves the ledger",
    );
}

#[tokio::test]
async fn superlike_matches_against_an_earlier_like() {
    let engine = engine_with_limit(3);

    engine
        .submission
        .submit(swipe(1, 2, SwipeType::Superlike))
        .await
        .expect("first swipe");
    let response = engine
        .submission
        .submit(swipe(2, 1, SwipeType::Like))
        .await
        .expect("second swipe");

    assert!(response.matched);
    assert_eq!(engine.scores.score(UserId::new(2)), Some(5));
    assert_eq!(engine.scores.score(UserId::new(1)), Some(7));
}

#[tokio::test]
async fn dislikes_never_match_but_do_score() {
    let engine = engine_with_limit(3);

    engine
        .submission
        .submit(swipe(1, 2, SwipeType::Dislike))
        .await
        .expect("dislike");
    let response = engine
        .submission
        .submit(swipe(2, 1, SwipeType::Like))
        .await
        .expect("like back");

    assert!(!response.matched, "a dislike is not reciprocity");
    assert_eq!(engine.scores.score(UserId::new(2)), Some(-5));
}

#[tokio::test]
async fn rewind_quota_exhausts_and_resets_after_midnight() {
    let engine = engine_with_limit(2);

    for _ in 0..3 {
        engine
            .submission
            .submit(swipe(1, 2, SwipeType::Like))
            .await
            .expect("swipe");
    }

    for expected_use in 1..=2 {
        let response = engine
            .orchestrator
            .rewind(RewindRequest {
                user_id: UserId::new(1),
            })
            .await
            .expect("within quota");
        assert_eq!(response.used_today, expected_use);
    }

    let error = engine
        .orchestrator
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect_err("limit reached");
    assert_eq!(error.code(), ErrorCode::RewindLimited);

    // Cross local midnight; the expiring counter hands back the allowance.
    *engine.now.lock().expect("clock handle") = start_time() + Duration::days(1);
    let response = engine
        .orchestrator
        .rewind(RewindRequest {
            user_id: UserId::new(1),
        })
        .await
        .expect("fresh daily allowance");
    assert_eq!(response.used_today, 1);
}

#[tokio::test]
async fn concurrent_rewinds_compensate_a_single_swipe_once() {
    let engine = engine_with_limit(3);
    engine
        .submission
        .submit(swipe(1, 2, SwipeType::Like))
        .await
        .expect("swipe");
    assert_eq!(engine.scores.score(UserId::new(2)), Some(5));

    let first = engine.orchestrator.rewind(RewindRequest {
        user_id: UserId::new(1),
    });
    let second = engine.orchestrator.rewind(RewindRequest {
        user_id: UserId::new(1),
    });
    let (a, b) = futures::future::join(first, second).await;

    let successes = [&a, &b].iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1, "only one rewind claims the event");
    assert_eq!(
        engine.scores.score(UserId::new(2)),
        Some(0),
        "compensation applies exactly once",
    );
    let loser = if a.is_err() { a } else { b };
    assert_eq!(loser.expect_err("one rewind loses").code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn recommendations_apply_attributes_exclusions_and_boundaries() {
    let engine = engine_with_limit(3);
    let clock = {
        let (_, clock) = adjustable_clock(start_time());
        clock
    };

    engine
        .directory
        .insert(profile(1, Sex::Female, Sex::Male, "wuhan", 1997), "seeker")
        .expect("valid record");
    // In band (1996, 2006) exclusive for 2026 with ages 20..30.
    engine
        .directory
        .insert(profile(2, Sex::Male, Sex::Female, "wuhan", 1997), "in band")
        .expect("valid record");
    engine
        .directory
        .insert(profile(3, Sex::Male, Sex::Female, "wuhan", 2005), "in band too")
        .expect("valid record");
    engine
        .directory
        .insert(profile(4, Sex::Male, Sex::Female, "wuhan", 1996), "lower boundary")
        .expect("valid record");
    engine
        .directory
        .insert(profile(5, Sex::Male, Sex::Female, "wuhan", 2006), "upper boundary")
        .expect("valid record");
    engine
        .directory
        .insert(profile(6, Sex::Male, Sex::Female, "xiamen", 1997), "elsewhere")
        .expect("valid record");
    engine
        .directory
        .insert(profile(7, Sex::Female, Sex::Male, "wuhan", 1997), "wrong sex")
        .expect("valid record");
    engine
        .directory
        .insert(profile(8, Sex::Male, Sex::Female, "wuhan", 1999), "already swiped")
        .expect("valid record");

    engine
        .submission
        .submit(swipe(1, 8, SwipeType::Dislike))
        .await
        .expect("exclusion swipe");

    let recommender = RecommendationService::new(
        Arc::clone(&engine.directory),
        Arc::clone(&engine.ledger),
        clock,
    );
    let response = recommender
        .recommend(RecommendRequest {
            user_id: UserId::new(1),
            limit: 10,
        })
        .await
        .expect("recommend succeeds");

    assert_eq!(
        response.candidate_ids,
        vec![UserId::new(2), UserId::new(3)],
        "boundary years, other locations, other sexes, and swiped targets drop out",
    );
}

#[tokio::test]
async fn leaderboard_ranks_scores_with_profile_summaries() {
    let engine = engine_with_limit(3);

    for (id, score) in [(1_u64, 920_i64), (2, 624), (3, 520), (4, 100)] {
        engine
            .scores
            .increment(UserId::new(id), score)
            .await
            .expect("seed score");
        engine
            .directory
            .insert(
                profile(id, Sex::Female, Sex::Male, "wuhan", 1998),
                format!("user {id}"),
            )
            .expect("valid record");
    }

    let leaderboard = LeaderboardService::new(
        Arc::clone(&engine.scores),
        Arc::clone(&engine.directory),
    );
    let response = leaderboard
        .top_n(TopNRequest { count: 3 })
        .await
        .expect("query succeeds");

    let rows: Vec<(u32, u64, i64)> = response
        .entries
        .iter()
        .map(|entry| (entry.rank, entry.user.user_id.value(), entry.score))
        .collect();
    assert_eq!(rows, vec![(1, 1, 920), (2, 2, 624), (3, 3, 520)]);
    assert_eq!(
        response.entries.first().map(|entry| entry.user.nickname.as_str()),
        Some("user 1"),
    );
}
