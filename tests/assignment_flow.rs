//! End-to-end reviewer assignment scenarios.
//!
//! Each test drives the engine through the public service functions against
//! a fresh on-disk database:
//! 1. Initial assignment skips the author and inactive members
//! 2. Reassignment stays inside the departing reviewer's team
//! 3. Merged pull requests freeze their reviewers
//! 4. Failed operations leave no partial writes behind

use reviewer_service_lib::db::{self, DbPool, PoolSettings};
use reviewer_service_lib::error::AppError;
use reviewer_service_lib::models::{PullRequestStatus, TeamMember};
use reviewer_service_lib::services::assignment::{self, NewPullRequest};
use reviewer_service_lib::services::{pull_requests, teams, users};
use std::collections::HashSet;
use tempfile::{tempdir, TempDir};

async fn setup() -> (TempDir, DbPool) {
    let dir = tempdir().unwrap();
    let pool = db::initialize(&dir.path().join("reviewers.db"), PoolSettings::default())
        .await
        .unwrap();
    (dir, pool)
}

fn member(id: &str, name: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: id.to_string(),
        username: name.to_string(),
        is_active,
    }
}

#[tokio::test]
async fn test_team_round_trip_preserves_members() {
    let (_dir, pool) = setup().await;

    let members = vec![
        member("u1", "Alice", true),
        member("u2", "Bob", false),
        member("u3", "Charlie", true),
        member("u4", "Dana", true),
    ];
    teams::create_team(&pool, "backend", members.clone()).await.unwrap();

    let team = teams::get_team(&pool, "backend").await.unwrap();
    assert_eq!(team.members.len(), members.len());
    for expected in &members {
        assert!(team.members.contains(expected), "missing {:?}", expected);
    }
}

#[tokio::test]
async fn test_inactive_member_and_author_are_never_reviewers() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "T",
        vec![
            member("A", "Alice", true),
            member("B", "Bob", true),
            member("C", "Carol", false),
        ],
    )
    .await
    .unwrap();

    let pr = assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "A"))
        .await
        .unwrap();

    assert_eq!(pr.reviewers, vec!["B".to_string()]);
    assert_eq!(pr.status, PullRequestStatus::Open);
}

#[tokio::test]
async fn test_reviewers_always_come_from_active_teammates() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![
            member("u1", "Alice", true),
            member("u2", "Bob", true),
            member("u3", "Charlie", true),
            member("u4", "Dana", false),
            member("u5", "Eve", true),
        ],
    )
    .await
    .unwrap();
    teams::create_team(&pool, "frontend", vec![member("f1", "Frank", true)])
        .await
        .unwrap();

    let eligible: HashSet<&str> = ["u2", "u3", "u5"].into_iter().collect();
    let mut seen = HashSet::new();

    for n in 0..30 {
        let pr = assignment::create_pull_request(
            &pool,
            NewPullRequest::new(format!("pr-{}", n), "Change", "u1"),
        )
        .await
        .unwrap();

        assert_eq!(pr.reviewers.len(), 2);
        for reviewer in &pr.reviewers {
            assert!(eligible.contains(reviewer.as_str()), "unexpected reviewer {}", reviewer);
            seen.insert(reviewer.clone());
        }
    }

    // Random sampling spreads load over every eligible member.
    assert_eq!(seen.len(), eligible.len());
}

#[tokio::test]
async fn test_reassignment_never_picks_author_or_departing_reviewer() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![
            member("u1", "Alice", true),
            member("u2", "Bob", true),
            member("u3", "Charlie", true),
            member("u4", "Dana", true),
            member("u5", "Eve", true),
        ],
    )
    .await
    .unwrap();

    let pr = assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "u1"))
        .await
        .unwrap();
    let departing = pr.reviewers[0].clone();
    let staying = pr.reviewers[1].clone();

    let result = assignment::reassign_reviewer(&pool, "pr-1", &departing)
        .await
        .unwrap();

    assert_ne!(result.replaced_by, departing);
    assert_ne!(result.replaced_by, "u1");
    assert_ne!(result.replaced_by, staying);
    assert_eq!(result.pull_request.reviewers, vec![result.replaced_by.clone(), staying]);

    let reviews = users::get_reviews(&pool, &departing).await.unwrap();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_no_candidate_leaves_reviewers_unchanged() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "T",
        vec![
            member("A", "Alice", true),
            member("B", "Bob", true),
            member("C", "Carol", false),
        ],
    )
    .await
    .unwrap();
    assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "A"))
        .await
        .unwrap();

    let err = assignment::reassign_reviewer(&pool, "pr-1", "B").await.unwrap_err();
    assert!(matches!(err, AppError::NoCandidate { .. }));

    let pr = pull_requests::get_pull_request(&pool, "pr-1").await.unwrap();
    assert_eq!(pr.reviewers, vec!["B".to_string()]);
}

#[tokio::test]
async fn test_merged_pull_request_freezes_reviewers() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![
            member("u1", "Alice", true),
            member("u2", "Bob", true),
            member("u3", "Charlie", true),
            member("u4", "Dana", true),
        ],
    )
    .await
    .unwrap();
    let created = assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "u1"))
        .await
        .unwrap();

    let first = pull_requests::merge_pull_request(&pool, "pr-1").await.unwrap();
    let second = pull_requests::merge_pull_request(&pool, "pr-1").await.unwrap();
    assert_eq!(first.status, PullRequestStatus::Merged);
    assert_eq!(second.status, PullRequestStatus::Merged);
    assert_eq!(first.merged_at, second.merged_at);

    for reviewer in &created.reviewers {
        let err = assignment::reassign_reviewer(&pool, "pr-1", reviewer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PullRequestMerged { .. }));
    }

    let after = pull_requests::get_pull_request(&pool, "pr-1").await.unwrap();
    assert_eq!(after.reviewers, created.reviewers);
}

#[tokio::test]
async fn test_reviewers_may_span_teams_after_reassignment() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![member("u1", "Alice", true), member("u2", "Bob", true)],
    )
    .await
    .unwrap();
    assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "u1"))
        .await
        .unwrap();

    teams::create_team(
        &pool,
        "platform",
        vec![member("u2", "Bob", true), member("p1", "Pat", true)],
    )
    .await
    .unwrap();

    let result = assignment::reassign_reviewer(&pool, "pr-1", "u2").await.unwrap();
    assert_eq!(result.replaced_by, "p1");

    let reviewer = users::get_user(&pool, "p1").await.unwrap();
    assert_eq!(reviewer.team_name.as_deref(), Some("platform"));
}

#[tokio::test]
async fn test_duplicate_pull_request_is_rejected_without_side_effects() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![member("u1", "Alice", true), member("u2", "Bob", true)],
    )
    .await
    .unwrap();
    assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "u1"))
        .await
        .unwrap();

    let err = assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Other", "u2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PullRequestExists { .. }));

    let pr = pull_requests::get_pull_request(&pool, "pr-1").await.unwrap();
    assert_eq!(pr.author_id, "u1");
    assert_eq!(pr.reviewers, vec!["u2".to_string()]);
}

#[tokio::test]
async fn test_deactivated_team_members_drop_out_of_future_selection() {
    let (_dir, pool) = setup().await;
    teams::create_team(
        &pool,
        "backend",
        vec![
            member("u1", "Alice", true),
            member("u2", "Bob", true),
            member("u3", "Charlie", true),
        ],
    )
    .await
    .unwrap();
    let before = assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Search", "u1"))
        .await
        .unwrap();
    assert_eq!(before.reviewers.len(), 2);

    teams::deactivate_team(&pool, "backend").await.unwrap();

    let after = assignment::create_pull_request(&pool, NewPullRequest::new("pr-2", "Filters", "u1"))
        .await
        .unwrap();
    assert!(after.reviewers.is_empty());

    let kept = pull_requests::get_pull_request(&pool, "pr-1").await.unwrap();
    assert_eq!(kept.reviewers, before.reviewers);

    let stats = teams::get_team_stats(&pool, "backend").await.unwrap();
    let open_reviews: i64 = stats.users.iter().map(|u| u.open_reviews).sum();
    assert_eq!(open_reviews, 2);
    assert_eq!(stats.pull_requests.len(), 2);
}
