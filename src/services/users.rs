//! User registry operations.

use crate::db::pool::DbPool;
use crate::db::{pull_requests, users};
use crate::error::AppError;
use crate::models::{PullRequestShort, User};

/// Get a user by id.
pub async fn get_user(pool: &DbPool, user_id: &str) -> Result<User, AppError> {
    let mut conn = pool.acquire().await?;

    users::get_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("User", user_id))
}

/// Set a user's active flag.
///
/// Deactivation does not retract existing reviewer assignments.
pub async fn set_is_active(pool: &DbPool, user_id: &str, is_active: bool) -> Result<User, AppError> {
    let mut conn = pool.acquire().await?;

    let user = users::set_is_active(&mut conn, user_id, is_active)
        .await?
        .ok_or_else(|| AppError::not_found_with_id("User", user_id))?;

    log::info!("[users] User {} is_active={}", user.id, user.is_active);

    Ok(user)
}

/// Pull requests the user is currently assigned to review.
///
/// An unknown user simply has nothing to review.
pub async fn get_reviews(pool: &DbPool, user_id: &str) -> Result<Vec<PullRequestShort>, AppError> {
    let mut conn = pool.acquire().await?;

    Ok(pull_requests::get_user_reviews(&mut conn, user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assignment::{self, NewPullRequest};
    use crate::services::teams;
    use crate::services::test_support::{member, setup_test_db};

    #[tokio::test]
    async fn test_set_is_active_round_trip() {
        let (_dir, pool) = setup_test_db().await;
        teams::create_team(&pool, "backend", vec![member("u3", "Charlie", true)])
            .await
            .unwrap();

        let user = set_is_active(&pool, "u3", false).await.unwrap();
        assert!(!user.is_active);
        assert_eq!(user.team_name.as_deref(), Some("backend"));

        let fetched = get_user(&pool, "u3").await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (_dir, pool) = setup_test_db().await;

        assert_eq!(
            set_is_active(&pool, "u99", false).await.unwrap_err().code(),
            "NOT_FOUND"
        );
        assert_eq!(get_user(&pool, "u99").await.unwrap_err().code(), "NOT_FOUND");
        assert!(get_reviews(&pool, "u99").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivation_keeps_existing_reviews() {
        let (_dir, pool) = setup_test_db().await;
        teams::create_team(
            &pool,
            "backend",
            vec![member("u1", "Alice", true), member("u2", "Bob", true)],
        )
        .await
        .unwrap();
        assignment::create_pull_request(&pool, NewPullRequest::new("pr-1", "Add search", "u1"))
            .await
            .unwrap();

        set_is_active(&pool, "u2", false).await.unwrap();

        let reviews = get_reviews(&pool, "u2").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "pr-1");
        assert_eq!(reviews[0].author_id, "u1");
    }
}
