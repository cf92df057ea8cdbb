//! Tests for the user directory service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;

fn profile() -> UserProfile {
    UserProfile::try_from_strings("User A", "12345678000199").expect("valid profile")
}

#[rstest]
#[tokio::test]
async fn create_user_returns_stored_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .returning(|profile| Ok(User::new(UserId::new(1), profile.clone())));

    let service = UserDirectoryService::new(Arc::new(repo));
    let user = service.create_user(profile()).await.expect("user created");

    assert_eq!(user.id(), UserId::new(1));
    assert_eq!(user.name().as_ref(), "User A");
}

#[rstest]
#[tokio::test]
async fn get_user_maps_missing_row_to_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(42)))
        .return_once(|_| Ok(None));

    let service = UserDirectoryService::new(Arc::new(repo));
    let error = service
        .get_user(UserId::new(42))
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_users_maps_repository_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list().return_once(move || Err(failure));

    let service = UserDirectoryService::new(Arc::new(repo));
    let error = service.list_users().await.expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_user_unknown_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().return_once(|_, _| Ok(None));

    let service = UserDirectoryService::new(Arc::new(repo));
    let error = service
        .update_user(UserId::new(7), profile())
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_user_reports_missing_rows(
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .with(eq(UserId::new(3)))
        .return_once(move |_| Ok(removed));

    let service = UserDirectoryService::new(Arc::new(repo));
    let result = service.delete_user(UserId::new(3)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}
