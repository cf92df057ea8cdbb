//! User directory service.
//!
//! Implements the [`UserDirectory`] driving port over a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{Error, User, UserId, UserProfile};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing the directory driving port.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    user_repo: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service backed by `user_repo`.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, profile: UserProfile) -> Result<User, Error> {
        let user = self
            .user_repo
            .create(&profile)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }

    async fn update_user(&self, id: UserId, profile: UserProfile) -> Result<User, Error> {
        self.user_repo
            .update(id, &profile)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .user_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted with its transfers");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
