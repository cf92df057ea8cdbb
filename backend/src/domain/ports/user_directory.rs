//! Driving port for user management.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfile};

/// Use cases exposed to inbound adapters for the user resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register a user.
    async fn create_user(&self, profile: UserProfile) -> Result<User, Error>;

    /// Fetch one user; `not_found` when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// All users in creation order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Replace a user's name and CNPJ.
    async fn update_user(&self, id: UserId, profile: UserProfile) -> Result<User, Error>;

    /// Remove a user together with its transfers.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
