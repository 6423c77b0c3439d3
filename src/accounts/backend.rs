use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::{Identity, UserProfile};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unknown account")]
    UnknownAccount,
    #[error("unknown or expired verification token")]
    UnknownToken,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Account and profile-document operations. Every call may fail; nothing is
/// retried.
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AccountError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AccountError>;
    async fn send_verification_email(&self, user_id: Uuid) -> Result<(), AccountError>;
    async fn confirm_email(&self, token: &str) -> Result<Identity, AccountError>;
    /// The identity behind an id from a session token.
    async fn identity(&self, user_id: Uuid) -> Result<Identity, AccountError>;
    async fn is_email_verified(&self, user_id: Uuid) -> Result<bool, AccountError>;
    async fn store_profile(&self, profile: UserProfile) -> Result<(), AccountError>;
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AccountError>;
}
