//! The authentication / profile-document collaborator.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod backend;
pub mod memory;
mod password;

pub use backend::{AccountBackend, AccountError};
pub use memory::InMemoryAccounts;

/// Who a backend account belongs to, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub email_verified: bool,
}

/// The user document kept alongside the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub country: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
