use serde::{Deserialize, Serialize};

use super::jwt::TokenPair;
use crate::accounts::{Identity, UserProfile};
use crate::validation::RegistrationForm;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    /// `day/month/year`
    pub birth_date: String,
    pub country: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterRequest {
    pub fn form(&self) -> RegistrationForm<'_> {
        RegistrationForm {
            name: &self.name,
            surname: &self.surname,
            birth_date: &self.birth_date,
            country: &self.country,
            email: &self.email,
            password: &self.password,
            password_confirmation: &self.password_confirmation,
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Response returned after login, register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct VerificationStatus {
    pub verified: bool,
    /// How long a client should wait before asking again.
    pub recheck_after_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Identity,
    pub profile: Option<UserProfile>,
}
