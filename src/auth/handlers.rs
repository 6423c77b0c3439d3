use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    accounts::UserProfile,
    auth::{
        dto::{
            AuthResponse, LoginRequest, MeResponse, RefreshRequest, RegisterRequest,
            VerificationStatus, VerifyEmailRequest,
        },
        jwt::{AuthUser, JwtKeys},
    },
    error::ApiError,
    state::AppState,
    validation::validate_registration,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/verify", post(verify_email))
        .route("/auth/verification", get(verification_status))
        .route("/auth/verification/resend", post(resend_verification))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let age = validate_registration(&payload.form(), now.date()).map_err(|errors| {
        warn!(count = errors.len(), "registration rejected");
        ApiError::Validation(errors)
    })?;

    let identity = state
        .accounts
        .create_account(&payload.email, &payload.password)
        .await?;

    state
        .accounts
        .store_profile(UserProfile {
            id: identity.id,
            name: payload.name.trim().to_string(),
            surname: payload.surname.trim().to_string(),
            age,
            country: payload.country.trim().to_string(),
            email: identity.email.clone(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    // The account exists at this point; a failed send can be retried via resend.
    if let Err(e) = state.accounts.send_verification_email(identity.id).await {
        warn!(error = %e, user_id = %identity.id, "verification email failed");
    }

    let tokens = JwtKeys::from_ref(&state).sign_pair(identity.id)?;
    info!(user_id = %identity.id, "user registered");
    Ok(Json(AuthResponse {
        tokens,
        user: identity,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identity = state
        .accounts
        .sign_in(&payload.email, &payload.password)
        .await?;
    let tokens = JwtKeys::from_ref(&state).sign_pair(identity.id)?;
    info!(user_id = %identity.id, verified = identity.email_verified, "user logged in");
    Ok(Json(AuthResponse {
        tokens,
        user: identity,
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let identity = state.accounts.identity(claims.sub).await?;
    let tokens = keys.sign_pair(identity.id)?;
    Ok(Json(AuthResponse {
        tokens,
        user: identity,
    }))
}

#[instrument(skip(state, payload))]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<VerificationStatus>, ApiError> {
    let identity = state.accounts.confirm_email(&payload.token).await?;
    info!(user_id = %identity.id, "email verified");
    Ok(Json(VerificationStatus {
        verified: identity.email_verified,
        recheck_after_secs: state.config.verification_recheck_secs,
    }))
}

#[instrument(skip(state))]
pub async fn verification_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<VerificationStatus>, ApiError> {
    let verified = state.accounts.is_email_verified(user_id).await?;
    Ok(Json(VerificationStatus {
        verified,
        recheck_after_secs: state.config.verification_recheck_secs,
    }))
}

#[instrument(skip(state))]
pub async fn resend_verification(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<VerificationStatus>, ApiError> {
    if state.accounts.is_email_verified(user_id).await? {
        return Err(ApiError::Conflict("Email already verified".into()));
    }
    state.accounts.send_verification_email(user_id).await?;
    Ok(Json(VerificationStatus {
        verified: false,
        recheck_after_secs: state.config.verification_recheck_secs,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state.accounts.identity(user_id).await?;
    let profile = state.accounts.fetch_profile(user_id).await?;
    Ok(Json(MeResponse { user, profile }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::accounts::InMemoryAccounts;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jean".into(),
            surname: "Dupont".into(),
            birth_date: "01/02/1990".into(),
            country: "France".into(),
            email: email.into(),
            password: "Passw0rd!".into(),
            password_confirmation: "Passw0rd!".into(),
        }
    }

    #[tokio::test]
    async fn register_stores_profile_and_issues_tokens() {
        let state = AppState::fake();
        let Json(res) = register(
            State(state.clone()),
            Json(register_request("Jean@Example.fr")),
        )
        .await
        .expect("register");

        assert_eq!(res.user.email, "jean@example.fr");
        assert!(!res.user.email_verified);
        let claims = JwtKeys::from_ref(&state)
            .verify(&res.tokens.access_token)
            .expect("access token");
        assert_eq!(claims.sub, res.user.id);

        let Json(me) = get_me(State(state), AuthUser(res.user.id))
            .await
            .expect("me");
        let profile = me.profile.expect("profile stored");
        assert_eq!(profile.surname, "Dupont");
        assert_eq!(profile.email, "jean@example.fr");
        assert!(profile.age >= 34);
    }

    #[tokio::test]
    async fn register_reports_field_errors() {
        let state = AppState::fake();
        let mut req = register_request("jean@example.fr");
        req.password = "jeanjean".into();
        req.password_confirmation = "other".into();
        let err = register(State(state), Json(req)).await.unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.iter().any(|e| e.field == "password"));
        assert!(errors.iter().any(|e| e.field == "password_confirmation"));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let state = AppState::fake();
        register(State(state.clone()), Json(register_request("a@b.io")))
            .await
            .expect("first");
        let err = register(State(state), Json(register_request("a@b.io")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_and_refresh() {
        let state = AppState::fake();
        register(State(state.clone()), Json(register_request("a@b.io")))
            .await
            .expect("register");

        let Json(res) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@b.io".into(),
                password: "Passw0rd!".into(),
            }),
        )
        .await
        .expect("login");

        let Json(again) = refresh(
            State(state.clone()),
            Json(RefreshRequest {
                refresh_token: res.tokens.refresh_token.clone(),
            }),
        )
        .await
        .expect("refresh");
        assert_eq!(again.user.id, res.user.id);

        let err = refresh(
            State(state.clone()),
            Json(RefreshRequest {
                refresh_token: res.tokens.access_token,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "a@b.io".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn verification_flow() {
        let accounts = Arc::new(InMemoryAccounts::new());
        let state = AppState::from_parts(AppState::test_config(), accounts.clone());
        let Json(res) = register(State(state.clone()), Json(register_request("a@b.io")))
            .await
            .expect("register");
        let user_id = res.user.id;

        let Json(status) = verification_status(State(state.clone()), AuthUser(user_id))
            .await
            .expect("status");
        assert!(!status.verified);
        assert_eq!(status.recheck_after_secs, 3);

        resend_verification(State(state.clone()), AuthUser(user_id))
            .await
            .expect("resend");
        let token = accounts.pending_token(user_id).await.expect("token issued");

        let Json(done) = verify_email(
            State(state.clone()),
            Json(VerifyEmailRequest { token }),
        )
        .await
        .expect("verify");
        assert!(done.verified);

        let err = resend_verification(State(state), AuthUser(user_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
