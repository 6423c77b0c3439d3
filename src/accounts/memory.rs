use std::collections::HashMap;

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    backend::{AccountBackend, AccountError},
    password::{hash_password, verify_password},
    Identity, UserProfile,
};

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone)]
struct Account {
    id: Uuid,
    email: String,
    password_hash: String,
    email_verified: bool,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            email_verified: self.email_verified,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
    /// verification token -> account
    pending: HashMap<String, Uuid>,
    profiles: HashMap<Uuid, UserProfile>,
}

/// Process-local account backend. Verification emails are not sent; the
/// link token is written to the log instead.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    inner: RwLock<Inner>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Most recent verification token issued for `user_id`.
    #[cfg(test)]
    pub async fn pending_token(&self, user_id: Uuid) -> Option<String> {
        self.inner
            .read()
            .await
            .pending
            .iter()
            .find(|(_, id)| **id == user_id)
            .map(|(token, _)| token.clone())
    }
}

#[async_trait]
impl AccountBackend for InMemoryAccounts {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AccountError> {
        let email = Self::normalize(email);
        let password_hash = hash_password(password)?;

        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&email) {
            return Err(AccountError::EmailTaken);
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash,
            email_verified: false,
        };
        let identity = account.identity();
        inner.by_email.insert(email, account.id);
        inner.accounts.insert(account.id, account);
        info!(user_id = %identity.id, "account created");
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AccountError> {
        let email = Self::normalize(email);
        let inner = self.inner.read().await;
        let account = inner
            .by_email
            .get(&email)
            .and_then(|id| inner.accounts.get(id))
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(password, &account.password_hash)? {
            warn!(user_id = %account.id, "sign in with wrong password");
            return Err(AccountError::InvalidCredentials);
        }
        Ok(account.identity())
    }

    async fn send_verification_email(&self, user_id: Uuid) -> Result<(), AccountError> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut inner = self.inner.write().await;
        let email = inner
            .accounts
            .get(&user_id)
            .map(|a| a.email.clone())
            .ok_or(AccountError::UnknownAccount)?;
        inner.pending.retain(|_, id| *id != user_id);
        inner.pending.insert(token.clone(), user_id);
        info!(%user_id, %email, %token, "verification email issued");
        Ok(())
    }

    async fn confirm_email(&self, token: &str) -> Result<Identity, AccountError> {
        let mut inner = self.inner.write().await;
        let user_id = inner
            .pending
            .remove(token.trim())
            .ok_or(AccountError::UnknownToken)?;
        let account = inner
            .accounts
            .get_mut(&user_id)
            .ok_or(AccountError::UnknownAccount)?;
        account.email_verified = true;
        debug!(%user_id, "email verified");
        Ok(account.identity())
    }

    async fn identity(&self, user_id: Uuid) -> Result<Identity, AccountError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&user_id)
            .map(Account::identity)
            .ok_or(AccountError::UnknownAccount)
    }

    async fn is_email_verified(&self, user_id: Uuid) -> Result<bool, AccountError> {
        Ok(self.identity(user_id).await?.email_verified)
    }

    async fn store_profile(&self, profile: UserProfile) -> Result<(), AccountError> {
        let mut inner = self.inner.write().await;
        if !inner.accounts.contains_key(&profile.id) {
            return Err(AccountError::UnknownAccount);
        }
        inner.profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AccountError> {
        Ok(self.inner.read().await.profiles.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[tokio::test]
    async fn create_and_sign_in() {
        let accounts = InMemoryAccounts::new();
        let created = accounts
            .create_account(" Jean@Example.fr ", "Passw0rd!")
            .await
            .expect("create");
        assert_eq!(created.email, "jean@example.fr");
        assert!(!created.email_verified);

        let signed = accounts
            .sign_in("jean@example.fr", "Passw0rd!")
            .await
            .expect("sign in");
        assert_eq!(signed.id, created.id);

        assert!(matches!(
            accounts.sign_in("jean@example.fr", "nope").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            accounts.sign_in("ghost@example.fr", "Passw0rd!").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let accounts = InMemoryAccounts::new();
        accounts
            .create_account("a@b.io", "Passw0rd!")
            .await
            .expect("first");
        assert!(matches!(
            accounts.create_account("A@B.io", "Other1!xx").await,
            Err(AccountError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn verification_token_is_single_use() {
        let accounts = InMemoryAccounts::new();
        let id = accounts
            .create_account("a@b.io", "Passw0rd!")
            .await
            .expect("create")
            .id;
        accounts.send_verification_email(id).await.expect("send");
        let first = accounts.pending_token(id).await.expect("token");
        accounts.send_verification_email(id).await.expect("resend");
        let token = accounts.pending_token(id).await.expect("token");
        assert_eq!(token.len(), TOKEN_LEN);

        if first != token {
            assert!(matches!(
                accounts.confirm_email(&first).await,
                Err(AccountError::UnknownToken)
            ));
        }
        assert!(!accounts.is_email_verified(id).await.expect("known"));
        assert!(accounts.confirm_email(&token).await.expect("confirm").email_verified);
        assert!(accounts.is_email_verified(id).await.expect("known"));
        assert!(matches!(
            accounts.confirm_email(&token).await,
            Err(AccountError::UnknownToken)
        ));
    }

    #[tokio::test]
    async fn profiles_need_an_account() {
        let accounts = InMemoryAccounts::new();
        let now = OffsetDateTime::now_utc();
        let mut profile = UserProfile {
            id: Uuid::new_v4(),
            name: "Jean".into(),
            surname: "Dupont".into(),
            age: 30,
            country: "France".into(),
            email: "a@b.io".into(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            accounts.store_profile(profile.clone()).await,
            Err(AccountError::UnknownAccount)
        ));

        profile.id = accounts
            .create_account("a@b.io", "Passw0rd!")
            .await
            .expect("create")
            .id;
        accounts.store_profile(profile.clone()).await.expect("store");
        assert_eq!(
            accounts.fetch_profile(profile.id).await.expect("fetch"),
            Some(profile)
        );
        assert_eq!(accounts.fetch_profile(Uuid::new_v4()).await.expect("fetch"), None);
    }
}
