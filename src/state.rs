use std::sync::Arc;

use crate::accounts::{AccountBackend, InMemoryAccounts};
use crate::config::AppConfig;
use crate::products::store::CollectionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountBackend>,
    pub collections: Arc<CollectionStore>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let accounts = Arc::new(InMemoryAccounts::new()) as Arc<dyn AccountBackend>;
        Ok(Self::from_parts(config, accounts))
    }

    pub fn from_parts(config: Arc<AppConfig>, accounts: Arc<dyn AccountBackend>) -> Self {
        Self {
            config,
            accounts,
            collections: Arc::new(CollectionStore::new()),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            page_size: 2,
            verification_recheck_secs: 3,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(Self::test_config(), Arc::new(InMemoryAccounts::new()))
    }
}
