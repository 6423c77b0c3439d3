use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    /// Products per page on `GET /products`.
    pub page_size: usize,
    /// Interval a client should wait before polling verification status again.
    pub verification_recheck_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "curio".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "curio-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_or("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let page_size = env_or("PAGE_SIZE", 10usize).max(1);
        Ok(Self {
            jwt,
            page_size,
            verification_recheck_secs: env_or("VERIFICATION_RECHECK_SECS", 3),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("CURIO_TEST_PAGE_SIZE", "lots");
        assert_eq!(env_or("CURIO_TEST_PAGE_SIZE", 10usize), 10);
        std::env::set_var("CURIO_TEST_PAGE_SIZE", "25");
        assert_eq!(env_or("CURIO_TEST_PAGE_SIZE", 10usize), 25);
        std::env::remove_var("CURIO_TEST_PAGE_SIZE");
        assert_eq!(env_or("CURIO_TEST_PAGE_SIZE", 7usize), 7);
    }
}
