//! Runtime configuration read from the environment

use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_SECRET: &str = "CHANGE_ME_SUPER_SECRET";
const DEFAULT_ADMIN_EMAIL: &str = "admin@ameotech.com";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me";
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
/// Floor for the session sweep interval
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub auth_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub session_ttl: Duration,
    pub sales_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let auth_secret = non_empty("AMEOTECH_AUTH_SECRET").unwrap_or_else(|| {
            tracing::warn!("AMEOTECH_AUTH_SECRET not set, using the development secret");
            DEFAULT_SECRET.to_string()
        });
        let admin_password = non_empty("AMEOTECH_ADMIN_PASSWORD").unwrap_or_else(|| {
            tracing::warn!("AMEOTECH_ADMIN_PASSWORD not set, using the development password");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        Self {
            port: non_empty("AMEOTECH_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            allowed_origins: non_empty("AMEOTECH_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            auth_secret,
            admin_email: non_empty("AMEOTECH_ADMIN_EMAIL")
                .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password,
            session_ttl: Duration::from_secs(
                non_empty("AMEOTECH_SESSION_TTL_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),
            sales_webhook_url: non_empty("SALES_WEBHOOK_URL"),
        }
    }

    /// How often idle sessions are swept
    pub fn sweep_interval(&self) -> Duration {
        (self.session_ttl / 4).max(MIN_SWEEP_INTERVAL)
    }
}
