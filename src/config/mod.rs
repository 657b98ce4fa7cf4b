//! Application configuration management

use std::env;

use anyhow::Result;

use crate::services::events::DEFAULT_EVENT_CAPACITY;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// JWT secret for token signing and verification
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    pub token_lifetime: i64,

    /// Per-subscriber event buffer capacity
    pub event_capacity: usize,

    /// Load the demo catalog on startup
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4000);

        // JWT_SECRET should be set explicitly in production. For
        // development, fall back to a random per-process secret, which
        // invalidates outstanding tokens on restart.
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};
            let mut hasher = DefaultHasher::new();
            std::time::SystemTime::now().hash(&mut hasher);
            format!("dev-secret-{}", hasher.finish())
        });

        let token_lifetime = env::var("TOKEN_LIFETIME_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let event_capacity = env::var("EVENT_BUFFER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EVENT_CAPACITY);

        let seed_demo = env::var("SEED_DEMO_DATA")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            port,
            jwt_secret,
            token_lifetime,
            event_capacity,
            seed_demo,
        })
    }
}
