//! Configuration loading and representation.

use std::net::SocketAddr;

use anyhow::Context;

const DEV_TOKEN_SECRET: &str = "dev-secret";

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub token_secret: String,
    pub token_ttl_secs: i64,
    /// Load the demo catalog into the in-memory store.
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            token_secret: DEV_TOKEN_SECRET.to_string(),
            token_ttl_secs: 12 * 60 * 60,
            seed_demo: true,
        }
    }
}

impl AppConfig {
    /// Read `QUICKORDER_*` variables from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("QUICKORDER_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("QUICKORDER_BIND_ADDR is not a socket address: {addr}"))?;
        }

        match lookup("QUICKORDER_TOKEN_SECRET") {
            Some(secret) if !secret.is_empty() => config.token_secret = secret,
            _ => tracing::warn!("QUICKORDER_TOKEN_SECRET not set; using insecure dev default"),
        }

        if let Some(ttl) = lookup("QUICKORDER_TOKEN_TTL_SECS") {
            let ttl: i64 = ttl
                .parse()
                .with_context(|| format!("QUICKORDER_TOKEN_TTL_SECS is not an integer: {ttl}"))?;
            anyhow::ensure!(ttl > 0, "QUICKORDER_TOKEN_TTL_SECS must be positive");
            config.token_ttl_secs = ttl;
        }

        if let Some(seed) = lookup("QUICKORDER_SEED_DEMO") {
            config.seed_demo = parse_flag(&seed)
                .with_context(|| format!("QUICKORDER_SEED_DEMO is not a boolean: {seed}"))?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
