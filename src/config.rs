use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::model::leave_balance::LeavePolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    /// Allocation used when a balance has to be created on first lookup
    pub default_policy: LeavePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            rate_protected_per_min: 1000,
            default_policy: LeavePolicy {
                el: 12,
                cl: 12,
                sl: 12,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", defaults.rate_protected_per_min)?,
            default_policy: LeavePolicy {
                el: var_or("DEFAULT_EL_ALLOCATION", defaults.default_policy.el)?,
                cl: var_or("DEFAULT_CL_ALLOCATION", defaults.default_policy.cl)?,
                sl: var_or("DEFAULT_SL_ALLOCATION", defaults.default_policy.sl)?,
            },
        })
    }
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
