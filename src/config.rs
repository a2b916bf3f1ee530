use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::engine::DeletePolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Longest session a token may grant: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub delete_policy: DeletePolicy,
    pub max_body_bytes: usize,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_hours: i64 = try_load(&lookup, "TOKEN_TTL_HOURS", "24")?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            warn!("Invalid TOKEN_TTL_HOURS value: {token_ttl_hours}");
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_HOURS",
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_HOURS}"),
            });
        }

        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "3000")?,
            jwt_secret,
            token_ttl_hours,
            delete_policy: try_load(&lookup, "POST_DELETE_POLICY", "any")?,
            max_body_bytes: try_load(&lookup, "MAX_BODY_BYTES", "65536")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.delete_policy, DeletePolicy::AnyAuthenticated);
        assert_eq!(config.max_body_bytes, 65536);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("POST_DELETE_POLICY", "owner"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.delete_policy, DeletePolicy::OwnerOnly);
    }

    #[test]
    fn token_ttl_must_be_positive_and_bounded() {
        for ttl in ["0", "-600000", "10000000000000"] {
            let result =
                Config::from_lookup(lookup(&[("JWT_SECRET", "s"), ("TOKEN_TTL_HOURS", ttl)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { key: "TOKEN_TTL_HOURS", .. })),
                "TOKEN_TTL_HOURS={ttl} should be rejected"
            );
        }

        let max = MAX_TOKEN_TTL_HOURS.to_string();
        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("TOKEN_TTL_HOURS", max.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_hours, MAX_TOKEN_TTL_HOURS);
    }

    #[test]
    fn bad_values_are_rejected() {
        let result = Config::from_lookup(lookup(&[("JWT_SECRET", "s"), ("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
