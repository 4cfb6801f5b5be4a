//! Process configuration from environment variables.
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `BIND_HOST`              | `0.0.0.0` |
//! | `PORT`                   | `8000`    |
//! | `REORDER_CRITICAL_DAYS`  | `1.0`     |
//! | `REORDER_THRESHOLD_DAYS` | `5.0`     |
//! | `REORDER_NO_DEMAND_DAYS` | `999.0`   |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use vendorhub_analytics::{AnalyticsError, ReorderPolicy};

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("reorder policy rejected: {0}")]
    Policy(#[from] AnalyticsError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub policy: ReorderPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            policy: ReorderPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset keys fall back to defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host: IpAddr = parse_or(&lookup, "BIND_HOST", defaults.bind_addr.ip())?;
        let port: u16 = parse_or(&lookup, "PORT", defaults.bind_addr.port())?;

        let policy = ReorderPolicy {
            critical_days: parse_or(&lookup, "REORDER_CRITICAL_DAYS", defaults.policy.critical_days)?,
            reorder_days: parse_or(&lookup, "REORDER_THRESHOLD_DAYS", defaults.policy.reorder_days)?,
            no_demand_days: parse_or(&lookup, "REORDER_NO_DEMAND_DAYS", defaults.policy.no_demand_days)?,
        };
        policy.validate()?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            policy,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(cfg.policy, ReorderPolicy::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("BIND_HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("REORDER_CRITICAL_DAYS", "2"),
            ("REORDER_THRESHOLD_DAYS", " 7.5 "),
        ]))
        .unwrap();

        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(cfg.policy.critical_days, 2.0);
        assert_eq!(cfg.policy.reorder_days, 7.5);
        assert_eq!(cfg.policy.no_demand_days, 999.0);
    }

    #[test]
    fn rejects_unparsable_values() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn rejects_inconsistent_policy() {
        let err = AppConfig::from_lookup(lookup(&[
            ("REORDER_CRITICAL_DAYS", "6"),
            ("REORDER_THRESHOLD_DAYS", "5"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Policy(_)));
    }
}
