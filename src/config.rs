//! Process configuration, assembled once at startup from the environment.

use crate::error::ConfigError;
use chrono::FixedOffset;

const DEV_JWT_SECRET: &str = "blogpessoal-dev-secret-change-me";

/// Immutable settings passed explicitly to the listener, the services and the token issuer.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub cors_origin: String,
    /// Offset used when rendering post timestamps.
    pub utc_offset: FixedOffset,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    /// Read settings from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (environment, map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = match get("JWT_SECRET") {
            Some(s) => s,
            None => {
                tracing::warn!("JWT_SECRET not set; using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let bcrypt_cost: u32 = parse_or("BCRYPT_COST", get("BCRYPT_COST"), 10)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let jwt_ttl_secs: u64 = parse_or("JWT_TTL_SECS", get("JWT_TTL_SECS"), 3600)?;
        if jwt_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_TTL_SECS",
                value: "0".into(),
            });
        }

        let utc_offset = match get("TZ_OFFSET") {
            Some(raw) => parse_utc_offset(&raw).ok_or(ConfigError::Invalid {
                key: "TZ_OFFSET",
                value: raw,
            })?,
            None => FixedOffset::west_opt(3 * 3600).ok_or(ConfigError::Missing("TZ_OFFSET"))?,
        };

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", get("PORT"), 4000)?,
            database_url: get("DATABASE_URL"),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?,
            jwt_secret,
            jwt_issuer: get("JWT_ISSUER").unwrap_or_else(|| "blogpessoal".into()),
            jwt_ttl_secs,
            bcrypt_cost,
            cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| "https://meusite.com".into()),
            utc_offset,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), 1024 * 1024)?,
        })
    }

    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `Z` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = from_map(&[]).unwrap();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:4000");
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.jwt_issuer, "blogpessoal");
        assert_eq!(cfg.jwt_ttl_secs, 3600);
        assert_eq!(cfg.bcrypt_cost, 10);
        assert_eq!(cfg.cors_origin, "https://meusite.com");
        assert_eq!(cfg.utc_offset.local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_map(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", "s3cret"),
            ("BCRYPT_COST", "4"),
            ("TZ_OFFSET", "+05:30"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/blog"));
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.bcrypt_cost, 4);
        assert_eq!(cfg.utc_offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            from_map(&[("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            from_map(&[("BCRYPT_COST", "2")]),
            Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })
        ));
        assert!(matches!(
            from_map(&[("TZ_OFFSET", "-3h")]),
            Err(ConfigError::Invalid { key: "TZ_OFFSET", .. })
        ));
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_utc_offset("-03:00").unwrap().local_minus_utc(), -10800);
        assert_eq!(parse_utc_offset("+0100").unwrap().local_minus_utc(), 3600);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("03:00").is_none());
        assert!(parse_utc_offset("+24:00").is_none());
    }
}
