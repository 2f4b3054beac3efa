use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Reads configuration once at startup. A missing signing secret or
    /// database URL aborts the process rather than failing per-request.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok())?,
        };
        Ok(Self { database_url, jwt })
    }
}

/// Token lifetime in minutes, default 15. A zero or negative value would
/// wrap when converted to a Duration, so it is rejected here instead of
/// being discovered at signing time.
fn parse_ttl_minutes(raw: Option<String>) -> anyhow::Result<i64> {
    let ttl = match raw {
        Some(v) => v
            .parse::<i64>()
            .context("JWT_TTL_MINUTES must be an integer")?,
        None => 15,
    };
    anyhow::ensure!(ttl > 0, "JWT_TTL_MINUTES must be positive");
    Ok(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_to_fifteen_minutes() {
        assert_eq!(parse_ttl_minutes(None).unwrap(), 15);
    }

    #[test]
    fn ttl_accepts_a_positive_override() {
        assert_eq!(parse_ttl_minutes(Some("30".into())).unwrap(), 30);
    }

    #[test]
    fn ttl_rejects_zero_and_negative_values() {
        assert!(parse_ttl_minutes(Some("0".into())).is_err());
        assert!(parse_ttl_minutes(Some("-5".into())).is_err());
    }

    #[test]
    fn ttl_rejects_garbage() {
        assert!(parse_ttl_minutes(Some("soon".into())).is_err());
    }
}
