use crate::auth::jwt::JwtConfig;

/// A named integration allowed to exchange its API key for a service token
/// (e.g. analytics, HR sync, chatbot).
#[derive(Debug, Clone)]
pub struct ServiceKey {
    pub name: String,
    pub key: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Service API keys, parsed from `SERVICE_API_KEYS` as comma-separated
    /// `name=key` pairs. Empty by default, which disables service tokens.
    pub service_keys: Vec<ServiceKey>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SERVICE_API_KEYS`     | (empty)                    |
    ///
    /// # Panics
    ///
    /// Panics on malformed values -- misconfiguration should fail at
    /// startup, not at first use.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let service_keys = parse_service_keys(
            &std::env::var("SERVICE_API_KEYS").unwrap_or_default(),
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            service_keys,
        }
    }
}

/// Parse `name=key` pairs out of the `SERVICE_API_KEYS` value.
///
/// # Panics
///
/// Panics on entries without a `=` or with an empty name or key.
fn parse_service_keys(raw: &str) -> Vec<ServiceKey> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, key) = entry
                .split_once('=')
                .unwrap_or_else(|| panic!("SERVICE_API_KEYS entry '{entry}' must be name=key"));
            assert!(
                !name.is_empty() && !key.is_empty(),
                "SERVICE_API_KEYS entry '{entry}' has an empty name or key"
            );
            ServiceKey {
                name: name.to_string(),
                key: key.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_service_keys() {
        let keys = parse_service_keys("analytics-service=abc123, hr-integration=def456");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name, "analytics-service");
        assert_eq!(keys[0].key, "abc123");
        assert_eq!(keys[1].name, "hr-integration");
    }

    #[test]
    fn empty_value_yields_no_keys() {
        assert!(parse_service_keys("").is_empty());
        assert!(parse_service_keys("  ").is_empty());
    }

    #[test]
    #[should_panic(expected = "must be name=key")]
    fn entry_without_separator_panics() {
        parse_service_keys("not-a-pair");
    }
}
