//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//! - `STOREFRONT_JWT_SECRET` - Bearer token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `LISTING_API_URL` - Base URL of the listing-copy generation service
//! - `MAX_UPLOAD_BYTES` - Generic upload size ceiling (default: 5 MiB)
//! - `MAX_AVATAR_BYTES` - Avatar upload size ceiling (default: 2 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default base URL of the external listing-copy generation service.
const DEFAULT_LISTING_API_URL: &str = "https://hsi-battle.onrender.com";

/// Default generic upload ceiling (5 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default avatar upload ceiling (2 MiB).
const DEFAULT_MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Substrings that mark a secret as an unfilled template value.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub jwt_secret: SecretString,
    /// Base URL of the external listing-copy generation service
    pub listing_api_url: String,
    /// Upload size ceiling for generic file uploads, in bytes
    pub max_upload_bytes: usize,
    /// Upload size ceiling for avatar uploads, in bytes
    pub max_avatar_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or
    /// unparseable, or when the signing secret fails the placeholder,
    /// entropy, or length checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: database_url("STOREFRONT_DATABASE_URL")?,
            host: parse_var("STOREFRONT_HOST", "127.0.0.1")?,
            port: parse_var("STOREFRONT_PORT", "3000")?,
            jwt_secret: signing_secret("STOREFRONT_JWT_SECRET")?,
            listing_api_url: var_or("LISTING_API_URL", DEFAULT_LISTING_API_URL),
            max_upload_bytes: byte_ceiling("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            max_avatar_bytes: byte_ceiling("MAX_AVATAR_BYTES", DEFAULT_MAX_AVATAR_BYTES)?,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read the database URL, falling back to the generic `DATABASE_URL`
/// that managed Postgres providers set.
fn database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Read an environment variable with a default.
fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable with a default.
fn parse_var<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var_or(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Read a byte-size variable, keeping the default when unset.
fn byte_ceiling(key: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Read the signing secret and reject weak values.
fn signing_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    check_secret_strength(&value, key)?;
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }
    Ok(SecretString::from(value))
}

/// Reject placeholder text and low-entropy strings.
fn check_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy of a string, in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // secrets are far below f64 integer precision
    let len = s.len() as f64;
    counts
        .values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_empty_string_is_zero() {
        assert!(shannon_entropy("").abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_repeated_char_is_zero() {
        assert!(shannon_entropy("zzzzzzzzz").abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_even_two_char_mix_is_one_bit() {
        assert!((shannon_entropy("abababab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn entropy_of_random_string_clears_threshold() {
        assert!(shannon_entropy("q7#Fp2!wJ9$kR4%dT1&") > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn placeholder_secret_is_rejected() {
        let err = check_secret_strength("your-signing-key-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));

        assert!(check_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn low_entropy_secret_is_rejected() {
        let result = check_secret_strength(&"a".repeat(40), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn strong_secret_is_accepted() {
        assert!(check_secret_strength("q7#Fp2!wJ9$kR4%dT1&mZ8^bN3*vX6(c", "TEST_VAR").is_ok());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            jwt_secret: SecretString::from("x".repeat(32)),
            listing_api_url: DEFAULT_LISTING_API_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
            sentry_dsn: None,
            sentry_environment: None,
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn default_ceilings() {
        assert_eq!(DEFAULT_MAX_AVATAR_BYTES, 2 * 1024 * 1024);
        assert_eq!(DEFAULT_MAX_UPLOAD_BYTES, 5 * 1024 * 1024);
    }
}
