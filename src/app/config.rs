use clap::Parser;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::models::attempt::{AttemptLimits, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIME_WINDOW_SECS};

pub const SECRET_KEY_VAR: &str = "FOR4PAYMENTS_SECRET_KEY";
pub const TEST_SECRET_KEY: &str = "test_api_key_00000000000000000000000000000000";
pub const DEFAULT_QR_CODE_BASE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FOR4PAYMENTS_SECRET_KEY não configurada e chaves de teste desabilitadas (ALLOW_TEST_KEY)")]
    MissingSecretKey,
    #[error("PIX_QR_BASE_URL inválida: {0}")]
    InvalidQrBaseUrl(#[from] url::ParseError),
}

/// Gateway credential in effect.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretKey {
    Configured(String),
    /// Development-only stand-in when no key is configured.
    TestPlaceholder,
}

impl SecretKey {
    pub fn as_str(&self) -> &str {
        match self {
            SecretKey::Configured(key) => key,
            SecretKey::TestPlaceholder => TEST_SECRET_KEY,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SecretKey::TestPlaceholder)
    }
}

// Nunca imprimir a chave em claro
impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretKey::Configured(_) => f.write_str("SecretKey::Configured(***)"),
            SecretKey::TestPlaceholder => f.write_str("SecretKey::TestPlaceholder"),
        }
    }
}

/// Command-line overrides; anything left out comes from the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "pix-facade", about = "PIX payment façade for the Kit de Segurança checkout")]
pub struct Cli {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,
    /// Allow the placeholder secret key when FOR4PAYMENTS_SECRET_KEY is unset
    #[arg(long)]
    pub allow_test_key: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub server_port: u16,
    pub secret_key: Option<String>,
    pub allow_test_key: bool,
    pub max_attempts: usize,
    pub attempt_window_secs: u64,
    pub qr_code_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(&lookup, "PORT", 5000),
            secret_key: lookup(SECRET_KEY_VAR).filter(|key| !key.trim().is_empty()),
            allow_test_key: parse_or(&lookup, "ALLOW_TEST_KEY", cfg!(debug_assertions)),
            max_attempts: parse_or(&lookup, "MAX_TRANSACTION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            attempt_window_secs: parse_or(
                &lookup,
                "TRANSACTION_WINDOW_SECS",
                DEFAULT_TIME_WINDOW_SECS,
            ),
            qr_code_base_url: lookup("PIX_QR_BASE_URL")
                .unwrap_or_else(|| DEFAULT_QR_CODE_BASE_URL.to_string()),
        }
    }

    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.server_port = port;
        }
        if cli.allow_test_key {
            self.allow_test_key = true;
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }

    pub fn attempt_limits(&self) -> AttemptLimits {
        AttemptLimits {
            max_attempts: self.max_attempts,
            window_secs: self.attempt_window_secs,
        }
    }

    pub fn qr_code_base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.qr_code_base_url)?)
    }

    /// Picks the gateway key. Falling back to the placeholder needs
    /// `allow_test_key`, which release builds leave off.
    pub fn resolve_secret_key(&self) -> Result<SecretKey, ConfigError> {
        match &self.secret_key {
            Some(key) => Ok(SecretKey::Configured(key.clone())),
            None if self.allow_test_key => {
                warn!(
                    "{} ausente: usando chave API de teste para desenvolvimento. NÃO use em produção.",
                    SECRET_KEY_VAR
                );
                Ok(SecretKey::TestPlaceholder)
            }
            None => Err(ConfigError::MissingSecretKey),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_with(&[]);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.secret_key, None);
        assert_eq!(config.attempt_limits(), AttemptLimits::default());
        assert_eq!(config.qr_code_base_url, DEFAULT_QR_CODE_BASE_URL);
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = config_with(&[
            ("PORT", "8080"),
            ("MAX_TRANSACTION_ATTEMPTS", "3"),
            ("TRANSACTION_WINDOW_SECS", "not-a-number"),
        ]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.attempt_window_secs, DEFAULT_TIME_WINDOW_SECS);
    }

    #[test]
    fn configured_key_wins() {
        let config = config_with(&[(SECRET_KEY_VAR, "sk_live_abcdef"), ("ALLOW_TEST_KEY", "false")]);
        let key = config.resolve_secret_key().unwrap();
        assert_eq!(key, SecretKey::Configured("sk_live_abcdef".to_string()));
        assert!(!format!("{key:?}").contains("abcdef"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_with(&[(SECRET_KEY_VAR, "   "), ("ALLOW_TEST_KEY", "true")]);
        assert_eq!(config.resolve_secret_key().unwrap(), SecretKey::TestPlaceholder);
    }

    #[test]
    fn missing_key_without_test_mode_is_an_error() {
        let config = config_with(&[("ALLOW_TEST_KEY", "false")]);
        assert!(matches!(
            config.resolve_secret_key(),
            Err(ConfigError::MissingSecretKey)
        ));
    }

    #[test]
    fn cli_overrides_environment() {
        let config = config_with(&[("PORT", "8080"), ("ALLOW_TEST_KEY", "false")]);
        let cli = Cli::parse_from(["pix-facade", "--port", "9000", "--allow-test-key"]);
        let config = config.apply_cli(cli);

        assert_eq!(config.server_port, 9000);
        assert!(config.allow_test_key);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn invalid_qr_base_url_is_reported() {
        let config = config_with(&[("PIX_QR_BASE_URL", "not a url")]);
        assert!(matches!(
            config.qr_code_base_url(),
            Err(ConfigError::InvalidQrBaseUrl(_))
        ));
    }
}
