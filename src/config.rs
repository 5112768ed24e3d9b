//! Environment configuration.
//!
//! - `DOCKER_SECRETSMANAGER_NAME`: secret holding the credentials (required)
//! - `DOCKER_SECRETSMANAGER_KEY_ARN`: KMS key used when the secret is created
//!
//! AWS credentials and region are read by the SDK itself (`AWS_PROFILE`,
//! `AWS_REGION`, ...).

use figment::providers::Env;
use thiserror::Error;

pub const NAME_VAR: &str = "DOCKER_SECRETSMANAGER_NAME";
pub const KEY_ARN_VAR: &str = "DOCKER_SECRETSMANAGER_KEY_ARN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DOCKER_SECRETSMANAGER_NAME not set or invalid")]
    MissingSecretName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub secret_name: String,
    pub kms_key_id: Option<String>,
}

impl Config {
    /// `Env::var` returns the raw string, so names like `12345` or `true`
    /// are never coerced into numbers or booleans.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(Env::var(NAME_VAR), Env::var(KEY_ARN_VAR))
    }

    pub fn from_values(
        name: Option<String>,
        key_arn: Option<String>,
    ) -> Result<Self, ConfigError> {
        let secret_name = name
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::MissingSecretName)?;
        let kms_key_id = key_arn.filter(|k| !k.is_empty());

        Ok(Self {
            secret_name,
            kms_key_id,
        })
    }
}
