use thiserror::Error;

pub type SecretName = str;
pub type SecretBlob = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("secret `{0}` does not exist")]
    NotFound(String),

    #[error("secret `{0}` already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    Service(String),
}

/// Backend trait for the remote secret holding the credential blob.
///
/// Every call moves the whole blob; there is no notion of individual
/// credentials at this level.
pub trait SecretBackend {
    /// Read the current value of a secret.
    fn fetch(&self, name: &SecretName) -> Result<SecretBlob, BackendError>;

    /// Create a new secret, encrypted with `kms_key_id` when given.
    fn create(
        &self,
        name: &SecretName,
        blob: &str,
        kms_key_id: Option<&str>,
    ) -> Result<(), BackendError>;

    /// Replace the value of an existing secret.
    fn overwrite(&self, name: &SecretName, blob: &str) -> Result<(), BackendError>;
}

pub mod memory;

#[cfg(feature = "aws-backend")]
pub mod secrets_manager;
