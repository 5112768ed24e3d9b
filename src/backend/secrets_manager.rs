//! AWS Secrets Manager backend
//!
//! The SDK is async only; the backend owns a current-thread runtime and
//! blocks on each call so the rest of the helper stays synchronous.
//! Region and credentials come from the SDK's default provider chain.

use super::{BackendError, SecretBackend, SecretBlob, SecretName};
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

pub struct SecretsManagerBackend {
    runtime: Runtime,
    client: Client,
}

impl SecretsManagerBackend {
    pub fn new() -> Result<Self, BackendError> {
        let runtime = Self::runtime()?;
        let config = runtime.block_on(aws_config::load_defaults(BehaviorVersion::latest()));
        debug!(region = ?config.region(), "loaded AWS configuration");
        let client = Client::new(&config);
        Ok(Self { runtime, client })
    }

    /// Backend over an already configured client.
    pub fn with_client(client: Client) -> Result<Self, BackendError> {
        Ok(Self {
            runtime: Self::runtime()?,
            client,
        })
    }

    fn runtime() -> Result<Runtime, BackendError> {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::Service(format!("Failed to start runtime: {e}")))
    }
}

impl SecretBackend for SecretsManagerBackend {
    fn fetch(&self, name: &SecretName) -> Result<SecretBlob, BackendError> {
        let result = self
            .runtime
            .block_on(self.client.get_secret_value().secret_id(name).send());
        let output = match result {
            Ok(output) => output,
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception()) =>
            {
                return Err(BackendError::NotFound(name.to_string()));
            }
            Err(e) => {
                return Err(BackendError::Service(format!(
                    "GetSecretValue failed for `{name}`: {}",
                    DisplayErrorContext(&e)
                )));
            }
        };
        output.secret_string().map(str::to_string).ok_or_else(|| {
            BackendError::Service(format!("Secret `{name}` has no string value"))
        })
    }

    fn create(
        &self,
        name: &SecretName,
        blob: &str,
        kms_key_id: Option<&str>,
    ) -> Result<(), BackendError> {
        let request = self
            .client
            .create_secret()
            .name(name)
            .secret_string(blob)
            .set_kms_key_id(kms_key_id.map(str::to_string));
        match self.runtime.block_on(request.send()) {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_exists_exception()) =>
            {
                Err(BackendError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(BackendError::Service(format!(
                "CreateSecret failed for `{name}`: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }

    fn overwrite(&self, name: &SecretName, blob: &str) -> Result<(), BackendError> {
        let request = self
            .client
            .put_secret_value()
            .secret_id(name)
            .secret_string(blob);
        match self.runtime.block_on(request.send()) {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception()) =>
            {
                Err(BackendError::NotFound(name.to_string()))
            }
            Err(e) => Err(BackendError::Service(format!(
                "PutSecretValue failed for `{name}`: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }
}
