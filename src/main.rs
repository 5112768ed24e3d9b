use clap::Parser;
use docker_credential_aws_sm::backend::secrets_manager::SecretsManagerBackend;
use docker_credential_aws_sm::{Config, CredentialStore, HelperError, Verb, logging};
use std::io;
use tracing::debug;

/// Docker credential helper storing registry logins in AWS Secrets Manager.
///
/// Environment:
///   DOCKER_SECRETSMANAGER_NAME     secret holding the credentials (required)
///   DOCKER_SECRETSMANAGER_KEY_ARN  KMS key used when the secret is created
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Credential helper operation
    #[arg(value_enum, ignore_case = true)]
    verb: Verb,
}

fn run(verb: Verb) -> Result<(), HelperError> {
    let config = Config::from_env()?;
    let backend = SecretsManagerBackend::new()?;
    let store = CredentialStore::from_config(&backend, &config);
    debug!(secret = store.secret_name(), "credential store ready");
    store.execute(verb, io::stdin().lock(), io::stdout().lock())
}

fn main() {
    let cli = Cli::parse();
    logging::init();
    if let Err(e) = run(cli.verb) {
        eprintln!("docker-credential-aws-sm: {e}");
        std::process::exit(1);
    }
}
