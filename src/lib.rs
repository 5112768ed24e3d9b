//! Docker credential helper keeping registry logins in AWS Secrets Manager.
//!
//! All credentials live as one JSON document inside a single secret:
//!
//! ```json
//! {"https://registry.example": {"username": "ci", "password": "..."}}
//! ```
//!
//! Each invocation fetches that document, applies one verb and, for `store`
//! and `erase`, writes the whole document back. Concurrent writers are not
//! coordinated: the last write wins.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod store;
pub mod verb;

pub use backend::{BackendError, SecretBackend};
pub use config::Config;
pub use credentials::{CredentialRecord, CredentialSet, Credentials};
pub use error::{HelperError, Result};
pub use store::CredentialStore;
pub use verb::Verb;
