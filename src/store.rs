//! Credential store over a single secret.
//!
//! The whole credential set lives in one JSON blob, so every verb is a
//! read-modify-write of that blob: fetch, decode, change in memory, encode and
//! write back in full. Nothing guards against a concurrent writer between the
//! fetch and the write; the last write wins.

use crate::backend::SecretBackend;
use crate::config::Config;
use crate::credentials::{CredentialRecord, CredentialSet, Credentials};
use crate::error::{HelperError, Result};
use crate::verb::Verb;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::debug;
use zeroize::Zeroizing;

pub struct CredentialStore<'a> {
    backend: &'a dyn SecretBackend,
    secret_name: String,
    kms_key_id: Option<String>,
}

impl<'a> CredentialStore<'a> {
    pub fn new(
        backend: &'a dyn SecretBackend,
        secret_name: impl Into<String>,
        kms_key_id: Option<String>,
    ) -> Self {
        Self {
            backend,
            secret_name: secret_name.into(),
            kms_key_id,
        }
    }

    pub fn from_config(backend: &'a dyn SecretBackend, config: &Config) -> Self {
        Self::new(backend, config.secret_name.clone(), config.kms_key_id.clone())
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Run one protocol verb, reading its input and writing its response.
    pub fn execute(&self, verb: Verb, input: impl BufRead, mut output: impl Write) -> Result<()> {
        debug!(%verb, secret = %self.secret_name, "executing");
        match verb {
            Verb::List => {
                let listing = self.list()?;
                serde_json::to_writer(&mut output, &listing).map_err(std::io::Error::from)?;
            }
            Verb::Get => {
                let url = read_input(input)?;
                if let Some(credentials) = self.get(&url)? {
                    serde_json::to_writer(&mut output, &credentials)
                        .map_err(std::io::Error::from)?;
                }
            }
            Verb::Store => {
                let line = Zeroizing::new(read_input(input)?);
                let credentials = parse_credentials(&line)?;
                self.store(&credentials)?;
            }
            Verb::Erase => {
                let url = read_input(input)?;
                self.erase(&url)?;
            }
        }
        output.flush()?;
        Ok(())
    }

    /// Every stored server URL mapped to its username.
    pub fn list(&self) -> Result<BTreeMap<String, String>> {
        let set = self.load_or_empty()?;
        Ok(set
            .usernames()
            .into_iter()
            .map(|(url, username)| (url.to_string(), username.to_string()))
            .collect())
    }

    /// Credentials for an exact server URL match, if any.
    pub fn get(&self, url: &str) -> Result<Option<Credentials>> {
        let url = require_url(url)?;
        let set = self.load_or_empty()?;
        Ok(set.get(url).map(|record| Credentials {
            server_url: url.to_string(),
            username: record.username.clone(),
            secret: record.password.clone(),
        }))
    }

    /// Add or replace the entry for `credentials.server_url`, creating the
    /// secret if it does not exist yet.
    pub fn store(&self, credentials: &Credentials) -> Result<()> {
        let url = require_url(&credentials.server_url)?;
        let (mut set, create) = match self.load() {
            Ok(set) => (set, false),
            Err(HelperError::NotFound(_)) => {
                debug!(secret = %self.secret_name, "secret missing, will create it");
                (CredentialSet::new(), true)
            }
            Err(e) => return Err(e),
        };
        set.insert(
            url.to_string(),
            CredentialRecord {
                username: credentials.username.clone(),
                password: credentials.secret.clone(),
            },
        );
        self.save(&set, create)
    }

    /// Remove the entry for `url`. Absent URLs leave the secret untouched.
    pub fn erase(&self, url: &str) -> Result<()> {
        let url = require_url(url)?;
        let mut set = self.load()?;
        if !set.remove(url) {
            debug!(secret = %self.secret_name, "nothing to erase");
            return Ok(());
        }
        self.save(&set, false)
    }

    fn load(&self) -> Result<CredentialSet> {
        debug!(secret = %self.secret_name, "fetching secret");
        let blob = Zeroizing::new(self.backend.fetch(&self.secret_name)?);
        // Only the position is reported: serde messages can quote stored values.
        serde_json::from_str(&blob).map_err(|e| {
            HelperError::Backend(format!(
                "secret `{}` does not hold a valid credential set (line {}, column {})",
                self.secret_name,
                e.line(),
                e.column()
            ))
        })
    }

    /// A missing secret reads as an empty credential set.
    fn load_or_empty(&self) -> Result<CredentialSet> {
        match self.load() {
            Err(HelperError::NotFound(_)) => Ok(CredentialSet::new()),
            other => other,
        }
    }

    fn save(&self, set: &CredentialSet, create: bool) -> Result<()> {
        let blob = Zeroizing::new(
            serde_json::to_string(set)
                .map_err(|e| HelperError::Backend(format!("Failed to encode credentials: {e}")))?,
        );
        if create {
            debug!(secret = %self.secret_name, entries = set.len(), "creating secret");
            self.backend
                .create(&self.secret_name, &blob, self.kms_key_id.as_deref())?;
        } else {
            debug!(secret = %self.secret_name, entries = set.len(), "overwriting secret");
            self.backend.overwrite(&self.secret_name, &blob)?;
        }
        Ok(())
    }
}

/// Read all of the input, each line stripped of surrounding whitespace and
/// the pieces concatenated.
pub fn read_input(input: impl BufRead) -> std::io::Result<String> {
    let mut joined = String::new();
    for line in input.lines() {
        let line = Zeroizing::new(line?);
        joined.push_str(line.trim());
    }
    Ok(joined)
}

fn parse_credentials(line: &str) -> Result<Credentials> {
    if line.is_empty() {
        return Err(HelperError::InvalidInput("no credentials provided".to_string()));
    }
    serde_json::from_str(line).map_err(|e| {
        HelperError::InvalidInput(format!(
            "malformed credentials (line {}, column {})",
            e.line(),
            e.column()
        ))
    })
}

/// The URL is used verbatim as the map key.
fn require_url(url: &str) -> Result<&str> {
    if url.is_empty() {
        return Err(HelperError::InvalidInput("no server URL provided".to_string()));
    }
    Ok(url)
}
