//! Credential types stored in the secret and exchanged with Docker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zeroize::Zeroize;

pub type ServerUrl = String;

/// One registry login as persisted inside the secret blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
}

impl Drop for CredentialRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Decoded form of the whole secret blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet(BTreeMap<ServerUrl, CredentialRecord>);

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&CredentialRecord> {
        self.0.get(url)
    }

    pub fn insert(&mut self, url: ServerUrl, record: CredentialRecord) {
        self.0.insert(url, record);
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, url: &str) -> bool {
        self.0.remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registry URL to username, without passwords.
    pub fn usernames(&self) -> BTreeMap<&str, &str> {
        self.0
            .iter()
            .map(|(url, record)| (url.as_str(), record.username.as_str()))
            .collect()
    }
}

/// Credentials in the shape the Docker helper protocol uses on stdin/stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "ServerURL")]
    pub server_url: ServerUrl,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Secret")]
    pub secret: String,
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, password: &str) -> CredentialRecord {
        CredentialRecord {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn set_encodes_as_plain_object() {
        let mut set = CredentialSet::new();
        set.insert("https://r.example".to_string(), record("u1", "p1"));
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"https://r.example":{"username":"u1","password":"p1"}}"#
        );
        assert_eq!(serde_json::to_string(&CredentialSet::new()).unwrap(), "{}");
    }

    #[test]
    fn set_rejects_entries_without_password() {
        let result = serde_json::from_str::<CredentialSet>(r#"{"a":{"username":"u"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn usernames_omit_passwords() {
        let mut set = CredentialSet::new();
        set.insert("a".to_string(), record("alice", "hunter2"));
        set.insert("b".to_string(), record("bob", "swordfish"));
        let usernames = set.usernames();
        assert_eq!(usernames.len(), 2);
        assert_eq!(usernames["a"], "alice");
        assert_eq!(usernames["b"], "bob");
    }

    #[test]
    fn credentials_use_protocol_field_names() {
        let creds: Credentials = serde_json::from_str(
            r#"{"ServerURL":"https://r.example","Username":"u1","Secret":"p1"}"#,
        )
        .unwrap();
        assert_eq!(creds.server_url, "https://r.example");
        assert_eq!(creds.username, "u1");
        assert_eq!(creds.secret, "p1");
    }
}
