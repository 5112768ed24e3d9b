//! In-memory backend
//!
//! Keeps secrets in a map and records every write, so callers can assert
//! which remote operations a verb would have issued.

use super::{BackendError, SecretBackend, SecretBlob, SecretName};
use std::cell::RefCell;
use std::collections::HashMap;
use zeroize::Zeroize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    Create {
        name: String,
        blob: String,
        kms_key_id: Option<String>,
    },
    Overwrite {
        name: String,
        blob: String,
    },
}

#[derive(Default)]
pub struct MemoryBackend {
    secrets: RefCell<HashMap<String, SecretBlob>>,
    writes: RefCell<Vec<WriteCall>>,
    failure: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `blob` under `name`.
    pub fn with_secret(name: &str, blob: &str) -> Self {
        let backend = Self::new();
        backend
            .secrets
            .borrow_mut()
            .insert(name.to_string(), blob.to_string());
        backend
    }

    /// Backend whose every call fails with a service error.
    pub fn failing(message: &str) -> Self {
        Self {
            secrets: RefCell::default(),
            writes: RefCell::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn secret(&self, name: &str) -> Option<SecretBlob> {
        self.secrets.borrow().get(name).cloned()
    }

    pub fn remove(&self, name: &str) {
        if let Some(mut blob) = self.secrets.borrow_mut().remove(name) {
            blob.zeroize();
        }
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.borrow().clone()
    }

    pub fn creates(&self) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|w| matches!(w, WriteCall::Create { .. }))
            .count()
    }

    pub fn overwrites(&self) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|w| matches!(w, WriteCall::Overwrite { .. }))
            .count()
    }

    fn check(&self) -> Result<(), BackendError> {
        match &self.failure {
            Some(message) => Err(BackendError::Service(message.clone())),
            None => Ok(()),
        }
    }
}

impl Drop for MemoryBackend {
    fn drop(&mut self) {
        for blob in self.secrets.get_mut().values_mut() {
            blob.zeroize();
        }
    }
}

impl SecretBackend for MemoryBackend {
    fn fetch(&self, name: &SecretName) -> Result<SecretBlob, BackendError> {
        self.check()?;
        self.secrets
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(name.to_string()))
    }

    fn create(
        &self,
        name: &SecretName,
        blob: &str,
        kms_key_id: Option<&str>,
    ) -> Result<(), BackendError> {
        self.check()?;
        let mut secrets = self.secrets.borrow_mut();
        if secrets.contains_key(name) {
            return Err(BackendError::AlreadyExists(name.to_string()));
        }
        secrets.insert(name.to_string(), blob.to_string());
        self.writes.borrow_mut().push(WriteCall::Create {
            name: name.to_string(),
            blob: blob.to_string(),
            kms_key_id: kms_key_id.map(str::to_string),
        });
        Ok(())
    }

    fn overwrite(&self, name: &SecretName, blob: &str) -> Result<(), BackendError> {
        self.check()?;
        let mut secrets = self.secrets.borrow_mut();
        let Some(current) = secrets.get_mut(name) else {
            return Err(BackendError::NotFound(name.to_string()));
        };
        current.zeroize();
        *current = blob.to_string();
        self.writes.borrow_mut().push(WriteCall::Overwrite {
            name: name.to_string(),
            blob: blob.to_string(),
        });
        Ok(())
    }
}
