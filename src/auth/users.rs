//! Dashboard accounts loaded from a TOML file:
//!
//! ```toml
//! [users]
//! william = "$argon2id$v=19$m=19456,t=2,p=1$..."
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::error;

use super::password::verify_password;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDirectory {
    #[serde(default)]
    users: BTreeMap<String, String>,
}

impl UserDirectory {
    /// Parse a users file body.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse users file")
    }

    /// Load the users file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read users file: {}", path.display()))?;
        Self::from_toml(&contents)
    }

    /// Build a directory from username/hash pairs.
    #[must_use]
    pub fn from_hashes<I, U, H>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            users: entries
                .into_iter()
                .map(|(u, h)| (u.into(), h.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check a username and password. Unknown users and malformed stored
    /// hashes both fail.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let Some(hash) = self.users.get(username) else {
            return false;
        };
        match verify_password(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                error!(username, "Stored password hash is invalid: {e:#}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;

    #[test]
    fn test_from_toml() {
        let dir = UserDirectory::from_toml(
            r#"
            [users]
            william = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA"
            "#,
        )
        .unwrap();
        assert_eq!(dir.len(), 1);
        assert!(UserDirectory::from_toml("").unwrap().is_empty());
        assert!(UserDirectory::from_toml("[users").is_err());
    }

    #[test]
    fn test_authenticate() {
        let hash = hash_password("senha123").unwrap();
        let dir = UserDirectory::from_hashes([("william", hash)]);

        assert!(dir.authenticate("william", "senha123"));
        assert!(!dir.authenticate("william", "senha124"));
        assert!(!dir.authenticate("someone", "senha123"));
    }

    #[test]
    fn test_authenticate_bad_hash() {
        let dir = UserDirectory::from_hashes([("william", "plaintext")]);
        assert!(!dir.authenticate("william", "plaintext"));
    }
}
