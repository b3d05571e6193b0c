//! Credentials for the budgeting server
//!
//! Loaded once per run from `credentials.json`:
//!
//! ```json
//! { "actual": { "host": "...", "server_password": "...",
//!               "encryption_password": "...", "sync_id": "..." } }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ActualError;

/// Connection details for one budget; passwords are wiped on drop
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ServerCredentials {
    pub host: String,
    pub server_password: String,
    #[serde(default)]
    pub encryption_password: String,
    pub sync_id: String,
}

impl ServerCredentials {
    /// Encryption password, if the budget uses one
    pub fn encryption_password(&self) -> Option<&str> {
        if self.encryption_password.is_empty() {
            None
        } else {
            Some(&self.encryption_password)
        }
    }
}

impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("host", &self.host)
            .field("server_password", &"<redacted>")
            .field("encryption_password", &"<redacted>")
            .field("sync_id", &self.sync_id)
            .finish()
    }
}

/// Top-level shape of credentials.json
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub actual: ServerCredentials,
}

impl Credentials {
    /// Load and validate credentials from `path`
    ///
    /// # Errors
    ///
    /// `ActualError::Config` if the file is missing, is not valid JSON, lacks
    /// a required key, or has an empty host or sync id.
    pub fn load(path: &Path) -> Result<Self, ActualError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ActualError::Config(format!(
                "Failed to read JSON file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&contents).map_err(|e| match e {
            ActualError::Config(msg) => {
                ActualError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate credentials from a JSON string
    pub fn parse(contents: &str) -> Result<Self, ActualError> {
        let credentials: Credentials = serde_json::from_str(contents)
            .map_err(|e| ActualError::Config(format!("Failed to parse JSON file: {}", e)))?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ActualError> {
        let mut missing = Vec::new();
        if self.actual.host.trim().is_empty() {
            missing.push("host");
        }
        if self.actual.sync_id.trim().is_empty() {
            missing.push("sync_id");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ActualError::Config(format!(
                "Empty credential fields: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"{
        "actual": {
            "host": "budget.example.com",
            "server_password": "hunter2",
            "encryption_password": "",
            "sync_id": "0b1c2d3e"
        }
    }"#;

    #[test]
    fn test_parse_valid() {
        let creds = Credentials::parse(VALID).unwrap();
        assert_eq!(creds.actual.host, "budget.example.com");
        assert_eq!(creds.actual.sync_id, "0b1c2d3e");
        assert_eq!(creds.actual.encryption_password(), None);
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let creds = Credentials::parse(VALID).unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Credentials::parse("{ not json").unwrap_err();
        assert!(matches!(err, ActualError::Config(_)));
        assert!(err.to_string().contains("Failed to parse JSON file"));
    }

    #[test]
    fn test_missing_key() {
        let err = Credentials::parse(r#"{"actual": {"host": "h"}}"#).unwrap_err();
        assert!(matches!(err, ActualError::Config(_)));
    }

    #[test]
    fn test_empty_sync_id() {
        let json = VALID.replace("0b1c2d3e", "");
        let err = Credentials::parse(&json).unwrap_err();
        assert!(err.to_string().contains("sync_id"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        let err = Credentials::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read JSON file"));
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, VALID).unwrap();
        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.actual.server_password, "hunter2");
    }
}
