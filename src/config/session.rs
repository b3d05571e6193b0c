//! Session configuration
//!
//! Built once at startup from the resolved paths and the loaded credentials,
//! then passed to the budget session. Nothing downstream reads the
//! environment.

use std::fmt;
use std::path::PathBuf;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::credentials::Credentials;
use super::paths::ActualPaths;

/// Everything a budget session needs to start
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionConfig {
    /// Local cache directory owned by the session
    #[zeroize(skip)]
    pub data_dir: PathBuf,

    /// Server URL, always with a scheme and trailing slash
    pub server_url: String,

    pub password: String,

    /// Budget to download
    pub sync_id: String,

    /// Budget encryption password (empty when unencrypted)
    pub encryption_password: String,
}

impl SessionConfig {
    pub fn new(paths: &ActualPaths, credentials: &Credentials) -> Self {
        let actual = &credentials.actual;
        Self {
            data_dir: paths.cache_dir(),
            server_url: normalize_server_url(&actual.host),
            password: actual.server_password.clone(),
            sync_id: actual.sync_id.clone(),
            encryption_password: actual.encryption_password.clone(),
        }
    }

    pub fn encryption_password(&self) -> Option<&str> {
        if self.encryption_password.is_empty() {
            None
        } else {
            Some(&self.encryption_password)
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("data_dir", &self.data_dir)
            .field("server_url", &self.server_url)
            .field("sync_id", &self.sync_id)
            .finish_non_exhaustive()
    }
}

/// Bare hosts become `https://{host}/`; full URLs get a trailing slash
pub fn normalize_server_url(host: &str) -> String {
    let host = host.trim();
    let mut url = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
