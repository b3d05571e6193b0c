//! `config` command

use crate::config::{ActualPaths, Credentials, SessionConfig};

/// Print resolved paths and the session target, secrets redacted
///
/// A missing or malformed credentials file is reported, not treated as a
/// failure.
pub fn handle_config_command(paths: &ActualPaths) {
    let credentials_file = paths.credentials_file();

    println!("actual-tools configuration");
    println!("==========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Credentials file: {}", credentials_file.display());
    println!("Cache directory:  {}", paths.cache_dir().display());
    println!();

    match Credentials::load(&credentials_file) {
        Ok(credentials) => {
            let config = SessionConfig::new(paths, &credentials);
            println!("Session:");
            println!("  Server:    {}", config.server_url);
            println!("  Sync id:   {}", config.sync_id);
            println!("  Password:  ********");
            println!(
                "  Encrypted: {}",
                if config.encryption_password().is_some() {
                    "yes"
                } else {
                    "no"
                }
            );
        }
        Err(e) => println!("Credentials: {}", e),
    }
}
