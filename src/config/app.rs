use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::defaults::*;
use crate::aliases::Passphrase;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::crypto::{FieldCipher, KdfParams, Salt};
use crate::enums::DecryptFailurePolicy;
use crate::error::{Result, VaultError};

pub const ENV_CONFIG: &str = "CV_CONFIG";
pub const ENV_PASSPHRASE: &str = "CV_PASSPHRASE";
pub const ENV_DATABASE: &str = "CV_DATABASE";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    pub crypto: Crypto,
    pub vault: VaultSettings,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(deserialize_with = "deserialize_passphrase")]
    pub passphrase: Passphrase,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            passphrase: Passphrase::new(String::new()),
        }
    }
}

fn deserialize_passphrase<'de, D>(deserializer: D) -> std::result::Result<Passphrase, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Passphrase::new)
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Database {
    pub path: PathBuf,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Crypto {
    pub kdf_salt_hex: String,
    pub skip_kdf_slowdown: bool,
}

impl Default for Crypto {
    fn default() -> Self {
        Self {
            kdf_salt_hex: default_kdf_salt_hex(),
            skip_kdf_slowdown: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VaultSettings {
    pub decrypt_failure: DecryptFailurePolicy,
}

impl Config {
    pub fn passphrase(&self) -> &Passphrase {
        &self.server.passphrase
    }

    pub fn kdf_params(&self) -> KdfParams {
        if self.crypto.skip_kdf_slowdown {
            KdfParams::fast()
        } else {
            KdfParams::default()
        }
    }

    pub fn salt(&self) -> Result<Salt> {
        Ok(Salt::from_hex(&self.crypto.kdf_salt_hex)?)
    }

    /// Derive the field key from the configured passphrase.
    pub fn field_cipher(&self) -> Result<FieldCipher> {
        Ok(FieldCipher::derive(
            self.passphrase().expose_secret(),
            &self.salt()?,
            &self.kdf_params(),
        )?)
    }

    /// Apply `CV_PASSPHRASE` / `CV_DATABASE` style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(passphrase) = lookup(ENV_PASSPHRASE) {
            self.server.passphrase = Passphrase::new(passphrase);
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database.path = PathBuf::from(path);
        }
    }
}

pub fn from_toml_str(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        VaultError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
    })?;
    from_toml_str(&content)
}

/// Load from `CV_CONFIG` (or the default file), falling back to built-in
/// defaults when the file is absent, then apply environment overrides.
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        debug!(path = %config_path, "loading config");
        load_from(&config_path)?
    } else {
        warn!(path = %config_path, "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_overrides(|key| std::env::var(key).ok());
    Ok(conf)
}
