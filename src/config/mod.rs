use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::storage::StorageError;

const TMP_SUFFIX: &str = "tmp";

fn default_currency() -> String {
    "SAR".into()
}

/// User-facing settings. Kept deliberately small: a display currency label
/// and an optional override for where the books are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            data_dir: None,
        }
    }
}

/// Loads and saves the config file under the platform config directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StorageError> {
        Self::from_base(default_config_dir())
    }

    #[cfg(test)]
    pub fn with_base_dir(base: PathBuf) -> Result<Self, StorageError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join("config.json"),
        })
    }

    /// Returns the stored config, or the default when the file is absent or
    /// unparsable.
    pub fn load(&self) -> Config {
        if !self.path.exists() {
            return Config::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                tracing::warn!(%err, "config file is malformed; using defaults");
                Config::default()
            }),
            Err(err) => {
                tracing::warn!(%err, "failed to read config file; using defaults");
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("partner_books")
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
