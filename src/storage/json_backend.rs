use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::{Result, StorageBackend, StoreKey};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence: one file per stored collection under
/// a single data directory, written atomically via a staging file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Opens storage rooted at `dir`, defaulting to the platform data
    /// directory, and creates it if needed.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.dir
    }

    pub fn collection_path(&self, key: StoreKey) -> PathBuf {
        self.dir
            .join(format!("{}.{}", key.as_str(), FILE_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn load_raw(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.collection_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save_raw(&self, key: StoreKey, json: &str) -> Result<()> {
        let path = self.collection_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn wipe(&self) -> Result<()> {
        for key in StoreKey::ALL {
            let path = self.collection_path(key);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sale;
    use crate::storage::{load_or_default, save_collection};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let sales = vec![Sale::new("Customer", 150.0, "Design", "42", date)];

        save_collection(&storage, StoreKey::Sales, &sales).expect("save sales");
        let loaded: Vec<Sale> = load_or_default(&storage, StoreKey::Sales);
        assert_eq!(loaded, sales);
    }

    #[test]
    fn absent_key_loads_default() {
        let (storage, _guard) = storage_with_temp_dir();
        let loaded: Vec<Sale> = load_or_default(&storage, StoreKey::Sales);
        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_data_loads_default() {
        let (storage, _guard) = storage_with_temp_dir();
        storage
            .save_raw(StoreKey::Expenses, "{ not json")
            .expect("write raw");
        let loaded: Vec<Sale> = load_or_default(&storage, StoreKey::Expenses);
        assert!(loaded.is_empty());
    }

    #[test]
    fn wipe_removes_every_collection_file() {
        let (storage, _guard) = storage_with_temp_dir();
        for key in StoreKey::ALL {
            storage.save_raw(key, "[]").expect("seed key");
        }
        storage.wipe().expect("wipe");
        for key in StoreKey::ALL {
            assert!(!storage.collection_path(key).exists());
        }
    }
}
