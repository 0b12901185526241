use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::store::schema::UserProgress;
use crate::store::{ProgressStore, StoreError};

const PROGRESS_FILE: &str = "progress.json";

/// File-backed store: one pretty-printed JSON document per data directory.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn progress_path(&self) -> PathBuf {
        self.base_dir.join(PROGRESS_FILE)
    }
}

impl ProgressStore for JsonStore {
    fn load(&self) -> Result<Option<UserProgress>, StoreError> {
        let path = self.progress_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write to a temp file, fsync, then rename over the old document so a
    /// crash never leaves a half-written file behind.
    fn save(&self, progress: &UserProgress) -> Result<(), StoreError> {
        let path = self.progress_path();
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(progress)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
