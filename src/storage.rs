//! Persistence collaborators for encoded sheets.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use crate::{Error, Result};

/// Stores encoded sheet bytes and returns an opaque locator for them.
///
/// The pipeline only needs the locator back; what it means (a file name, an
/// object key) is the implementation's business.
pub trait SheetStore: Send + Sync {
    fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String>;
}

/// Stores sheets as files under a directory, creating it on first use.
/// The locator is the file name.
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory sheets are written into.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl SheetStore for DirectoryStore {
    fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .map_err(|e| Error::StoreFailed(format!("create {:?}: {}", self.dir, e)))?;
        }
        let path = self.dir.join(suggested_name);
        fs::write(&path, bytes)
            .map_err(|e| Error::StoreFailed(format!("write {:?}: {}", path, e)))?;
        info!("stored sheet at {:?} ({} bytes)", path, bytes.len());
        Ok(suggested_name.to_string())
    }
}

/// A timestamp-derived file name for a freshly built sheet.
pub fn timestamped_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("sprite-{}.png", millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_store_creates_dir_and_returns_name() {
        let dir = std::env::temp_dir().join(format!("spritepress-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let store = DirectoryStore::new(&dir);
        let locator = store.store(b"png bytes", "sprite-1.png").unwrap();
        assert_eq!(locator, "sprite-1.png");
        assert_eq!(fs::read(dir.join("sprite-1.png")).unwrap(), b"png bytes");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn timestamped_name_has_expected_shape() {
        let name = timestamped_name();
        assert!(name.starts_with("sprite-"));
        assert!(name.ends_with(".png"));
    }
}
