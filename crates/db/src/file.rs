use crate::{error, Storage};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const EXTENSION: &str = "json";

/// Keeps each key in its own file within a directory.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Opens the directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> error::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + EXTENSION.len() + 1);
        for &byte in key.as_bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push('%');
                name.push_str(&hex::encode([byte]));
            }
        }
        name.push('.');
        name.push_str(EXTENSION);
        self.root.join(name)
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> error::Result<Option<String>> {
        match fs::read_to_string(self.path_of(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> error::Result<()> {
        // Readers must never observe a half-written payload.
        let path = self.path_of(key);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;
        log::debug!("Wrote {} bytes to {}.", value.len(), path.display());
        Ok(())
    }

    fn clear(&self) -> error::Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
