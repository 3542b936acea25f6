use crate::{error, Storage};
use std::{collections::BTreeMap, sync::Mutex};

/// Storage that lives as long as the process. Backs session storage unless a
/// directory is configured, and stands in for the file backend in tests.
#[derive(Default)]
pub struct MemoryStorage(Mutex<BTreeMap<String, String>>);

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> error::Result<Option<String>> {
        let map = self.0.lock().map_err(|_| error::Error::Fatal)?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> error::Result<()> {
        let mut map = self.0.lock().map_err(|_| error::Error::Fatal)?;
        map.insert(key.into(), value.into());
        Ok(())
    }

    fn clear(&self) -> error::Result<()> {
        self.0.lock().map_err(|_| error::Error::Fatal)?.clear();
        Ok(())
    }
}
