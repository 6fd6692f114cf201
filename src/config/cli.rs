use crate::core::StateStore;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// File-backed state store: one JSON blob per page under the state
/// directory.
#[derive(Debug, Clone)]
pub struct LocalStateStore {
    base_path: String,
}

impl LocalStateStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl StateStore for LocalStateStore {
    async fn read_state(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let full_path = Path::new(&self.base_path).join(name);
        match fs::read(full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_state(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
