use super::{Registry, Storage, StorageError};

/// Keeps the "persisted" registry in memory. Serves as the test double
/// for [`super::file_storage::FileStorage`] and as a backend for
/// ephemeral ledgers.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    saved: Registry,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(registry: Registry) -> Self {
        Self { saved: registry }
    }

    /// The registry as of the last save.
    pub fn saved(&self) -> &Registry {
        &self.saved
    }
}

impl Storage for InMemoryStorage {
    fn load(&self) -> Result<Registry, StorageError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, registry: &Registry) -> Result<(), StorageError> {
        self.saved = registry.clone();
        Ok(())
    }
}
