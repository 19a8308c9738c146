use alloc::string::{String, ToString};
use hashbrown::HashMap;
use thiserror::Error;

/// Key the engine checkpoints under unless told otherwise.
pub const DEFAULT_SAVE_KEY: &str = "suijaku:game";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Store write failed: {0}")]
pub struct StoreError(pub String);

/// Key/value string store the engine checkpoints into. Implementations are
/// supplied by the embedder (browser local storage, a settings file, ...);
/// the engine only needs exact round-tripping of whole values.
pub trait SaveStore {
    fn save(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
    fn load(&self, key: &str) -> Option<String>;
    fn clear(&mut self, key: &str);
}

/// In-memory store, used by tests and embedders without real persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
