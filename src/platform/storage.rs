//! High score persistence adapter
//!
//! A single scalar under one fixed key. Read once at engine construction,
//! written at most once per game over. Failures are logged and swallowed;
//! they never reach simulation logic.

/// Key/value store for the persisted high score
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: u32);
}

/// Browser LocalStorage store (wasm only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: u32) {
        match Self::storage() {
            Some(s) => {
                if s.set_item(key, &value.to_string()).is_err() {
                    log::warn!("failed to persist high score");
                }
            }
            None => log::warn!("local storage unavailable, high score not persisted"),
        }
    }
}

/// In-memory store for native builds and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a pre-existing high score
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
