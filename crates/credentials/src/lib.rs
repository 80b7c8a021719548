//! Access-credential persistence for the globe viewer.
//!
//! The rendering engine requires a user-supplied access credential. Once a
//! credential is accepted it is stored under a fixed key and reused on
//! later initializations without re-prompting. Whether the credential is
//! actually valid is the engine's concern; this crate only moves the
//! string in and out of client-local storage.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    StorageUnavailable,
    Io(String),
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialError::StorageUnavailable => write!(f, "browser storage unavailable"),
            CredentialError::Io(msg) => write!(f, "credential storage error: {msg}"),
        }
    }
}

impl std::error::Error for CredentialError {}

pub trait CredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError>;
    fn save(&mut self, credential: &str) -> Result<(), CredentialError>;
    fn clear(&mut self) -> Result<(), CredentialError>;
}

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credential: Option<String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.credential.clone())
    }

    fn save(&mut self, credential: &str) -> Result<(), CredentialError> {
        self.credential = Some(credential.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CredentialError> {
        self.credential = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{CredentialError, CredentialStore};

    #[derive(Debug)]
    pub struct LocalStorageCredentialStore {
        key: String,
    }

    impl LocalStorageCredentialStore {
        pub fn new(key: impl Into<String>) -> Result<Self, CredentialError> {
            let store = Self { key: key.into() };

            // Probe storage up front so callers can fall back to an
            // in-memory store instead of failing on first save.
            let _ = window_local_storage()?;

            Ok(store)
        }
    }

    impl CredentialStore for LocalStorageCredentialStore {
        fn load(&self) -> Result<Option<String>, CredentialError> {
            let storage = window_local_storage()?;
            let raw = storage
                .get_item(&self.key)
                .map_err(|e| CredentialError::Io(format!("get_item failed: {:?}", e)))?;

            let Some(raw) = raw else {
                return Ok(None);
            };
            if raw.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(raw))
        }

        fn save(&mut self, credential: &str) -> Result<(), CredentialError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.key, credential)
                .map_err(|e| CredentialError::Io(format!("set_item failed: {:?}", e)))?;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), CredentialError> {
            let storage = window_local_storage()?;
            storage
                .remove_item(&self.key)
                .map_err(|e| CredentialError::Io(format!("remove_item failed: {:?}", e)))?;
            Ok(())
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, CredentialError> {
        let win = web_sys::window().ok_or(CredentialError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| CredentialError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(CredentialError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageCredentialStore {
    pub fn new(_key: impl Into<String>) -> Result<Self, CredentialError> {
        Err(CredentialError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CredentialStore for LocalStorageCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Err(CredentialError::StorageUnavailable)
    }

    fn save(&mut self, _credential: &str) -> Result<(), CredentialError> {
        Err(CredentialError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), CredentialError> {
        Err(CredentialError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialStore, InMemoryCredentialStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_empty() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = InMemoryCredentialStore::new();
        store.save("pk.eyJ1-example").unwrap();
        assert_eq!(store.load().unwrap(), Some("pk.eyJ1-example".to_string()));
    }

    #[test]
    fn save_overwrites_previous_value() {
        let mut store = InMemoryCredentialStore::new();
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap(), Some("second".to_string()));
    }

    #[test]
    fn clear_removes_the_credential() {
        let mut store = InMemoryCredentialStore::new();
        store.save("pk.eyJ1-example").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
