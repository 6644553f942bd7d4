//! Key-value persistence the session record is kept in.
//!
//! The browser build uses the page's local storage, native hosts use a RON
//! file and tests use memory. All of them are shared by every clone, the same
//! way two tabs share one local storage.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// String to string storage that survives page loads
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a key that is not present is not an error
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}
