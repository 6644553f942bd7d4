use anyhow::{anyhow, Context as _};
use web_sys::wasm_bindgen::JsValue;

use super::KeyValueStore;

/// The page's local storage, shared by every tab of the same origin
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> anyhow::Result<Self> {
        let window = web_sys::window().context("no window available")?;
        let storage = window
            .local_storage()
            .map_err(js_err)?
            .context("local storage is disabled")?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        // Fails when the quota is exceeded or storage is blocked
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.storage.remove_item(key).map_err(js_err)
    }
}

fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("browser storage error: {value:?}")
}
