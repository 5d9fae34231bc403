//! Browser-backed persistence: `localStorage` and anchor-click downloads

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

use super::{FileExchange, KeyValueStore};
use crate::models::{FontError, Result};

fn js_error(context: &str, e: JsValue) -> FontError {
    FontError::Storage(format!("{}: {:?}", context, e))
}

/// `window.localStorage`
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| FontError::Storage("No window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage unavailable", e))?
            .ok_or_else(|| FontError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .storage
            .get_item(key)
            .map_err(|e| js_error("localStorage read failed", e))?;
        Ok(value.map(String::into_bytes))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| FontError::Storage(format!("Value is not UTF-8: {}", e)))?;
        self.storage
            .set_item(key, text)
            .map_err(|e| js_error("localStorage write failed", e))
    }
}

/// Triggers a download through a temporary object URL
#[derive(Default)]
pub struct BrowserDownload;

impl FileExchange for BrowserDownload {
    fn offer_download(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| FontError::Storage("No window available".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| FontError::Storage("No document available".to_string()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type("application/json");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("Blob creation failed", e))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| js_error("Object URL creation failed", e))?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| js_error("Anchor creation failed", e))?
            .dyn_into()
            .map_err(|_| FontError::Storage("Element is not an anchor".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(name);
        anchor.click();

        Url::revoke_object_url(&url).map_err(|e| js_error("Object URL revoke failed", e))
    }
}
