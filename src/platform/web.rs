//! Browser bindings (wasm32 only)

use wasm_bindgen::JsValue;

use crate::error::BingoError;
use crate::persistence::KeyValueStore;
use crate::selector::CardRequest;

fn js_reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// `window.localStorage`
pub struct WebStore {
    storage: web_sys::Storage,
}

impl WebStore {
    /// None when storage is disabled (private mode, sandboxed iframe)
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>, BingoError> {
        self.storage
            .get_item(key)
            .map_err(|err| BingoError::PersistenceRead {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BingoError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| BingoError::PersistenceWrite {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }

    fn delete(&mut self, key: &str) -> Result<(), BingoError> {
        self.storage
            .remove_item(key)
            .map_err(|err| BingoError::PersistenceWrite {
                key: key.to_string(),
                reason: js_reason(&err),
            })
    }
}

/// Origin + path of the current page, without query or hash
pub fn page_base_url() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return String::new();
    };
    let origin = location.origin().unwrap_or_default();
    let path = location.pathname().unwrap_or_default();
    format!("{}{}", origin, path)
}

/// Query string of the current page
pub fn page_request() -> CardRequest {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    CardRequest::parse(&search)
}

/// Rewrite the address bar in place (no history entry)
pub fn replace_page_request(request: &CardRequest) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let hash = window.location().hash().unwrap_or_default();
    let url = format!("{}{}", request.url_for(&page_base_url()), hash);
    if let Ok(history) = window.history() {
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("Could not update URL: {}", js_reason(&err));
        }
    }
}

fn window_property(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// `window.SONGS`, keeping only string entries
pub fn window_songs() -> Vec<String> {
    let Some(value) = window_property("SONGS") else {
        return Vec::new();
    };
    if !js_sys::Array::is_array(&value) {
        log::warn!("window.SONGS is not an array");
        return Vec::new();
    }
    js_sys::Array::from(&value)
        .iter()
        .filter_map(|entry| entry.as_string())
        .collect()
}

/// `window.BINGO_CONFIG`, as a JSON string or a plain object
pub fn window_config_json() -> Option<String> {
    let value = window_property("BINGO_CONFIG")?;
    if let Some(json) = value.as_string() {
        return Some(json);
    }
    js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|json| json.as_string())
}
