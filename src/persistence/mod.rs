//! LocalStorage access
//!
//! Storage is best-effort: a missing `window`, disabled storage or a quota
//! error reads as "nothing stored" and writes are dropped with a log line.
//! Native builds have no storage at all.

/// Read a stored string
#[cfg(target_arch = "wasm32")]
pub fn load_string(key: &str) -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    storage.get_item(key).ok().flatten()
}

/// Write a string, returning false if storage is unavailable
#[cfg(target_arch = "wasm32")]
pub fn save_string(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => match storage.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {}: {:?}", key, e);
                false
            }
        },
        None => {
            log::warn!("LocalStorage unavailable, {} not saved", key);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_string(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_string(_key: &str, _value: &str) -> bool {
    false
}

/// Load and deserialize a JSON value, `None` if missing or malformed
pub fn load_json<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_string(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}

/// Serialize and store a JSON value
pub fn save_json<T: serde::Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => save_string(key, &json),
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_storage_is_empty() {
        assert!(!save_string("spaceJumpHighScore", "42"));
        assert_eq!(load_string("spaceJumpHighScore"), None);
        assert_eq!(load_json::<u64>("anything"), None);
    }
}
