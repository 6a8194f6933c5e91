use gloo_storage::Storage;
use serde::Serialize;

use pinroute_shared::{MarkerSet, MarkerStore};

pub(crate) const MARKERS_STORAGE_KEY: &str = "pinroute_markers";

/// Marker persistence in the browser's `localStorage`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalMarkerStore {
    key: &'static str,
}

impl Default for LocalMarkerStore {
    fn default() -> Self {
        Self {
            key: MARKERS_STORAGE_KEY,
        }
    }
}

impl MarkerStore for LocalMarkerStore {
    fn load(&self) -> MarkerSet {
        gloo_storage::LocalStorage::get(self.key).unwrap_or_default()
    }

    fn save(&self, markers: &MarkerSet) {
        persist(self.key, markers, "markers");
    }
}

fn persist_warning(what: &str, err: &impl std::fmt::Display) -> String {
    format!("Failed to persist {what}: {err}")
}

/// Write `value` under `key`, logging (not propagating) a storage failure.
pub(crate) fn persist<T: Serialize>(key: &str, value: T, what: &str) {
    if let Err(e) = gloo_storage::LocalStorage::set(key, value) {
        web_sys::console::warn_1(&persist_warning(what, &e).into());
    }
}

#[cfg(test)]
mod tests {
    use super::persist_warning;

    #[test]
    fn warning_names_what_failed_and_why() {
        assert_eq!(
            persist_warning("camera", &"QuotaExceededError"),
            "Failed to persist camera: QuotaExceededError"
        );
    }
}
