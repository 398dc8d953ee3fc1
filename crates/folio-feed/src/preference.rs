//! The persisted page-size preference.

use folio_prefs::PreferenceStore;

/// Key the page size is stored under.
pub const PAGE_SIZE_KEY: &str = "preferred-comment-page-size";

/// Read the stored page size, falling back to `default`.
///
/// A stored value that is not an unsigned integer counts as absent.
pub fn load_page_size(prefs: &impl PreferenceStore, default: u32) -> u32 {
    let Some(raw) = prefs.get(PAGE_SIZE_KEY) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(size) => size,
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring invalid stored page size");
            default
        }
    }
}

/// Persist `page_size` as its decimal string.
pub fn store_page_size(prefs: &impl PreferenceStore, page_size: u32) {
    prefs.set(PAGE_SIZE_KEY, &page_size.to_string());
}
