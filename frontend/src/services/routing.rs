//! Hash-based page addressing: `#/calendar`, `#/reports`, ... The dashboard
//! lives at the bare root.

use shared::Page;

use crate::services::Logger;

/// Page named by a location hash. An unknown hash yields `None`.
pub fn page_from_hash(hash: &str) -> Option<Page> {
    Page::from_slug(hash)
}

pub fn hash_for(page: Page) -> String {
    format!("#/{}", page.slug())
}

/// Page in the address bar right now
pub fn current_page() -> Option<Page> {
    let hash = web_sys::window()?.location().hash().ok()?;
    page_from_hash(&hash)
}

/// Write `page` into the address bar; fires `hashchange` when it differs.
pub fn show_page(page: Page) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let target = hash_for(page);
    if location.hash().ok().as_deref() != Some(target.as_str()) {
        Logger::warn_on_failure("router", "updating address bar", location.set_hash(&target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip_for_every_page() {
        for page in Page::ALL {
            assert_eq!(page_from_hash(&hash_for(page)), Some(page));
        }
    }

    #[test]
    fn test_bare_and_unknown_hashes() {
        assert_eq!(page_from_hash(""), Some(Page::Dashboard));
        assert_eq!(page_from_hash("#/"), Some(Page::Dashboard));
        assert_eq!(page_from_hash("#/users"), Some(Page::Users));
        assert_eq!(page_from_hash("#/nowhere"), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_show_page_updates_address_bar() {
        show_page(Page::Reports);
        assert_eq!(current_page(), Some(Page::Reports));
        show_page(Page::Dashboard);
        assert_eq!(current_page(), Some(Page::Dashboard));
    }
}
