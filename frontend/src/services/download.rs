use anyhow::{anyhow, Context};
use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// How long the object URL outlives the click that starts the download
const REVOKE_AFTER_MS: u32 = 1_000;

/// Hand `bytes` to the browser as a file download named `file_name`.
pub fn save_file(bytes: &[u8], file_name: &str, mime_type: &str) -> anyhow::Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("no document available"))?;
    let body = document.body().ok_or_else(|| anyhow!("document has no body"))?;

    let url = ObjectUrl::from(Blob::new_with_options(bytes, Some(mime_type)));
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| anyhow!("{:?}", e))
        .context("creating download link")?
        .dyn_into()
        .map_err(|_| anyhow!("download link is not an anchor"))?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)
        .map_err(|e| anyhow!("{:?}", e))
        .context("attaching download link")?;
    anchor.click();
    anchor.remove();

    // Dropping the ObjectUrl revokes it
    Timeout::new(REVOKE_AFTER_MS, move || drop(url)).forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_download_link_is_cleaned_up() {
        save_file(b"date,total\n2025-03-10,40\n", "report.csv", "text/csv").unwrap();

        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.query_selector("a[download]").unwrap().is_none());
    }
}
