//! Clipboard copy via the async Web Clipboard API.

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Copies `text` and reports the outcome to `on_done`.
pub fn copy_text<F>(text: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let ok = match web_sys::window() {
            Some(window) => {
                let clipboard = window.navigator().clipboard();
                JsFuture::from(clipboard.write_text(&text)).await.is_ok()
            }
            None => false,
        };
        on_done(ok);
    });
}
