// ── Browser clipboard ──

use labdash_core::{Clipboard, CoreError};
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::browser::describe;

/// `navigator.clipboard`.
#[derive(Debug, Clone)]
pub struct BrowserClipboard {
    window: Window,
}

impl BrowserClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CoreError> {
        let promise = self.window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(drop)
            .map_err(|e| CoreError::Clipboard {
                message: describe(&e),
            })
    }
}
