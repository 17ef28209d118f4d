pub mod engine;
pub mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(feature = "browser_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Turn an uploaded image into a `data:` URI for a card draft
#[wasm_bindgen]
pub fn image_data_uri(mime: &str, bytes: Vec<u8>) -> Result<String, String> {
    cb_cards_core::image::image_data_uri(mime, &bytes).map_err(|e| e.to_string())
}
