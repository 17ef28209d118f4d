//! Uploaded images are stored inline as data URIs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{GameError, GameResult};

/// `data:<mime>;base64,<payload>` for an uploaded image file
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> GameResult<String> {
    let mime = mime.trim();
    let is_image = mime
        .split_once('/')
        .is_some_and(|(kind, sub)| kind.eq_ignore_ascii_case("image") && !sub.is_empty());
    if !is_image {
        return Err(GameError::InvalidImage {
            mime: mime.to_string(),
        });
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
