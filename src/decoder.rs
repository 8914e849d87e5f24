//! Image extraction from chat-completion responses
//!
//! Providers return the generated image either inline as a base64 data URL
//! or as a URL to fetch, under slightly different JSON shapes. The response is
//! walked as an untyped [`Value`] with a guard at every level.

use crate::http::ImageDownloader;
use crate::{Error, Result};
use base64::Engine as _;
use serde_json::Value;

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

fn malformed(reason: &str, payload: &Value) -> Error {
    Error::MalformedResponse(format!("{}: {}", reason, payload))
}

/// Pull the first generated image out of `payload`, downloading it if needed.
pub async fn extract_image_bytes(
    payload: &Value,
    downloader: &dyn ImageDownloader,
) -> Result<Vec<u8>> {
    let choices = match payload.get("choices").and_then(Value::as_array) {
        Some(choices) if !choices.is_empty() => choices,
        _ => return Err(malformed("OpenRouter response missing choices", payload)),
    };

    let Some(message) = choices[0].get("message").filter(|m| m.is_object()) else {
        return Err(malformed("OpenRouter response missing message payload", payload));
    };

    let images = match message.get("images").and_then(Value::as_array) {
        Some(images) if !images.is_empty() => images,
        _ => return Err(malformed("OpenRouter response missing generated images", payload)),
    };

    let first = &images[0];
    if !first.is_object() {
        return Err(malformed("Unexpected image payload structure", payload));
    }

    if let Some(url) = non_empty_str(first.get("image_url").and_then(|obj| obj.get("url"))) {
        if url.starts_with(DATA_URL_PREFIX) {
            tracing::debug!("Decoding inline image data URL");
            return decode_data_url(url);
        }
        tracing::debug!("Response references remote image_url");
        return downloader.download_bytes(url).await;
    }

    if let Some(url) = non_empty_str(first.get("url")) {
        tracing::debug!("Response references remote url");
        return downloader.download_bytes(url).await;
    }

    Err(malformed("Could not extract image URL from response", payload))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Decode `data:image/<subtype>;base64,<payload>`.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let unsupported = || Error::MalformedResponse("Unsupported image data URL format.".to_string());

    let rest = data_url.strip_prefix(DATA_URL_PREFIX).ok_or_else(unsupported)?;
    let (subtype, encoded) = rest.split_once(BASE64_MARKER).ok_or_else(unsupported)?;
    if subtype.is_empty() || subtype.contains(';') || encoded.is_empty() {
        return Err(unsupported());
    }

    // Line-wrapped payloads are accepted; whitespace is not part of the alphabet.
    let encoded: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| Error::MalformedResponse(format!("Failed to decode base64 image: {}", e)))
}
