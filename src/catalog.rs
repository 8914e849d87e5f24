//! Image-capable model discovery
//!
//! Reads OpenRouter's model listing and keeps the models whose declared
//! input or output modalities include images. Entries with unexpected
//! shapes are skipped rather than treated as errors.

use crate::http::HttpClient;
use crate::models::ApiIdentity;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const DEFAULT_MODELS_URL: &str = "https://openrouter.ai/api/v1/models";

/// Identifier fragments of models known to produce images via chat completions.
const PREFERRED_MARKERS: [&str; 3] = ["gpt-5-image", "flash-image", "pro-image"];

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub id: String,
    pub supports_image: bool,
}

impl ModelDescriptor {
    /// Build a descriptor from one `data[]` entry; `None` when it is not an object.
    pub fn from_value(item: &Value) -> Option<Self> {
        let item = item.as_object()?;

        // Non-string ids are treated like missing ones and filtered out later.
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let architecture = item.get("architecture").and_then(Value::as_object);
        let supports_image = modality_list(architecture, "input_modalities")
            .iter()
            .chain(modality_list(architecture, "output_modalities"))
            .any(|m| modality_name(m).to_lowercase() == "image");

        Some(Self { id, supports_image })
    }
}

fn modality_list<'a>(architecture: Option<&'a Map<String, Value>>, field: &str) -> &'a [Value] {
    architecture
        .and_then(|arch| arch.get(field))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn modality_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sorted, de-duplicated ids of image-capable models in a listing payload.
pub fn image_models_from_listing(payload: &Value) -> Vec<String> {
    let Some(items) = payload.get("data").and_then(Value::as_array) else {
        tracing::warn!("Model listing has no data array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(ModelDescriptor::from_value)
        .filter(|model| model.supports_image && !model.id.is_empty())
        .map(|model| model.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch the model listing and return the image-capable model ids.
pub async fn fetch_image_models(
    http: &HttpClient,
    models_url: &str,
    identity: &ApiIdentity,
) -> Result<Vec<String>> {
    let payload = http.get_json(models_url, &identity.headers()).await?;
    let models = image_models_from_listing(&payload);
    tracing::info!("Found {} image-capable models", models.len());
    Ok(models)
}

/// Narrow `ids` to likely image-generation models, or return them all if none match.
pub fn rank_for_generation(ids: &[String]) -> Vec<String> {
    let preferred: Vec<String> = ids
        .iter()
        .filter(|id| {
            let lowered = id.to_lowercase();
            PREFERRED_MARKERS.iter().any(|marker| lowered.contains(marker))
        })
        .cloned()
        .collect();

    if preferred.is_empty() {
        ids.to_vec()
    } else {
        preferred
    }
}
