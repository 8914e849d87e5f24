//! Data models and structures
//!
//! Request payloads and caller identity for the OpenRouter chat-completions API.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageConfig {
    pub aspect_ratio: String,
    pub image_size: String,
}

/// Body of a chat-completions call that asks for an image.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub modalities: Vec<String>,
    pub stream: bool,
    pub image_config: ImageConfig,
}

impl GenerationRequest {
    pub fn new(
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
        image_size: &str,
        include_text: bool,
    ) -> Self {
        let mut modalities = vec!["image".to_string()];
        if include_text {
            modalities.push("text".to_string());
        }

        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            modalities,
            stream: false,
            image_config: ImageConfig {
                aspect_ratio: aspect_ratio.to_string(),
                image_size: image_size.to_string(),
            },
        }
    }
}

/// Bearer key plus the attribution headers OpenRouter uses to identify the app.
#[derive(Debug, Clone)]
pub struct ApiIdentity {
    pub api_key: String,
    pub app_url: String,
    pub app_name: String,
}

impl ApiIdentity {
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", format!("Bearer {}", self.api_key)),
            ("HTTP-Referer", self.app_url.clone()),
            ("X-Title", self.app_name.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serialization() {
        let request = GenerationRequest::new("openai/gpt-5-image", "a lighthouse", "16:9", "2K", false);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "openai/gpt-5-image",
                "messages": [{ "role": "user", "content": "a lighthouse" }],
                "modalities": ["image"],
                "stream": false,
                "image_config": { "aspect_ratio": "16:9", "image_size": "2K" }
            })
        );
    }

    #[test]
    fn test_include_text_adds_modality() {
        let request = GenerationRequest::new("m", "p", "1:1", "1K", true);
        assert_eq!(request.modalities, vec!["image", "text"]);
    }

    #[test]
    fn test_identity_headers() {
        let identity = ApiIdentity {
            api_key: "sk-test".to_string(),
            app_url: "https://example.test".to_string(),
            app_name: "Example".to_string(),
        };

        let headers = identity.headers();
        assert!(headers.contains(&("Authorization", "Bearer sk-test".to_string())));
        assert!(headers.contains(&("HTTP-Referer", "https://example.test".to_string())));
        assert!(headers.contains(&("X-Title", "Example".to_string())));
    }
}
