use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Fixed timeout applied to every request, JSON or binary.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest body excerpt carried by a [`Error::Decode`].
const BODY_EXCERPT_CHARS: usize = 500;

/// Source of raw image bytes for responses that reference a remote URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Thin OpenRouter REST client. Holds no state between calls.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::new_with_client(client))
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }

    /// POST `payload` as JSON and parse the response body as JSON.
    pub async fn post_json<Req: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &Req,
        headers: &[(&str, String)],
    ) -> Result<Value> {
        tracing::debug!("POST {}", url);
        let request = with_headers(self.client.post(url), headers)
            .header("Content-Type", "application/json")
            .json(payload);
        send_for_json(request).await
    }

    /// GET `url` and parse the response body as JSON.
    pub async fn get_json(&self, url: &str, headers: &[(&str, String)]) -> Result<Value> {
        tracing::debug!("GET {}", url);
        send_for_json(with_headers(self.client.get(url), headers)).await
    }
}

#[async_trait]
impl ImageDownloader for HttpClient {
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading image from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Image download failed: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            tracing::error!("Image download error (status {}): {}", status, body);
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn with_headers(mut request: RequestBuilder, headers: &[(&str, String)]) -> RequestBuilder {
    for (name, value) in headers {
        request = request.header(*name, value.as_str());
    }
    request
}

async fn send_for_json(request: RequestBuilder) -> Result<Value> {
    let response = request.send().await.map_err(|e| {
        tracing::error!("Failed to send request to OpenRouter: {}", e);
        e
    })?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!("OpenRouter API error (status {}): {}", status, body);
        return Err(Error::Remote {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse OpenRouter response: {}", e);
        Error::Decode {
            excerpt: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::new().unwrap()
    }

    #[tokio::test]
    async fn test_post_json_sends_payload_and_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("Authorization", "Bearer key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({ "model": "m" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/api/v1/chat/completions", server.uri());
        let result = client()
            .post_json(
                &url,
                &serde_json::json!({ "model": "m" }),
                &[("Authorization", "Bearer key".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(result["ok"], true);
    }

    #[tokio::test]
    async fn test_non_success_status_is_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(402).set_body_string("insufficient credits"))
            .mount(&server)
            .await;

        let err = client()
            .post_json(&server.uri(), &serde_json::json!({}), &[])
            .await
            .unwrap_err();

        match err {
            Error::Remote { status, body } => {
                assert_eq!(status, 402);
                assert_eq!(body, "insufficient credits");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error_with_excerpt() {
        let server = MockServer::start().await;
        let body = "x".repeat(2000);

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let err = client().get_json(&server.uri(), &[]).await.unwrap_err();

        match err {
            Error::Decode { excerpt } => assert_eq!(excerpt.chars().count(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let err = client().get_json(&uri, &[]).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));

        let message = err.to_string();
        assert!(message.starts_with("OpenRouter request failed: "));
        assert!(message.contains("Connection refused"), "{message}");
    }

    #[tokio::test]
    async fn test_download_bytes_returns_raw_body() {
        let server = MockServer::start().await;
        let image = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];

        Mock::given(method("GET"))
            .and(path("/img.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
            .mount(&server)
            .await;

        let url = format!("{}/img.png", server.uri());
        let bytes = client().download_bytes(&url).await.unwrap();
        assert_eq!(bytes, image);
    }

    #[tokio::test]
    async fn test_download_not_found_is_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client().download_bytes(&server.uri()).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 404, .. }));
    }
}
