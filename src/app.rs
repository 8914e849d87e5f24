//! Application orchestration for listing image models and generating image sets.

use crate::catalog::{fetch_image_models, rank_for_generation};
use crate::cli::Cli;
use crate::config::load_api_key;
use crate::decoder::extract_image_bytes;
use crate::http::HttpClient;
use crate::imageset::write_imageset;
use crate::models::{ApiIdentity, GenerationRequest};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How many ranked model ids are offered after an invalid-model rejection.
const MAX_SUGGESTIONS: usize = 8;

/// Successful result of one invocation, rendered to stdout by the binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoImageModels,
    ImageModels(Vec<String>),
    Created { path: PathBuf, asset_name: String },
}

impl Outcome {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoImageModels => vec!["No image-capable models found for this key.".to_string()],
            Self::ImageModels(models) => std::iter::once("Image-capable models:".to_string())
                .chain(models.iter().cloned())
                .collect(),
            Self::Created { path, asset_name } => vec![
                format!("Created image set: {}", path.display()),
                format!("Use in SwiftUI: Image(\"{}\")", asset_name),
            ],
        }
    }
}

/// Sequences catalog lookups and image generation against one OpenRouter account.
pub struct App {
    http: HttpClient,
    identity: ApiIdentity,
    models_url: String,
}

impl App {
    pub fn new(http: HttpClient, identity: ApiIdentity, models_url: String) -> Self {
        Self {
            http,
            identity,
            models_url,
        }
    }

    /// Listing mode: ranked image-capable models for this key.
    pub async fn list_image_models(&self) -> Result<Outcome> {
        let models = fetch_image_models(&self.http, &self.models_url, &self.identity)
            .await
            .map_err(|e| Error::ModelListing(Box::new(e)))?;

        if models.is_empty() {
            return Ok(Outcome::NoImageModels);
        }
        Ok(Outcome::ImageModels(rank_for_generation(&models)))
    }

    /// Generation mode: request an image and write it as `<asset_name>.imageset`.
    pub async fn generate(
        &self,
        endpoint: &str,
        request: &GenerationRequest,
        catalog: &Path,
        asset_name: &str,
    ) -> Result<Outcome> {
        match self.generate_imageset(endpoint, request, catalog, asset_name).await {
            Ok(path) => Ok(Outcome::Created {
                path,
                asset_name: asset_name.to_string(),
            }),
            Err(e) if e.is_invalid_model() => Err(self.with_suggestions(e).await),
            Err(e) => Err(e),
        }
    }

    async fn generate_imageset(
        &self,
        endpoint: &str,
        request: &GenerationRequest,
        catalog: &Path,
        asset_name: &str,
    ) -> Result<PathBuf> {
        info!("Requesting image from model {}", request.model);
        let response = self
            .http
            .post_json(endpoint, request, &self.identity.headers())
            .await?;

        let image_bytes = extract_image_bytes(&response, &self.http).await?;
        info!("Received {} bytes of image data", image_bytes.len());

        write_imageset(catalog, asset_name, &image_bytes)
    }

    /// Attach image model suggestions to `err`. Lookup failures leave `err` untouched.
    async fn with_suggestions(&self, err: Error) -> Error {
        match fetch_image_models(&self.http, &self.models_url, &self.identity).await {
            Ok(models) if !models.is_empty() => {
                let models = rank_for_generation(&models)
                    .into_iter()
                    .take(MAX_SUGGESTIONS)
                    .collect();
                Error::WithSuggestions {
                    source: Box::new(err),
                    models,
                }
            }
            Ok(_) => err,
            Err(lookup_err) => {
                debug!("Model suggestion lookup failed: {}", lookup_err);
                err
            }
        }
    }
}

/// Run one invocation. `env_api_key` is the caller's `OPENROUTER_API_KEY`, if any.
pub async fn run(cli: &Cli, env_api_key: Option<&str>) -> Result<Outcome> {
    let api_key = load_api_key(&cli.config, env_api_key)?;
    let identity = ApiIdentity {
        api_key,
        app_url: cli.app_url.clone(),
        app_name: cli.app_name.clone(),
    };
    let app = App::new(HttpClient::new()?, identity, cli.models_endpoint.clone());

    if cli.list_image_models {
        return app.list_image_models().await;
    }

    let (Some(prompt), Some(asset_name)) = (cli.prompt.as_deref(), cli.asset_name.as_deref())
    else {
        return Err(Error::PreconditionFailed(
            "--prompt and --asset-name are required to generate an image".to_string(),
        ));
    };

    if !cli.catalog.is_dir() {
        return Err(Error::PreconditionFailed(format!(
            "Asset catalog not found: {}",
            cli.catalog.display()
        )));
    }

    let request = GenerationRequest::new(
        &cli.model,
        prompt,
        &cli.aspect_ratio,
        &cli.image_size,
        cli.include_text,
    );
    app.generate(&cli.endpoint, &request, &cli.catalog, asset_name)
        .await
}
