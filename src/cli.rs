use crate::catalog::DEFAULT_MODELS_URL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "openrouter-imageset")]
#[command(about = "Generate an image with OpenRouter and save it as an Xcode image set")]
pub struct Cli {
    /// List image-capable model IDs from OpenRouter and exit.
    #[arg(long)]
    pub list_image_models: bool,

    /// Prompt for image generation.
    #[arg(long, required_unless_present = "list_image_models")]
    pub prompt: Option<String>,

    /// Name of the .imageset in the asset catalog.
    #[arg(long, required_unless_present = "list_image_models")]
    pub asset_name: Option<String>,

    /// OpenRouter model id.
    #[arg(long, default_value = "openai/gpt-5-image")]
    pub model: String,

    /// Image aspect ratio (e.g. 1:1, 16:9).
    #[arg(long, default_value = "1:1")]
    pub aspect_ratio: String,

    /// Image size tier (1K, 2K, 4K).
    #[arg(long, default_value = "1K")]
    pub image_size: String,

    /// Request both image and text modalities.
    #[arg(long)]
    pub include_text: bool,

    /// Path to env file with OPENROUTER_API_KEY.
    #[arg(long, default_value = ".openrouter.env")]
    pub config: PathBuf,

    /// Path to the asset catalog.
    #[arg(long, default_value = "Assets.xcassets")]
    pub catalog: PathBuf,

    /// OpenRouter chat completions endpoint.
    #[arg(long, default_value = "https://openrouter.ai/api/v1/chat/completions")]
    pub endpoint: String,

    /// OpenRouter model listing endpoint.
    #[arg(long, default_value = DEFAULT_MODELS_URL)]
    pub models_endpoint: String,

    /// HTTP-Referer header value.
    #[arg(long, default_value = "https://localhost")]
    pub app_url: String,

    /// X-Title header value.
    #[arg(long, default_value = "openrouter-imageset")]
    pub app_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bin", "--prompt", "a fox", "--asset-name", "Fox"]).unwrap();

        assert_eq!(cli.prompt.as_deref(), Some("a fox"));
        assert_eq!(cli.asset_name.as_deref(), Some("Fox"));
        assert_eq!(cli.model, "openai/gpt-5-image");
        assert_eq!(cli.aspect_ratio, "1:1");
        assert_eq!(cli.image_size, "1K");
        assert!(!cli.include_text);
        assert!(!cli.list_image_models);
        assert_eq!(cli.models_endpoint, DEFAULT_MODELS_URL);
    }

    #[test]
    fn test_generation_requires_prompt_and_asset_name() {
        assert!(Cli::try_parse_from(["bin", "--prompt", "a fox"]).is_err());
        assert!(Cli::try_parse_from(["bin", "--asset-name", "Fox"]).is_err());
    }

    #[test]
    fn test_listing_mode_needs_no_prompt() {
        let cli = Cli::try_parse_from(["bin", "--list-image-models"]).unwrap();
        assert!(cli.list_image_models);
        assert!(cli.prompt.is_none());
    }
}
