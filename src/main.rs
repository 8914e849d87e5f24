use anyhow::Result;
use clap::Parser;
use openrouter_imageset::{app, cli::Cli, config::API_KEY_VAR};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openrouter_imageset=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    info!("Starting openrouter-imageset");

    dotenvy::dotenv().ok();
    let env_api_key = std::env::var(API_KEY_VAR).ok();

    match app::run(&args, env_api_key.as_deref()).await {
        Ok(outcome) => {
            for line in outcome.lines() {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
