// demos/basic_usage.rs

use anyhow::Result;
use dotenv::dotenv;
use textgen_client::{AnthropicConfig, TextGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let api_key = std::env::var("ANTHROPIC_API_KEY")?;

    let config = AnthropicConfig::new(&api_key)
        .max_tokens(1024)
        .system("You are a concise assistant.");

    let text = config.generate("Write me a poem about bravery").await?;
    println!("{text}");

    Ok(())
}
