// demos/gemini_usage.rs

use anyhow::Result;
use dotenv::dotenv;
use textgen_client::{GeminiConfig, Provider};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let api_key = std::env::var("GEMINI_API_KEY")?;

    let provider = Provider::Gemini(GeminiConfig::new(&api_key).max_output_tokens(512));

    match provider.generate("Write me a poem about bravery").await {
        Ok(text) => println!("{text}"),
        Err(err) if err.is_rate_limited() => eprintln!("rate limited: {err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
