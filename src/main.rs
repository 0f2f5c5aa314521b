//! Command-line entrypoint: a research chat that answers from fresh web search.
use eyre::Result;

pub mod articles;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod display;
pub mod http;
pub mod llm;
pub mod logging;
pub mod prompting;
pub mod research;
pub mod search;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
