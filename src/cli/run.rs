use eyre::Result;
use std::sync::Arc;

use crate::cli::specials;
use crate::config::Config;
use crate::conversation::Conversation;
use crate::display::{self, Display};
use crate::http::build_http_client;
use crate::llm::AnthropicClient;
use crate::research::Researcher;
use crate::search::{SearchOptions, TavilyClient};

use super::input::Editor;
use super::repl::interact_forever;

/// Initialize the display and route logs through it.
fn start_display() -> Display {
    let display = display::make_display();
    crate::logging::setup_tracing_display_logger(display.clone());
    display
}

/// Wire the remote collaborators from the startup configuration.
fn make_researcher(config: &Config) -> Result<Researcher> {
    let http = build_http_client()?;
    let search = TavilyClient::new(http.clone(), &config.tavily_api_key, &config.tavily_base_url);
    let model = AnthropicClient::new(
        http,
        &config.anthropic_api_key,
        &config.anthropic_base_url,
        &config.model,
    );
    let options = SearchOptions {
        depth: config.search_depth,
        max_results: config.max_results,
        include_raw_content: false,
    };
    Ok(Researcher::new(
        Arc::new(search),
        Arc::new(model),
        options,
        config.max_tokens,
    ))
}

/// CLI entrypoint: handle specials, load configuration, then chat until the user leaves.
pub async fn run() -> Result<()> {
    if specials::handle_specials_if_needed() {
        return Ok(());
    }

    let display = start_display();

    // Missing credentials end the program before the loop starts.
    let config = Config::from_env()?;
    tracing::info!(model = %config.model, depth = ?config.search_depth, "configuration loaded");

    let researcher = make_researcher(&config)?;
    let mut editor = Editor::new()?;
    let mut conversation = Conversation::new();

    display.show_greeting().await;
    interact_forever(&mut editor, &*display, &researcher, &mut conversation).await
}
