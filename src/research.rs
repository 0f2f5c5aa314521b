//! One research round: search, render, ask the model, record the exchange.
use eyre::Result;
use std::sync::Arc;

use crate::articles::format_articles;
use crate::conversation::Conversation;
use crate::display::AnyDisplay;
use crate::llm::LanguageModel;
use crate::prompting::{SYSTEM_INSTRUCTION, compose_prompt};
use crate::search::{SearchOptions, SearchProvider};

pub struct Researcher {
    search: Arc<dyn SearchProvider>,
    model: Arc<dyn LanguageModel>,
    options: SearchOptions,
    max_output_tokens: u32,
}

impl Researcher {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn LanguageModel>,
        options: SearchOptions,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            search,
            model,
            options,
            max_output_tokens,
        }
    }

    /// Answer `query` from fresh search results and the conversation so far.
    /// On success the conversation gains the composite prompt and the reply;
    /// on any failure it is left exactly as it was.
    pub async fn research(
        &self,
        query: &str,
        conversation: &mut Conversation,
        display: &dyn AnyDisplay,
    ) -> Result<String> {
        let results = self.search.search(query, &self.options).await?;
        if results.is_empty() {
            tracing::info!("no articles found; asking with the bare question");
        }
        let prompt = compose_prompt(query, &format_articles(&results));

        let exchange = conversation.begin_exchange(prompt.as_str());
        display.show_prompt(&prompt).await;

        let completion = self
            .model
            .generate(SYSTEM_INSTRUCTION, exchange.turns(), self.max_output_tokens)
            .await?;

        exchange.commit(completion.text.as_str());
        tracing::debug!(turns = conversation.len(), "exchange recorded");
        Ok(completion.text)
    }
}
