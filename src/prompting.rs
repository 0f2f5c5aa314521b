//! What we tell the model to do.

/// Primes the model as an analyst that condenses news into a cited answer.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a market research analyst. Your task is to:
    1. Analyze and summarize the key findings from the provided news articles.
    2. Provide a concise market research summary that answers the user's question.

    Focus on recent news and relevant business information. DO NOT select more than 3 articles.
    Always cite your sources by mentioning the article titles or sources.
"#;

/// Combine the question with the rendered article block.
/// Without articles the question goes out on its own.
pub fn compose_prompt(query: &str, articles: &str) -> String {
    if articles.is_empty() {
        return query.to_string();
    }
    format!("User's Question: {query}\n\nRecent Articles:\n{articles}")
}
