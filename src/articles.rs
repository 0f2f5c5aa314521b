//! Search hits and their rendering into a block the model can read.
use serde::Deserialize;

/// Shown in place of a field the search provider left out.
pub const PLACEHOLDER: &str = "N/A";

const SEPARATOR: &str = "\n---\n";

/// One retrieved document. Providers may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn field(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER,
    }
}

/// Number each result from 1 and join the sections; no results give an empty string.
pub fn format_articles(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, article)| {
            format!(
                "Article {}:\nTitle: {}\nSource: {}\nContent: {}\n",
                i + 1,
                field(&article.title),
                field(&article.url),
                field(&article.content),
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, url: &str, content: &str) -> SearchResult {
        SearchResult {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn no_results_format_to_nothing() {
        assert_eq!(format_articles(&[]), "");
    }

    #[test]
    fn sections_are_numbered_in_input_order() {
        let results = [
            article("Tariffs rise", "https://a.example", "Duties doubled."),
            article("Makers respond", "https://b.example", "Plants relocate."),
        ];
        let text = format_articles(&results);
        assert_eq!(
            text,
            "Article 1:\nTitle: Tariffs rise\nSource: https://a.example\nContent: Duties doubled.\n\
             \n---\n\
             Article 2:\nTitle: Makers respond\nSource: https://b.example\nContent: Plants relocate.\n"
        );
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let results = [SearchResult {
            title: Some("Only a title".to_string()),
            url: None,
            content: Some("  ".to_string()),
        }];
        let text = format_articles(&results);
        assert!(text.contains("Title: Only a title\n"));
        assert!(text.contains("Source: N/A\n"));
        assert!(text.contains("Content: N/A\n"));
    }

    #[test]
    fn decodes_partial_records() {
        let result: SearchResult = serde_json::from_str(r#"{"url": "https://c.example"}"#).unwrap();
        assert_eq!(result.title, None);
        assert_eq!(result.url.as_deref(), Some("https://c.example"));
    }
}
