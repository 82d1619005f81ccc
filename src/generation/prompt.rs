//! Prompt construction for the generation model

use crate::types::{ResponseStyle, ScoredPaper};

/// Prompt builder for literature-review queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build a numbered context block from retrieved papers. Each paper
    /// contributes its metadata line and its abstract, truncated to
    /// `max_chars_per_paper` so the prompt stays within the model context.
    pub fn build_context(results: &[ScoredPaper], max_chars_per_paper: usize) -> String {
        let mut context = String::new();

        for (i, paper) in results.iter().enumerate() {
            let title = paper.metadata.title.as_deref().unwrap_or("Untitled");
            let source_ref = Self::format_source_ref(paper);
            let body = truncate_chars(paper.abstract_text(), max_chars_per_paper);

            context.push_str(&format!(
                "[{}] {} (relevance {:.4})\n{}\n\n{}\n\n---\n\n",
                i + 1,
                title,
                paper.score,
                source_ref,
                body
            ));
        }

        context
    }

    /// Format the metadata line for one paper
    fn format_source_ref(paper: &ScoredPaper) -> String {
        let mut parts = Vec::new();

        if let Some(authors) = &paper.metadata.authors {
            parts.push(authors.clone());
        }
        if let Some(source) = &paper.metadata.source {
            parts.push(source.clone());
        }
        if let Some(date) = &paper.metadata.date {
            parts.push(date.clone());
        }
        if let Some(categories) = &paper.metadata.categories {
            parts.push(categories.clone());
        }

        if parts.is_empty() {
            format!("id: {}", paper.id)
        } else {
            parts.join(" | ")
        }
    }

    /// Build the full generation prompt for a query and style
    pub fn build_prompt(query: &str, context: &str, style: ResponseStyle) -> String {
        format!(
            r#"You are a research assistant helping with a literature review.

{instruction}

Ground every claim in the papers below and refer to them by their bracketed
numbers, e.g. [1]. Do not use knowledge beyond the papers provided.

PAPERS:
{context}

RESEARCH QUESTION: {query}

Answer:"#,
            instruction = style.instruction(),
            context = context,
            query = query
        )
    }
}

/// Truncate at a char boundary, never inside a multi-byte sequence
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Paper, PaperMetadata};

    fn scored(id: &str, title: &str, body: &str) -> ScoredPaper {
        let paper = Paper::new(
            id,
            format!("Title: {title}\nAbstract: {body}"),
            PaperMetadata {
                title: Some(title.to_string()),
                authors: Some("Doe et al.".to_string()),
                ..Default::default()
            },
        );
        ScoredPaper::from_paper(&paper, 0.8)
    }

    #[test]
    fn context_numbers_papers_in_order() {
        let results = vec![scored("a", "First", "aaa"), scored("b", "Second", "bbb")];
        let context = PromptBuilder::build_context(&results, 100);
        let first = context.find("[1] First").unwrap();
        let second = context.find("[2] Second").unwrap();
        assert!(first < second);
        assert!(context.contains("Doe et al."));
    }

    #[test]
    fn bodies_are_truncated_per_paper() {
        let long_body = "x".repeat(500);
        let results = vec![scored("a", "Long", &long_body)];
        let context = PromptBuilder::build_context(&results, 50);
        assert!(!context.contains(&long_body));
        assert!(context.contains(&"x".repeat(50)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "ααααα";
        assert_eq!(truncate_chars(text, 3), "ααα");
        assert_eq!(truncate_chars(text, 10), text);
    }

    #[test]
    fn prompt_carries_query_and_style_instruction() {
        let prompt = PromptBuilder::build_prompt("why transformers?", "CTX", ResponseStyle::Comparison);
        assert!(prompt.contains("why transformers?"));
        assert!(prompt.contains("CTX"));
        assert!(prompt.contains(ResponseStyle::Comparison.instruction()));
        assert!(!prompt.contains(ResponseStyle::Summary.instruction()));
    }
}
