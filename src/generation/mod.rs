//! Answer composition over retrieved papers

pub mod prompt;

use std::sync::Arc;

use crate::error::Result;
use crate::providers::GenerationProvider;
use crate::types::{ResponseStyle, ScoredPaper};

use prompt::PromptBuilder;

/// Answer returned when retrieval produced no supporting papers
pub const NO_PAPERS_ANSWER: &str =
    "No supporting papers were found for this question. Try rephrasing the \
     research question or broadening its scope.";

/// Composes the final answer: prompt construction plus one synchronous
/// generation call. Holds no state between requests.
pub struct ResponseComposer {
    llm: Arc<dyn GenerationProvider>,
    max_context_chars_per_paper: usize,
}

impl ResponseComposer {
    /// Create a composer over the given generation provider
    pub fn new(llm: Arc<dyn GenerationProvider>, max_context_chars_per_paper: usize) -> Self {
        Self {
            llm,
            max_context_chars_per_paper,
        }
    }

    /// Compose an answer for the query over the retrieved papers.
    ///
    /// With no results this returns an acknowledgement without calling the
    /// model. Generation failures and timeouts propagate to the caller.
    pub async fn compose(
        &self,
        query: &str,
        results: &[ScoredPaper],
        style: ResponseStyle,
    ) -> Result<String> {
        if results.is_empty() {
            return Ok(NO_PAPERS_ANSWER.to_string());
        }

        let context = PromptBuilder::build_context(results, self.max_context_chars_per_paper);
        let prompt = PromptBuilder::build_prompt(query, &context, style);

        tracing::debug!(
            "Composing {} answer over {} papers with model {}",
            style.display_name(),
            results.len(),
            self.llm.model()
        );

        self.llm.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Generator that records prompts and returns a canned answer
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingGenerator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerationProvider for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok("canned answer".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    fn papers() -> Vec<ScoredPaper> {
        use crate::types::{Paper, PaperMetadata};
        vec![ScoredPaper::from_paper(
            &Paper::new("p1", "Title: T\nAbstract: body.", PaperMetadata::default()),
            0.9,
        )]
    }

    #[tokio::test]
    async fn empty_results_yield_acknowledgement_without_model_call() {
        let llm = RecordingGenerator::new();
        let composer = ResponseComposer::new(llm.clone(), 2000);

        let answer = composer
            .compose("anything", &[], ResponseStyle::General)
            .await
            .unwrap();

        assert!(!answer.is_empty());
        assert!(answer.contains("No supporting papers"));
        assert!(llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn prompt_includes_query_and_style() {
        let llm = RecordingGenerator::new();
        let composer = ResponseComposer::new(llm.clone(), 2000);

        let answer = composer
            .compose("what about X?", &papers(), ResponseStyle::FutureResearch)
            .await
            .unwrap();

        assert_eq!(answer, "canned answer");
        let prompts = llm.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("what about X?"));
        assert!(prompts[0].contains(ResponseStyle::FutureResearch.instruction()));
    }

    #[tokio::test]
    async fn generation_failures_propagate() {
        struct FailingGenerator;

        #[async_trait]
        impl GenerationProvider for FailingGenerator {
            async fn generate(&self, _prompt: &str) -> Result<String> {
                Err(Error::GenerationTimeout(30))
            }

            async fn health_check(&self) -> Result<bool> {
                Ok(false)
            }

            fn name(&self) -> &str {
                "failing"
            }

            fn model(&self) -> &str {
                "none"
            }
        }

        let composer = ResponseComposer::new(Arc::new(FailingGenerator), 2000);
        let err = composer
            .compose("q", &papers(), ResponseStyle::General)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenerationTimeout(30)));
    }
}
