//! Multi-agent router
//!
//! A classification agent decides which specialist should answer a query;
//! the original query (not the classifier's reply) is then forwarded to the
//! matched specialist. Classification and specialist response are two
//! independent model calls.

use crate::agent::Agent;
use crate::engine::ModelAdapter;
use crate::error::{AppError, AppResult};
use crate::router::{Category, RoutedResponse, parse_category};
use std::sync::Arc;

/// Stage name reported when the classification call itself fails
pub const CLASSIFIER_STAGE: &str = "classifier";

const CLASSIFIER_PROMPT: &str = "You are a routing assistant that assigns incoming queries \
    to exactly one specialist category.\n\
    Available categories:\n\
    - MATH: mathematical calculations, equations, and concepts\n\
    - ENGLISH: grammar, writing, and language comprehension\n\
    - LANGUAGE: translations between languages\n\
    - CS: programming, algorithms, and technical concepts\n\
    - GENERAL: general knowledge and queries outside specific domains\n\
    Respond with ONLY one word: MATH, ENGLISH, LANGUAGE, CS, or GENERAL.\n\
    Do not include explanations or other text.";

const MATH_PROMPT: &str = "You are a Math Assistant specializing in mathematical \
    calculations and concepts. Provide clear, step-by-step solutions and explanations \
    for mathematical problems. Show your work and explain the concepts involved.";

const ENGLISH_PROMPT: &str = "You are an English Assistant specializing in grammar, \
    writing, and language comprehension. Help with grammar questions, writing style, \
    vocabulary, and text analysis. Provide clear explanations and examples.";

const LANGUAGE_PROMPT: &str = "You are a Language Assistant specializing in translations \
    between languages. Provide accurate translations and explain nuances when relevant. \
    Include cultural context when appropriate.";

const CS_PROMPT: &str = "You are a Computer Science Assistant specializing in programming \
    and technical concepts. Help with coding questions, algorithms, data structures, and \
    software development. Provide clear code examples with explanations.";

const GENERAL_PROMPT: &str = "You are a General Assistant handling queries outside \
    specialized domains. Provide helpful, accurate information on a wide range of topics. \
    Be clear and informative in your responses.";

/// Router that dispatches queries to domain specialists
pub struct MultiAgentRouter {
    classifier: Agent,
    math: Agent,
    english: Agent,
    language: Agent,
    cs: Agent,
    general: Agent,
}

impl MultiAgentRouter {
    /// Build the router and its specialist roster over one adapter
    pub fn new(adapter: Arc<ModelAdapter>) -> Self {
        Self {
            classifier: Agent::new(CLASSIFIER_STAGE, CLASSIFIER_PROMPT, adapter.clone()),
            math: Agent::new("math-assistant", MATH_PROMPT, adapter.clone()),
            english: Agent::new("english-assistant", ENGLISH_PROMPT, adapter.clone()),
            language: Agent::new("language-assistant", LANGUAGE_PROMPT, adapter.clone()),
            cs: Agent::new("cs-assistant", CS_PROMPT, adapter.clone()),
            general: Agent::new("general-assistant", GENERAL_PROMPT, adapter),
        }
    }

    /// Specialist agent for a category
    ///
    /// Total over all categories; there is no unmatched branch.
    pub fn specialist(&self, category: Category) -> &Agent {
        match category {
            Category::Math => &self.math,
            Category::English => &self.english,
            Category::Language => &self.language,
            Category::ComputerScience => &self.cs,
            Category::General => &self.general,
        }
    }

    /// Classify a query and forward it to the matching specialist
    ///
    /// An unambiguous classifier reply selects a specialist; an ambiguous
    /// one resolves to the general specialist and is never surfaced as an
    /// error. A transport failure in either model call aborts the dispatch
    /// as a stage failure naming the classifier or the specialist.
    pub async fn dispatch(&self, query: &str) -> AppResult<RoutedResponse> {
        let classification_request = format!(
            "Assign this query to a category: '{}'",
            query
        );

        let reply = self
            .classifier
            .respond(&classification_request)
            .await
            .map_err(|e| e.at_stage(CLASSIFIER_STAGE))?;

        let category = match parse_category(&reply) {
            Ok(category) => category,
            Err(AppError::ClassificationAmbiguous { response }) => {
                tracing::warn!(
                    classifier_reply = %response,
                    "Classifier reply did not match a category, defaulting to general"
                );
                Category::General
            }
            Err(other) => return Err(other.at_stage(CLASSIFIER_STAGE)),
        };

        let specialist = self.specialist(category);

        tracing::info!(
            category = %category,
            specialist = %specialist.name(),
            "Query routed"
        );

        // The specialist sees the original query, not the classifier's reply.
        let content = specialist
            .respond(query)
            .await
            .map_err(|e| e.at_stage(specialist.name().to_string()))?;

        Ok(RoutedResponse {
            category,
            specialist: specialist.name().to_string(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LocalModelClient;
    use crate::config::{Config, Provider};

    fn router() -> MultiAgentRouter {
        let config = Config::new("http://127.0.0.1:9", "m", 5, Provider::Local).unwrap();
        let adapter = Arc::new(ModelAdapter::local_only(
            LocalModelClient::new(&config).unwrap(),
        ));
        MultiAgentRouter::new(adapter)
    }

    #[test]
    fn test_specialist_mapping_is_total() {
        let router = router();
        assert_eq!(router.specialist(Category::Math).name(), "math-assistant");
        assert_eq!(
            router.specialist(Category::English).name(),
            "english-assistant"
        );
        assert_eq!(
            router.specialist(Category::Language).name(),
            "language-assistant"
        );
        assert_eq!(
            router.specialist(Category::ComputerScience).name(),
            "cs-assistant"
        );
        assert_eq!(
            router.specialist(Category::General).name(),
            "general-assistant"
        );
    }

    #[test]
    fn test_classifier_prompt_enumerates_all_categories() {
        // The routing prompt must name every keyword the parser accepts.
        for keyword in ["MATH", "ENGLISH", "LANGUAGE", "CS", "GENERAL"] {
            assert!(
                CLASSIFIER_PROMPT.contains(keyword),
                "classifier prompt missing {keyword}"
            );
        }
    }

    #[tokio::test]
    async fn test_dead_endpoint_fails_at_classifier_stage() {
        let router = router();
        let err = router
            .dispatch("anything")
            .await
            .expect_err("dead endpoint must fail");
        assert_eq!(err.failed_stage(), Some(CLASSIFIER_STAGE));
    }
}
