// ============================================
// Tutor
// ============================================
//
// Answers topic questions from the curated knowledge base. When a topic
// is not covered and fallback is enabled, the question is forwarded to
// an external answering service (LLM, search, ...). Working out which
// topic and aspect a free-text question is about is the host's job.

mod knowledge_base;
mod ollama;

pub use knowledge_base::{KnowledgeBase, KnowledgeEntry};
pub use ollama::OllamaAnswerService;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External text-answering backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnsweringService: Send + Sync {
    /// Answer free text. Fails with `ServiceUnavailable` when the backend
    /// cannot be reached or returns garbage.
    async fn answer(&self, query: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicAspect {
    Definition,
    Concepts,
    Examples,
    Related,
}

impl TopicAspect {
    /// Question sent to the external service for an uncovered topic
    pub fn external_query(&self, topic: &str) -> String {
        match self {
            TopicAspect::Definition => format!("What is {} in computer science", topic),
            TopicAspect::Concepts => format!("Main concepts of {} in computer science", topic),
            TopicAspect::Examples => format!("Examples of {} in computer science", topic),
            TopicAspect::Related => format!("Topics related to {} in computer science", topic),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorQuestion {
    pub topic: String,
    pub aspect: TopicAspect,
    /// Specific concept within the topic, e.g. `linked_list`
    #[serde(default)]
    pub concept: Option<String>,
}

impl TutorQuestion {
    pub fn new(topic: impl Into<String>, aspect: TopicAspect) -> Self {
        Self {
            topic: topic.into(),
            aspect,
            concept: None,
        }
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    KnowledgeBase,
    External,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorAnswer {
    pub source: AnswerSource,
    /// Canonical topic name when answered from the knowledge base
    pub topic: Option<String>,
    pub text: String,
}

pub struct Tutor {
    knowledge_base: KnowledgeBase,
    fallback: Option<Arc<dyn AnsweringService>>,
    fallback_enabled: bool,
}

impl Tutor {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self {
            knowledge_base,
            fallback: None,
            fallback_enabled: false,
        }
    }

    /// Attach an external service and enable fallback to it
    pub fn with_fallback(mut self, service: Arc<dyn AnsweringService>) -> Self {
        self.fallback = Some(service);
        self.fallback_enabled = true;
        self
    }

    pub fn with_fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub async fn ask(&self, question: &TutorQuestion) -> Result<TutorAnswer> {
        if let Some(entry) = self.knowledge_base.get(&question.topic) {
            let text = question
                .concept
                .as_deref()
                .and_then(|concept| entry.note(concept))
                .unwrap_or_else(|| entry.aspect(question.aspect));

            debug!(
                topic = %entry.topic,
                aspect = ?question.aspect,
                "Tutor answered from knowledge base"
            );

            return Ok(TutorAnswer {
                source: AnswerSource::KnowledgeBase,
                topic: Some(entry.topic.clone()),
                text: text.to_string(),
            });
        }

        match (&self.fallback, self.fallback_enabled) {
            (Some(service), true) => {
                let query = question.aspect.external_query(&question.topic);
                info!(
                    service = service.name(),
                    topic = %question.topic,
                    "Topic not in knowledge base, asking external service"
                );

                let text = service.answer(&query).await.map_err(|e| {
                    warn!(service = service.name(), error = %e, "External answer failed");
                    e
                })?;

                Ok(TutorAnswer {
                    source: AnswerSource::External,
                    topic: None,
                    text,
                })
            }
            _ => {
                let known: Vec<&str> = self.knowledge_base.topics().collect();
                Ok(TutorAnswer {
                    source: AnswerSource::NotFound,
                    topic: None,
                    text: format!(
                        "I don't have information about {}. Try asking about: {}",
                        question.topic,
                        known.join(", ")
                    ),
                })
            }
        }
    }
}
