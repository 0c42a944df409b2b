pub mod collaborative;
pub mod engine;
pub mod hybrid;
pub mod mastery;
pub mod rules;
pub mod tutor;

pub use collaborative::CollaborativeRecommender;
pub use engine::{EngineSettings, LearningPathEngine};
pub use hybrid::HybridCombinator;
pub use mastery::{compute_mastery, ActivitySignals, MasteryBand};
pub use rules::{recommend_next_topics, TopicEntry, TopicGraph};
pub use tutor::{AnsweringService, KnowledgeBase, OllamaAnswerService, Tutor};
