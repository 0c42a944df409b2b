pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;

pub use config::Config;
pub use error::{RecommenderError, Result};
pub use models::{Learner, LearnerRef, MasteryVector, RecommendationMethod, UserTopicMatrix};
pub use services::{
    compute_mastery, recommend_next_topics, CollaborativeRecommender, HybridCombinator,
    LearningPathEngine, TopicGraph, Tutor,
};
