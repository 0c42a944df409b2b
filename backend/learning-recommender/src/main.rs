use anyhow::Context;
use learning_recommender::{
    models::{LearnerRef, RecommendationMethod},
    seed::sample_learners,
    services::{
        tutor::{TopicAspect, TutorQuestion},
        ActivitySignals, EngineSettings, KnowledgeBase, LearningPathEngine, MasteryBand,
        OllamaAnswerService, TopicGraph, Tutor,
    },
    Config,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load config")?;
    config.validate()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    if config.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    let engine = LearningPathEngine::new(
        TopicGraph::default_curriculum(),
        sample_learners(),
        EngineSettings::from(&config),
    );

    for entry in engine.topic_map().entries() {
        info!(topic = %entry.name, prerequisites = ?entry.prerequisites, "Curriculum");
    }
    let (learners, topics) = engine.collaborative().shape();
    info!(
        learners,
        topics,
        neighbors = engine.settings().collaborative_neighbors,
        top_k = engine.settings().collaborative_top_k,
        "Collaborative snapshot"
    );

    for learner in engine.learners() {
        if let Some(dashboard) = engine.dashboard(&learner.id) {
            info!(
                learner = %dashboard.name,
                rule_based = ?dashboard.rule_based,
                collaborative = ?dashboard.collaborative,
                "Dashboard"
            );
        }

        let hybrid = engine.recommend(
            &LearnerRef::Known(learner.id.clone()),
            RecommendationMethod::Hybrid,
        );
        info!(learner = %learner.name, topics = ?hybrid.topics, "Hybrid recommendation");
    }

    let signals = ActivitySignals::new(75.0, 30.0, 2.0);
    let mastery = signals.mastery();
    let band = MasteryBand::from_score(mastery);
    info!(
        mastery,
        band = band.as_str(),
        "{}",
        band.advice()
    );

    let mut tutor = Tutor::new(KnowledgeBase::extended());
    if config.tutor_fallback_enabled {
        let service = OllamaAnswerService::from_config(&config)
            .context("Failed to build answer service client")?;
        tutor = tutor.with_fallback(Arc::new(service));
    }
    info!(
        topics = tutor.knowledge_base().len(),
        fallback = config.tutor_fallback_enabled,
        "Tutor ready"
    );

    for question in [
        TutorQuestion::new("Machine Learning", TopicAspect::Examples),
        TutorQuestion::new("Quantum Computing", TopicAspect::Definition),
    ] {
        match tutor.ask(&question).await {
            Ok(answer) => info!(
                topic = %question.topic,
                source = ?answer.source,
                "{}",
                answer.text
            ),
            Err(e) => warn!(topic = %question.topic, error = %e, "Tutor could not answer"),
        }
    }

    Ok(())
}
