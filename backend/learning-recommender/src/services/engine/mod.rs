use crate::config::Config;
use crate::models::{
    Learner, LearnerDashboard, LearnerRef, MasteryVector, Recommendation, RecommendationMethod,
    UserTopicMatrix,
};
use crate::services::collaborative::{CollaborativeRecommender, DEFAULT_NEIGHBORS, DEFAULT_TOP_K};
use crate::services::hybrid::{HybridCombinator, DEFAULT_HYBRID_LIMIT};
use crate::services::rules::{TopicGraph, DEFAULT_MASTERY_THRESHOLD};
use tracing::info;

/// Tunables the engine reads on every request
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub mastery_threshold: f64,
    pub collaborative_top_k: usize,
    pub collaborative_neighbors: usize,
    pub dashboard_top_k: usize,
    pub hybrid_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mastery_threshold: DEFAULT_MASTERY_THRESHOLD,
            collaborative_top_k: DEFAULT_TOP_K,
            collaborative_neighbors: DEFAULT_NEIGHBORS,
            dashboard_top_k: 3,
            hybrid_limit: DEFAULT_HYBRID_LIMIT,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            mastery_threshold: config.mastery_threshold,
            collaborative_top_k: config.collaborative_top_k,
            collaborative_neighbors: config.collaborative_neighbors,
            dashboard_top_k: config.dashboard_top_k,
            hybrid_limit: config.hybrid_limit,
        }
    }
}

/// Learning Path Engine - one entry point over every strategy
///
/// Holds the immutable topic graph and learner snapshot built at startup.
/// All methods take `&self` and never mutate, so one engine can be shared
/// across threads behind an `Arc`.
pub struct LearningPathEngine {
    graph: TopicGraph,
    learners: Vec<Learner>,
    snapshot: UserTopicMatrix,
    collaborative: CollaborativeRecommender,
    combinator: HybridCombinator,
    settings: EngineSettings,
}

impl LearningPathEngine {
    pub fn new(graph: TopicGraph, learners: Vec<Learner>, settings: EngineSettings) -> Self {
        let snapshot = UserTopicMatrix::from_learners(&learners);
        let collaborative = CollaborativeRecommender::new(&snapshot)
            .with_neighbors(settings.collaborative_neighbors);
        let combinator = HybridCombinator::new(settings.hybrid_limit);

        info!(
            topics = graph.len(),
            learners = snapshot.len(),
            threshold = settings.mastery_threshold,
            hybrid_limit = combinator.limit(),
            "Learning path engine initialized"
        );

        Self {
            graph,
            learners,
            snapshot,
            collaborative,
            combinator,
            settings,
        }
    }

    pub fn topic_map(&self) -> &TopicGraph {
        &self.graph
    }

    pub fn learners(&self) -> &[Learner] {
        &self.learners
    }

    pub fn collaborative(&self) -> &CollaborativeRecommender {
        &self.collaborative
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn recommend(&self, learner: &LearnerRef, method: RecommendationMethod) -> Recommendation {
        let recommendation = match method {
            RecommendationMethod::RuleBased => Recommendation {
                topics: self.rule_based(learner),
                source: method,
                used_fallback: false,
            },
            RecommendationMethod::Collaborative => match self.known_id(learner) {
                Some(id) => Recommendation {
                    topics: self
                        .collaborative
                        .recommend(id, self.settings.collaborative_top_k),
                    source: method,
                    used_fallback: false,
                },
                // No neighbors to compare an outsider with; fall back to rules
                None => Recommendation {
                    topics: self.rule_based(learner),
                    source: RecommendationMethod::RuleBased,
                    used_fallback: true,
                },
            },
            RecommendationMethod::Hybrid => {
                let rule_based = self.rule_based(learner);
                let collaborative = match self.known_id(learner) {
                    Some(id) => self
                        .collaborative
                        .recommend(id, self.settings.collaborative_top_k),
                    None => Vec::new(),
                };
                Recommendation {
                    topics: self.combinator.combine(&rule_based, &collaborative),
                    source: method,
                    used_fallback: false,
                }
            }
        };

        info!(
            method = method.as_str(),
            source = recommendation.source.as_str(),
            fallback = recommendation.used_fallback,
            count = recommendation.topics.len(),
            "Recommendation served"
        );

        recommendation
    }

    /// Per-learner overview: mastery plus both strategies side by side
    pub fn dashboard(&self, learner_id: &str) -> Option<LearnerDashboard> {
        let learner = self.learners.iter().find(|l| l.id == learner_id)?;

        Some(LearnerDashboard {
            learner_id: learner.id.clone(),
            name: learner.name.clone(),
            mastery: learner.mastery.clone(),
            rule_based: self
                .graph
                .recommend_next_topics(&learner.mastery, self.settings.mastery_threshold),
            collaborative: self
                .collaborative
                .recommend(&learner.id, self.settings.dashboard_top_k),
        })
    }

    fn rule_based(&self, learner: &LearnerRef) -> Vec<String> {
        let empty = MasteryVector::new();
        let mastery = match learner {
            LearnerRef::Known(id) => self.snapshot.get(id).unwrap_or(&empty),
            LearnerRef::AdHoc(mastery) => mastery,
        };
        self.graph
            .recommend_next_topics(mastery, self.settings.mastery_threshold)
    }

    /// Id of a learner present in the snapshot
    fn known_id<'a>(&self, learner: &'a LearnerRef) -> Option<&'a str> {
        match learner {
            LearnerRef::Known(id) if self.collaborative.contains(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_learners;

    fn engine() -> LearningPathEngine {
        LearningPathEngine::new(
            TopicGraph::default_curriculum(),
            sample_learners(),
            EngineSettings::default(),
        )
    }

    #[test]
    fn test_accessors_reflect_construction() {
        let settings = EngineSettings {
            collaborative_neighbors: 1,
            hybrid_limit: 2,
            ..EngineSettings::default()
        };
        let engine = LearningPathEngine::new(
            TopicGraph::default_curriculum(),
            sample_learners(),
            settings,
        );

        assert_eq!(engine.topic_map().len(), 6);
        assert_eq!(engine.collaborative().shape(), (3, 5));
        assert_eq!(engine.settings().hybrid_limit, 2);
        assert_eq!(engine.combinator.limit(), 2);

        let hybrid = engine.recommend(
            &LearnerRef::Known("user1".to_string()),
            RecommendationMethod::Hybrid,
        );
        assert_eq!(hybrid.topics.len(), 2);
    }

    #[test]
    fn test_rule_based_for_known_learner() {
        let rec = engine().recommend(
            &LearnerRef::Known("user1".to_string()),
            RecommendationMethod::RuleBased,
        );
        // Alice has mastered everything up to Algorithms
        assert_eq!(rec.topics, vec!["OOP", "Databases", "Operating Systems"]);
        assert_eq!(rec.source, RecommendationMethod::RuleBased);
        assert!(!rec.used_fallback);
    }

    #[test]
    fn test_collaborative_falls_back_for_ad_hoc_learner() {
        let rec = engine().recommend(
            &LearnerRef::AdHoc(MasteryVector::new()),
            RecommendationMethod::Collaborative,
        );
        assert_eq!(rec.topics, vec!["Programming Basics"]);
        assert_eq!(rec.source, RecommendationMethod::RuleBased);
        assert!(rec.used_fallback);
    }

    #[test]
    fn test_unknown_known_id_is_a_new_learner() {
        let engine = engine();
        let learner = LearnerRef::Known("ghost".to_string());

        let hybrid = engine.recommend(&learner, RecommendationMethod::Hybrid);
        assert_eq!(hybrid.topics, vec!["Programming Basics"]);

        let collaborative = engine.recommend(&learner, RecommendationMethod::Collaborative);
        assert!(collaborative.used_fallback);
    }

    #[test]
    fn test_hybrid_puts_agreed_topics_first() {
        let engine = engine();
        let learner = LearnerRef::Known("user1".to_string());

        let rules = engine.recommend(&learner, RecommendationMethod::RuleBased).topics;
        let collab = engine
            .recommend(&learner, RecommendationMethod::Collaborative)
            .topics;
        let hybrid = engine.recommend(&learner, RecommendationMethod::Hybrid).topics;

        assert!(hybrid.len() <= DEFAULT_HYBRID_LIMIT);
        let agreed: Vec<&String> = rules.iter().filter(|t| collab.contains(t)).collect();
        for (i, topic) in agreed.iter().enumerate() {
            assert_eq!(&&hybrid[i], topic);
        }
        assert_eq!(hybrid, vec!["OOP", "Databases", "Operating Systems"]);
    }

    #[test]
    fn test_dashboard() {
        let engine = engine();
        let dashboard = engine.dashboard("user3").unwrap();
        assert_eq!(dashboard.name, "Charlie");
        assert!(dashboard.collaborative.len() <= 3);
        assert!(engine.dashboard("ghost").is_none());
    }
}
