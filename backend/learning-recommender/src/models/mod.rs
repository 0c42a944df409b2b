use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mastery scores keyed by topic name.
///
/// Keys iterate in sorted order so every structure derived from a vector
/// is deterministic. Scores are not range-checked; a topic that is absent
/// reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryVector(BTreeMap<String, f64>);

impl MasteryVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mastery of `topic`, 0 when the learner has no score for it
    pub fn get(&self, topic: &str) -> f64 {
        self.0.get(topic).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.0.contains_key(topic)
    }

    pub fn set(&mut self, topic: impl Into<String>, score: f64) {
        self.0.insert(topic.into(), score);
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(topic, score)| (topic.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MasteryVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A learner known to the system at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mastery: MasteryVector,
}

impl Learner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, mastery: MasteryVector) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mastery,
        }
    }
}

/// Snapshot of every learner's mastery vector, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTopicMatrix {
    rows: Vec<(String, MasteryVector)>,
}

impl UserTopicMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_learners<'a>(learners: impl IntoIterator<Item = &'a Learner>) -> Self {
        let mut matrix = Self::new();
        for learner in learners {
            matrix.insert(learner.id.clone(), learner.mastery.clone());
        }
        matrix
    }

    /// Insert a learner row. Re-inserting an id replaces the vector but
    /// keeps the learner's original position.
    pub fn insert(&mut self, learner_id: impl Into<String>, mastery: MasteryVector) {
        let learner_id = learner_id.into();
        match self.rows.iter_mut().find(|(id, _)| *id == learner_id) {
            Some((_, existing)) => *existing = mastery,
            None => self.rows.push((learner_id, mastery)),
        }
    }

    pub fn get(&self, learner_id: &str) -> Option<&MasteryVector> {
        self.rows
            .iter()
            .find(|(id, _)| id == learner_id)
            .map(|(_, mastery)| mastery)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MasteryVector)> {
        self.rows.iter().map(|(id, mastery)| (id.as_str(), mastery))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MasteryVector)> for UserTopicMatrix {
    fn from_iter<I: IntoIterator<Item = (K, MasteryVector)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (learner_id, mastery) in iter {
            matrix.insert(learner_id, mastery);
        }
        matrix
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMethod {
    RuleBased,
    Collaborative,
    Hybrid,
}

impl RecommendationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMethod::RuleBased => "rule_based",
            RecommendationMethod::Collaborative => "collaborative",
            RecommendationMethod::Hybrid => "hybrid",
        }
    }
}

/// Who a recommendation is for
#[derive(Debug, Clone, PartialEq)]
pub enum LearnerRef {
    /// A learner id looked up in the startup snapshot
    Known(String),
    /// A learner described only by caller-supplied mastery
    AdHoc(MasteryVector),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub topics: Vec<String>,
    pub source: RecommendationMethod,
    /// Set when collaborative filtering was requested for a learner
    /// outside the snapshot and the rule engine answered instead.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerDashboard {
    pub learner_id: String,
    pub name: String,
    pub mastery: MasteryVector,
    pub rule_based: Vec<String>,
    pub collaborative: Vec<String>,
}
