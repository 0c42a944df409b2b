use crate::error::{RecommenderError, Result};
use crate::models::MasteryVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Threshold at or above which a topic counts as mastered
pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.7;

/// One topic and its direct prerequisites, as declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl TopicEntry {
    pub fn new(name: &str, prerequisites: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Static topic/prerequisite graph.
///
/// Declaration order is significant: it is the order in which the rule
/// engine emits recommendations. Every prerequisite must itself be a
/// declared topic; cycles are allowed because only direct prerequisites
/// are ever inspected.
#[derive(Debug, Clone)]
pub struct TopicGraph {
    entries: Vec<TopicEntry>,
    index: HashMap<String, usize>,
}

impl TopicGraph {
    /// Build a graph, failing on duplicate topics or dangling prerequisites
    pub fn from_entries(entries: Vec<TopicEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(RecommenderError::DuplicateTopic(entry.name.clone()));
            }
        }

        for entry in &entries {
            if let Some(missing) = entry
                .prerequisites
                .iter()
                .find(|prerequisite| !index.contains_key(*prerequisite))
            {
                return Err(RecommenderError::UnknownPrerequisite {
                    topic: entry.name.clone(),
                    prerequisite: missing.clone(),
                });
            }
        }

        Ok(Self { entries, index })
    }

    /// Parse a JSON array of `{ "name": .., "prerequisites": [..] }`
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<TopicEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// The shipped CS fundamentals curriculum
    pub fn default_curriculum() -> Self {
        let entries = vec![
            TopicEntry::new("Programming Basics", &[]),
            TopicEntry::new("Data Structures", &["Programming Basics"]),
            TopicEntry::new("Algorithms", &["Data Structures"]),
            TopicEntry::new("OOP", &["Programming Basics"]),
            TopicEntry::new("Databases", &["Programming Basics"]),
            TopicEntry::new("Operating Systems", &["Data Structures"]),
        ];
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.index.contains_key(topic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct prerequisites of `topic`, `None` for an undeclared topic
    pub fn prerequisites(&self, topic: &str) -> Option<&[String]> {
        self.index
            .get(topic)
            .map(|&i| self.entries[i].prerequisites.as_slice())
    }

    /// Topics that list `topic` as a direct prerequisite, in declaration order
    pub fn dependents(&self, topic: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.prerequisites.iter().any(|p| p == topic))
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Topics the learner has not mastered yet but is ready for.
    ///
    /// A topic qualifies when its own mastery is below `threshold` and
    /// every direct prerequisite is at or above it. Output follows
    /// declaration order.
    pub fn recommend_next_topics(&self, mastery: &MasteryVector, threshold: f64) -> Vec<String> {
        let recommendations: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| mastery.get(&entry.name) < threshold)
            .filter(|entry| {
                entry
                    .prerequisites
                    .iter()
                    .all(|prerequisite| mastery.get(prerequisite) >= threshold)
            })
            .map(|entry| entry.name.clone())
            .collect();

        debug!(
            threshold = threshold,
            eligible = recommendations.len(),
            "Rule engine evaluated topic graph"
        );

        recommendations
    }
}

impl Default for TopicGraph {
    fn default() -> Self {
        Self::default_curriculum()
    }
}

/// Rule-based recommendations against the default curriculum, built
/// fresh on every call
pub fn recommend_next_topics(mastery: &MasteryVector, threshold: f64) -> Vec<String> {
    TopicGraph::default_curriculum().recommend_next_topics(mastery, threshold)
}
