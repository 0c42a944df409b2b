use crate::models::UserTopicMatrix;
use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// User-based collaborative filtering over mastery vectors.
///
/// Algorithm:
/// 1. Cosine similarity between the target learner's row and every row
///    of the snapshot (self included)
/// 2. Drop the top-ranked entry (the learner themself) and keep the next
///    `n_neighbors`
/// 3. Score each topic the learner has not mastered by the neighbors'
///    similarity-weighted average mastery
///
/// The snapshot is taken at construction and never updated.
pub struct CollaborativeRecommender {
    learners: Vec<String>,
    topics: Vec<String>,
    learner_index: HashMap<String, usize>,
    matrix: Array2<f64>,
    n_neighbors: usize,
}

/// Mastery at or above which a learner's own topic is not recommended
const MASTERED_THRESHOLD: f64 = 0.7;

pub const DEFAULT_NEIGHBORS: usize = 5;
pub const DEFAULT_TOP_K: usize = 5;

impl CollaborativeRecommender {
    pub fn new(snapshot: &UserTopicMatrix) -> Self {
        let learners: Vec<String> = snapshot.iter().map(|(id, _)| id.to_string()).collect();

        // Topic universe in first-seen order across learners
        let mut topics: Vec<String> = Vec::new();
        let mut topic_index: HashMap<String, usize> = HashMap::new();
        for (_, mastery) in snapshot.iter() {
            for topic in mastery.topics() {
                if !topic_index.contains_key(topic) {
                    topic_index.insert(topic.to_string(), topics.len());
                    topics.push(topic.to_string());
                }
            }
        }

        let mut matrix = Array2::<f64>::zeros((learners.len(), topics.len()));
        for (row, (_, mastery)) in snapshot.iter().enumerate() {
            for (topic, score) in mastery.iter() {
                matrix[[row, topic_index[topic]]] = score;
            }
        }

        let learner_index = learners
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        debug!(
            learners = learners.len(),
            topics = topics.len(),
            "Collaborative snapshot built"
        );

        Self {
            learners,
            topics,
            learner_index,
            matrix,
            n_neighbors: DEFAULT_NEIGHBORS,
        }
    }

    /// Override how many neighbors `recommend` draws on
    pub fn with_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    pub fn learners(&self) -> &[String] {
        &self.learners
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// (learners, topics)
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    pub fn contains(&self, learner_id: &str) -> bool {
        self.learner_index.contains_key(learner_id)
    }

    /// Most similar learners by cosine similarity, best first.
    ///
    /// The first entry after sorting is dropped on the assumption that it
    /// is the learner themself. With degenerate (all-zero) rows every
    /// similarity ties at 0 and the dropped entry is simply whichever row
    /// sorts first, which may be a different learner.
    pub fn similar_users(&self, learner_id: &str, n_neighbors: usize) -> Vec<(String, f64)> {
        let Some(&target) = self.learner_index.get(learner_id) else {
            return Vec::new();
        };

        let target_row = self.matrix.row(target);
        let mut ranked: Vec<(usize, f64)> = self
            .matrix
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| (i, cosine_similarity(target_row, row)))
            .collect();

        // Stable: ties keep snapshot order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .skip(1)
            .take(n_neighbors)
            .map(|(i, similarity)| (self.learners[i].clone(), similarity))
            .collect()
    }

    /// Topics the learner has not mastered, ranked by how well similar
    /// learners know them. Empty for unknown learners or when there are
    /// no neighbors to learn from.
    pub fn recommend(&self, learner_id: &str, top_k: usize) -> Vec<String> {
        let Some(&target) = self.learner_index.get(learner_id) else {
            debug!(learner_id = %learner_id, "Collaborative: learner not in snapshot");
            return Vec::new();
        };

        let neighbors = self.similar_users(learner_id, self.n_neighbors);
        if neighbors.is_empty() {
            debug!(learner_id = %learner_id, "Collaborative: no similar learners");
            return Vec::new();
        }

        let weighted: Vec<(usize, f64)> = neighbors
            .iter()
            .filter(|(_, similarity)| *similarity > 0.0)
            .map(|(id, similarity)| (self.learner_index[id], *similarity))
            .collect();

        let own = self.matrix.row(target);
        let mut scored: Vec<(usize, f64)> = Vec::new();
        for (topic, own_mastery) in own.iter().enumerate() {
            if *own_mastery >= MASTERED_THRESHOLD {
                continue;
            }

            let mut weighted_sum = 0.0;
            let mut similarity_sum = 0.0;
            for &(row, similarity) in &weighted {
                weighted_sum += self.matrix[[row, topic]] * similarity;
                similarity_sum += similarity;
            }

            if similarity_sum > 0.0 {
                scored.push((topic, weighted_sum / similarity_sum));
            }
        }

        // Stable: ties keep topic-universe order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let recommendations: Vec<String> = scored
            .into_iter()
            .take(top_k)
            .map(|(topic, _)| self.topics[topic].clone())
            .collect();

        debug!(
            learner_id = %learner_id,
            neighbors = neighbors.len(),
            recommended = recommendations.len(),
            "Collaborative recommendation computed"
        );

        recommendations
    }
}

/// Cosine similarity, defined as 0 when either vector has zero norm.
///
/// Each vector is divided by its largest magnitude first so the dot
/// products cannot overflow for very large scores. Anything that still
/// comes out non-finite counts as 0.
fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let scale_a = a.fold(0.0_f64, |max, x| max.max(x.abs()));
    let scale_b = b.fold(0.0_f64, |max, x| max.max(x.abs()));
    if scale_a == 0.0 || scale_b == 0.0 || !scale_a.is_finite() || !scale_b.is_finite() {
        return 0.0;
    }

    let a = a.mapv(|x| x / scale_a);
    let b = b.mapv(|x| x / scale_b);
    let similarity = a.dot(&b) / (a.dot(&a).sqrt() * b.dot(&b).sqrt());
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}
