use std::collections::HashSet;

pub const DEFAULT_HYBRID_LIMIT: usize = 5;

/// Hybrid Layer - merges rule-based and collaborative candidates
///
/// Ranking groups, in order:
/// 1. Topics both strategies agree on
/// 2. Rule-based only
/// 3. Collaborative only
///
/// Within a group, topics keep the order of the list they came from
/// (rule order for groups 1 and 2, collaborative order for group 3).
pub struct HybridCombinator {
    limit: usize,
}

impl Default for HybridCombinator {
    fn default() -> Self {
        Self::new(DEFAULT_HYBRID_LIMIT)
    }
}

impl HybridCombinator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Merge the two lists. Duplicates within either input are collapsed.
    pub fn combine(&self, rule_based: &[String], collaborative: &[String]) -> Vec<String> {
        let rule_set: HashSet<&str> = rule_based.iter().map(String::as_str).collect();
        let collab_set: HashSet<&str> = collaborative.iter().map(String::as_str).collect();

        let agreed = rule_based.iter().filter(|t| collab_set.contains(t.as_str()));
        let rule_only = rule_based.iter().filter(|t| !collab_set.contains(t.as_str()));
        let collab_only = collaborative.iter().filter(|t| !rule_set.contains(t.as_str()));

        let mut seen: HashSet<&str> = HashSet::new();
        let mut merged: Vec<String> = Vec::new();

        for topic in agreed.chain(rule_only).chain(collab_only) {
            if merged.len() >= self.limit {
                break;
            }
            if seen.insert(topic.as_str()) {
                merged.push(topic.clone());
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_intersection_first() {
        let combinator = HybridCombinator::default();
        let merged = combinator.combine(
            &topics(&["Data Structures", "OOP", "Databases"]),
            &topics(&["Databases", "Algorithms"]),
        );
        assert_eq!(
            merged,
            topics(&["Databases", "Data Structures", "OOP", "Algorithms"])
        );
    }

    #[test]
    fn test_disjoint_inputs_do_not_interleave() {
        let combinator = HybridCombinator::default();
        let merged = combinator.combine(&topics(&["A", "B"]), &topics(&["C", "D"]));
        assert_eq!(merged, topics(&["A", "B", "C", "D"]));
    }

    #[test]
    fn test_capped_at_limit() {
        let combinator = HybridCombinator::default();
        assert_eq!(combinator.limit(), DEFAULT_HYBRID_LIMIT);
        let merged = combinator.combine(
            &topics(&["A", "B", "C", "D"]),
            &topics(&["E", "F", "G"]),
        );
        assert_eq!(merged, topics(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_new_learner_degenerates_to_rules() {
        let combinator = HybridCombinator::default();
        let rules = topics(&["A", "B", "C", "D", "E", "F"]);
        assert_eq!(combinator.combine(&rules, &[]), topics(&["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let combinator = HybridCombinator::new(10);
        let merged = combinator.combine(&topics(&["A", "A", "B"]), &topics(&["C", "C"]));
        assert_eq!(merged, topics(&["A", "B", "C"]));
    }

    #[test]
    fn test_both_empty() {
        assert!(HybridCombinator::default().combine(&[], &[]).is_empty());
    }
}
