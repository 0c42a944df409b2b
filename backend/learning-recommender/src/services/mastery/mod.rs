// Mastery scoring
//
// mastery = 0.5 * quiz + 0.3 * time + 0.2 * revisits
//
// Where each signal is normalized against an optimal baseline:
//   - quiz:     score / 100
//   - time:     min(minutes / 60, 1)
//   - revisits: min(count / 3, 1)
//
// The weighted sum is clamped to [0, 1].

use serde::{Deserialize, Serialize};

const QUIZ_FULL_MARKS: f64 = 100.0;
const OPTIMAL_MINUTES: f64 = 60.0;
const OPTIMAL_REVISITS: f64 = 3.0;

const QUIZ_WEIGHT: f64 = 0.5;
const TIME_WEIGHT: f64 = 0.3;
const REVISIT_WEIGHT: f64 = 0.2;

/// Raw learning-activity signals for one topic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivitySignals {
    /// Quiz score, nominally 0-100
    pub quiz_score: f64,
    /// Minutes spent on the topic
    pub time_spent: f64,
    /// Number of times the topic was revisited
    pub revisit_count: f64,
}

impl ActivitySignals {
    pub fn new(quiz_score: f64, time_spent: f64, revisit_count: f64) -> Self {
        Self {
            quiz_score,
            time_spent,
            revisit_count,
        }
    }

    pub fn mastery(&self) -> f64 {
        compute_mastery(self.quiz_score, self.time_spent, self.revisit_count)
    }
}

/// Compute topic mastery from activity signals.
///
/// Accepts any input: negative values drive their term below zero and
/// values above baseline saturate at 1.0 (quiz is left unsaturated but the
/// final clamp bounds it). The result is always finite and in `[0, 1]`.
pub fn compute_mastery(quiz_score: f64, time_spent: f64, revisit_count: f64) -> f64 {
    let quiz = quiz_score / QUIZ_FULL_MARKS;
    let time = (time_spent / OPTIMAL_MINUTES).min(1.0);
    let revisits = (revisit_count / OPTIMAL_REVISITS).min(1.0);

    let mastery = QUIZ_WEIGHT * quiz + TIME_WEIGHT * time + REVISIT_WEIGHT * revisits;

    if mastery.is_nan() {
        return 0.0;
    }
    mastery.clamp(0.0, 1.0)
}

/// Coarse interpretation of a mastery score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryBand {
    Excellent,
    Good,
    Progressing,
    NeedsWork,
}

impl MasteryBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MasteryBand::Excellent
        } else if score >= 0.6 {
            MasteryBand::Good
        } else if score >= 0.4 {
            MasteryBand::Progressing
        } else {
            MasteryBand::NeedsWork
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryBand::Excellent => "excellent",
            MasteryBand::Good => "good",
            MasteryBand::Progressing => "progressing",
            MasteryBand::NeedsWork => "needs_work",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            MasteryBand::Excellent => "You have mastered this topic.",
            MasteryBand::Good => "Good understanding. Keep practicing to master it fully.",
            MasteryBand::Progressing => "You're making progress. More practice needed.",
            MasteryBand::NeedsWork => {
                "You need more work on this topic. Consider revisiting the basics."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_and_zero_activity() {
        assert_eq!(compute_mastery(100.0, 60.0, 3.0), 1.0);
        assert_eq!(compute_mastery(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_weighted_average() {
        let mastery = compute_mastery(80.0, 30.0, 2.0);
        let expected = 0.5 * 0.8 + 0.3 * 0.5 + 0.2 * (2.0 / 3.0);
        assert!((mastery - expected).abs() < 1e-9);
        assert!((mastery - 0.6833).abs() < 1e-3);
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        assert_eq!(compute_mastery(-10.0, -5.0, -1.0), 0.0);
    }

    #[test]
    fn test_large_inputs_clamp_to_one() {
        assert_eq!(compute_mastery(1000.0, 1000.0, 100.0), 1.0);
        let mastery = compute_mastery(120.0, 120.0, 5.0);
        assert!((0.0..=1.0).contains(&mastery));
    }

    #[test]
    fn test_non_finite_inputs_stay_in_range() {
        let cases = [
            (f64::NAN, 30.0, 1.0),
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            (f64::NEG_INFINITY, 0.0, 0.0),
            (50.0, f64::INFINITY, f64::INFINITY),
        ];
        for (quiz, time, revisits) in cases {
            let mastery = compute_mastery(quiz, time, revisits);
            assert!(mastery.is_finite());
            assert!((0.0..=1.0).contains(&mastery));
        }
    }

    #[test]
    fn test_signals_match_free_function() {
        let signals = ActivitySignals::new(75.0, 30.0, 2.0);
        assert_eq!(signals.mastery(), compute_mastery(75.0, 30.0, 2.0));
    }

    #[test]
    fn test_mastery_bands() {
        assert_eq!(MasteryBand::from_score(0.95), MasteryBand::Excellent);
        assert_eq!(MasteryBand::from_score(0.8), MasteryBand::Excellent);
        assert_eq!(MasteryBand::from_score(0.65), MasteryBand::Good);
        assert_eq!(MasteryBand::from_score(0.4), MasteryBand::Progressing);
        assert_eq!(MasteryBand::from_score(0.1), MasteryBand::NeedsWork);
    }
}
