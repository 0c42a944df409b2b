//! Sample learners used by the demo binary and tests.

use crate::models::{Learner, MasteryVector};

fn mastery(pairs: &[(&str, f64)]) -> MasteryVector {
    pairs.iter().map(|(topic, score)| (*topic, *score)).collect()
}

pub fn sample_learners() -> Vec<Learner> {
    vec![
        Learner::new(
            "user1",
            "Alice",
            mastery(&[
                ("Programming Basics", 0.9),
                ("Data Structures", 0.8),
                ("Algorithms", 0.7),
                ("OOP", 0.6),
                ("Databases", 0.5),
            ]),
        ),
        Learner::new(
            "user2",
            "Bob",
            mastery(&[
                ("Programming Basics", 0.8),
                ("Data Structures", 0.7),
                ("Algorithms", 0.6),
                ("OOP", 0.9),
                ("Databases", 0.8),
            ]),
        ),
        Learner::new(
            "user3",
            "Charlie",
            mastery(&[
                ("Programming Basics", 0.7),
                ("Data Structures", 0.6),
                ("Algorithms", 0.5),
                ("OOP", 0.8),
                ("Databases", 0.9),
            ]),
        ),
    ]
}
