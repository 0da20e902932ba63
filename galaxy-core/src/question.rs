//! Multiplication question generation.
//!
//! Questions are drawn from a fixed three-tier distribution that leans
//! heavily towards pairs of two-digit factors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest factor that can appear in a question.
pub const MIN_FACTOR: u32 = 1;
/// Largest factor that can appear in a question.
pub const MAX_FACTOR: u32 = 19;
/// Lower bound of the "teens" range used by the hard tiers.
pub const TEEN_FACTOR: u32 = 11;

/// Probability that both factors come from the teens.
const HARD_PAIR_CHANCE: f64 = 0.6;
/// Probability, among the remaining draws, of one teen factor.
const MIXED_PAIR_CHANCE: f64 = 0.5;

/// How a question's factors were drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Both factors in 1..=19.
    Easy,
    /// One factor in 1..=19, the other in 11..=19.
    Mixed,
    /// Both factors in 11..=19.
    Hard,
}

/// A single multiplication problem and, once answered, the player's attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub factor_a: u32,
    pub factor_b: u32,
    /// Product computed when the question was generated.
    pub answer: u32,
    pub user_answer: Option<u32>,
    pub is_correct: Option<bool>,
}

impl Question {
    /// Build an unanswered question for the given factors.
    pub fn new(factor_a: u32, factor_b: u32) -> Self {
        Self {
            factor_a,
            factor_b,
            answer: factor_a * factor_b,
            user_answer: None,
            is_correct: None,
        }
    }

    /// Return a copy of this question with the submitted answer recorded.
    pub fn record(&self, submitted: u32) -> Self {
        Self {
            user_answer: Some(submitted),
            is_correct: Some(submitted == self.answer),
            ..self.clone()
        }
    }

    /// Whether an answer has been recorded.
    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    /// Whether this entry was answered incorrectly.
    pub fn is_mistake(&self) -> bool {
        self.is_correct == Some(false)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.factor_a, self.factor_b)
    }
}

/// Generate a question with the skewed difficulty distribution.
pub fn generate<R: Rng>(rng: &mut R) -> Question {
    generate_with_difficulty(rng).0
}

/// Generate a question and report which tier it came from.
pub fn generate_with_difficulty<R: Rng>(rng: &mut R) -> (Question, Difficulty) {
    let difficulty = if rng.gen_bool(HARD_PAIR_CHANCE) {
        Difficulty::Hard
    } else if rng.gen_bool(MIXED_PAIR_CHANCE) {
        Difficulty::Mixed
    } else {
        Difficulty::Easy
    };

    let full = MIN_FACTOR..=MAX_FACTOR;
    let teens = TEEN_FACTOR..=MAX_FACTOR;
    let (a, b) = match difficulty {
        Difficulty::Hard => (rng.gen_range(teens.clone()), rng.gen_range(teens)),
        Difficulty::Mixed => (rng.gen_range(full), rng.gen_range(teens)),
        Difficulty::Easy => (rng.gen_range(full.clone()), rng.gen_range(full)),
    };

    (Question::new(a, b), difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_answer_is_product_and_factors_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let q = generate(&mut rng);
            assert_eq!(q.answer, q.factor_a * q.factor_b);
            assert!((MIN_FACTOR..=MAX_FACTOR).contains(&q.factor_a));
            assert!((MIN_FACTOR..=MAX_FACTOR).contains(&q.factor_b));
            assert!(!q.is_answered());
        }
    }

    #[test]
    fn test_tiers_respect_their_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let (q, difficulty) = generate_with_difficulty(&mut rng);
            match difficulty {
                Difficulty::Hard => {
                    assert!(q.factor_a >= TEEN_FACTOR && q.factor_b >= TEEN_FACTOR)
                }
                Difficulty::Mixed => assert!(q.factor_b >= TEEN_FACTOR),
                Difficulty::Easy => {}
            }
        }
    }

    #[test]
    fn test_distribution_skews_hard() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match generate_with_difficulty(&mut rng).1 {
                Difficulty::Easy => counts[0] += 1,
                Difficulty::Mixed => counts[1] += 1,
                Difficulty::Hard => counts[2] += 1,
            }
        }
        // Expected roughly 20% / 20% / 60%.
        assert!(counts[2] > counts[0] * 2);
        assert!(counts[2] > counts[1] * 2);
        assert!(counts[0] > 1_000 && counts[1] > 1_000);
    }

    #[test]
    fn test_record() {
        let q = Question::new(12, 13);
        let right = q.record(156);
        assert_eq!(right.user_answer, Some(156));
        assert_eq!(right.is_correct, Some(true));
        assert!(!right.is_mistake());

        let wrong = q.record(146);
        assert_eq!(wrong.is_correct, Some(false));
        assert!(wrong.is_mistake());
        assert_eq!(wrong.answer, 156);
    }

    #[test]
    fn test_display() {
        assert_eq!(Question::new(17, 19).to_string(), "17 x 19");
    }
}
