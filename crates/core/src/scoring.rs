//! Assessment scoring.
//!
//! Scores are percentages in `[0, 100]`. With negative marking enabled every
//! question not answered correctly costs `penalty_percent / total` points.

use serde::{Deserialize, Serialize};

/// Default penalty applied per wrong answer when negative marking is on,
/// expressed as a percentage of one question's weight.
pub const DEFAULT_NEGATIVE_MARK_PERCENT: f64 = 25.0;

/// Default pass mark.
pub const DEFAULT_PASS_PERCENT: f64 = 50.0;

/// Compute a percentage score.
///
/// ```
/// use lms_core::scoring::calculate_score;
///
/// assert_eq!(calculate_score(8, 10, true, 25.0), 75.0);
/// assert_eq!(calculate_score(8, 10, false, 25.0), 80.0);
/// assert_eq!(calculate_score(0, 0, true, 25.0), 0.0);
/// ```
pub fn calculate_score(
    correct: u32,
    total: u32,
    negative_marking: bool,
    penalty_percent: f64,
) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let correct = correct.min(total);
    let total_f = f64::from(total);
    let base = f64::from(correct) / total_f * 100.0;
    let score = if negative_marking {
        let wrong = f64::from(total - correct);
        base - wrong / total_f * penalty_percent
    } else {
        base
    };
    score.clamp(0.0, 100.0)
}

/// Whether a score meets the pass mark.
pub fn is_passing(score: f64, pass_percent: f64) -> bool {
    score >= pass_percent
}

/// Per-attempt answer tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub correct: u32,
    pub wrong: u32,
    pub unanswered: u32,
    pub total: u32,
}

/// Grade submitted answers against an answer key.
///
/// `answers[i]` is the chosen option index for question `i`, or `None` when
/// skipped. Answers beyond the key are ignored; missing trailing answers count
/// as unanswered.
pub fn grade_answers(key: &[i32], answers: &[Option<i32>]) -> GradeSummary {
    let mut summary = GradeSummary {
        correct: 0,
        wrong: 0,
        unanswered: 0,
        total: key.len() as u32,
    };
    for (i, expected) in key.iter().enumerate() {
        match answers.get(i).copied().flatten() {
            Some(chosen) if chosen == *expected => summary.correct += 1,
            Some(_) => summary.wrong += 1,
            None => summary.unanswered += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_marking_deducts_per_wrong_answer() {
        // 80 - (2/10 * 25) = 75
        assert_eq!(calculate_score(8, 10, true, 25.0), 75.0);
    }

    #[test]
    fn no_negative_marking_is_plain_percentage() {
        assert_eq!(calculate_score(8, 10, false, 25.0), 80.0);
        assert!((calculate_score(1, 3, false, 0.0) - 33.333).abs() < 0.001);
    }

    #[test]
    fn empty_assessment_scores_zero() {
        assert_eq!(calculate_score(0, 0, true, 25.0), 0.0);
        assert_eq!(calculate_score(0, 0, false, 25.0), 0.0);
    }

    #[test]
    fn score_never_goes_negative() {
        assert_eq!(calculate_score(0, 4, true, 100.0), 0.0);
    }

    #[test]
    fn correct_is_capped_at_total() {
        assert_eq!(calculate_score(12, 10, true, 25.0), 100.0);
    }

    #[test]
    fn perfect_score_has_no_penalty() {
        assert_eq!(calculate_score(10, 10, true, 25.0), 100.0);
    }

    #[test]
    fn pass_mark_is_inclusive() {
        assert!(is_passing(50.0, 50.0));
        assert!(!is_passing(49.99, 50.0));
    }

    #[test]
    fn grading_counts_each_bucket() {
        let key = [0, 2, 1, 3];
        let answers = [Some(0), Some(1), None];
        let summary = grade_answers(&key, &answers);
        assert_eq!(
            summary,
            GradeSummary {
                correct: 1,
                wrong: 1,
                unanswered: 2,
                total: 4,
            }
        );
    }

    #[test]
    fn extra_answers_are_ignored() {
        let summary = grade_answers(&[1], &[Some(1), Some(0), Some(2)]);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.wrong, 0);
    }
}
