//! Difficulty-based ordering of candidate questions.

use assessment_domain::question::{DifficultyLevel, Question};
use rand::seq::SliceRandom;
use rand::Rng;

/// Order questions by closeness to a preferred difficulty.
///
/// Without a preference the result is a uniform shuffle. With one, questions
/// are sorted by ascending ordinal distance; the list is shuffled first and
/// the sort is stable, so questions at equal distance come out in random
/// order rather than storage order. Exact matches always lead.
pub fn rank_by_difficulty<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    preferred: Option<DifficultyLevel>,
    rng: &mut R,
) -> Vec<Question> {
    questions.shuffle(rng);
    if let Some(preferred) = preferred {
        questions.sort_by_key(|q| q.difficulty.distance(preferred));
    }
    questions
}
