//! Competency weights and the weighted overall percentage.

use assessment_domain::competency::Competency;
use assessment_domain::scoring::CompetencyScore;

/// Boost for competencies mapped to an ESCO concept
pub const ESCO_WEIGHT_BOOST: f64 = 1.15;
/// Further boost for a Big Five mapping on top of ESCO
pub const BIG_FIVE_WEIGHT_BOOST: f64 = 1.1;

/// Aggregation weight for a competency.
///
/// O*NET alone carries no boost, and a Big Five mapping only counts
/// together with ESCO.
pub fn competency_weight(competency: &Competency) -> f64 {
    let mappings = &competency.mappings;
    let mut weight = 1.0;
    if mappings.has_esco() {
        weight *= ESCO_WEIGHT_BOOST;
        if mappings.has_big_five() {
            weight *= BIG_FIVE_WEIGHT_BOOST;
        }
    }
    weight
}

/// Weight-averaged percentage over the scored competencies, 0 when empty.
///
/// Each score's stored `weight` is read once and used on both sides of the
/// ratio, so uniform percentages average to themselves.
pub fn weighted_percentage(scores: &[CompetencyScore]) -> f64 {
    let (numerator, denominator) = scores.iter().fold((0.0, 0.0), |(num, den), score| {
        let weight = score.weight;
        (num + score.percentage * weight, den + weight)
    });

    if denominator > 0.0 {
        (numerator / denominator).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
