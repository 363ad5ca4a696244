//! Grouping of normalized answers by competency.

use super::normalizer::normalize;
use super::weights::competency_weight;
use assessment_domain::answer::Answer;
use assessment_domain::competency::{BehavioralIndicator, Competency};
use assessment_domain::identifiers::{CompetencyId, IndicatorId, QuestionId};
use assessment_domain::question::Question;
use assessment_domain::scoring::{CompetencyScore, IndicatorScore};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Resolves each answer through question -> indicator -> competency
pub struct CompetencyAggregator<'a> {
    question_indicator: HashMap<QuestionId, IndicatorId>,
    indicator_competency: HashMap<IndicatorId, CompetencyId>,
    competencies: &'a [Competency],
}

#[derive(Default)]
struct Totals {
    sum: f64,
    answered: usize,
    indicators: IndexMap<IndicatorId, (f64, usize)>,
}

impl<'a> CompetencyAggregator<'a> {
    pub fn new(
        questions: &[Question],
        indicators: &[BehavioralIndicator],
        competencies: &'a [Competency],
    ) -> Self {
        Self {
            question_indicator: questions.iter().map(|q| (q.id, q.indicator_id)).collect(),
            indicator_competency: indicators.iter().map(|i| (i.id, i.competency_id)).collect(),
            competencies,
        }
    }

    fn resolve(&self, question_id: &QuestionId) -> Option<(IndicatorId, CompetencyId)> {
        let indicator = *self.question_indicator.get(question_id)?;
        let competency = *self.indicator_competency.get(&indicator)?;
        Some((indicator, competency))
    }

    /// Score every competency that received at least one valid answer.
    ///
    /// Results follow the order of the competency list. Skipped, valueless
    /// and unresolvable answers are dropped; when a question was answered
    /// more than once only the first answer counts.
    pub fn aggregate(&self, answers: &[Answer]) -> Vec<CompetencyScore> {
        let mut totals: HashMap<CompetencyId, Totals> = HashMap::new();
        let mut counted: HashSet<QuestionId> = HashSet::with_capacity(answers.len());
        let mut discarded = 0usize;

        for answer in answers {
            let Some(question_id) = answer.question_id.filter(|_| answer.is_scoreable()) else {
                discarded += 1;
                continue;
            };
            let Some((indicator, competency)) = self.resolve(&question_id) else {
                discarded += 1;
                continue;
            };
            if !counted.insert(question_id) {
                warn!(%question_id, "Duplicate answer for question ignored");
                continue;
            }

            let value = normalize(answer);
            let entry = totals.entry(competency).or_default();
            entry.sum += value;
            entry.answered += 1;
            let (indicator_sum, indicator_count) = entry.indicators.entry(indicator).or_insert((0.0, 0));
            *indicator_sum += value;
            *indicator_count += 1;
        }

        let scores: Vec<CompetencyScore> = self
            .competencies
            .iter()
            .filter_map(|competency| {
                let totals = totals.remove(&competency.id)?;
                Some(to_score(competency, totals))
            })
            .collect();

        debug!(
            answers = answers.len(),
            discarded,
            competencies = scores.len(),
            "Aggregated answers"
        );
        scores
    }
}

fn percentage(sum: f64, answered: usize) -> f64 {
    if answered == 0 {
        0.0
    } else {
        (100.0 * sum / answered as f64).clamp(0.0, 100.0)
    }
}

fn to_score(competency: &Competency, totals: Totals) -> CompetencyScore {
    let indicators = totals
        .indicators
        .into_iter()
        .map(|(id, (sum, answered))| {
            (
                id,
                IndicatorScore {
                    sum,
                    answered,
                    percentage: percentage(sum, answered),
                },
            )
        })
        .collect();

    CompetencyScore {
        competency_id: competency.id,
        name: competency.name.clone(),
        sum: totals.sum,
        answered: totals.answered,
        percentage: percentage(totals.sum, totals.answered),
        weight: competency_weight(competency),
        big_five: competency.mappings.big_five,
        indicators,
        classification: None,
        comparison_ratio: None,
    }
}
