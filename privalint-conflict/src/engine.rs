use crate::predicates::{condition_higher, condition_lower, condition_related, data_related, entity_related};
use crate::{higher_condition, lower_condition, no_condition};
use privalint_core::Claim;
use privalint_ontology::OntologySet;
use tracing::debug;

/// Per-branch accounting for one engine run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleStats {
    pub evaluated_pairs: usize,
    pub equal_condition_pairs: usize,
    pub lower_condition_pairs: usize,
    pub higher_condition_pairs: usize,
}

pub struct RuleOutcome {
    pub contradictions: Vec<(Claim, Claim)>,
    pub narrowings: Vec<(Claim, Claim)>,
    pub stats: RuleStats,
}

/// Enumerates every ordered (positive, negative) claim pair, filters the
/// unrelated ones, and dispatches the related ones to the rule branch the
/// condition relationship selects. Pairs are visited in insertion order and
/// duplicates are kept; deduplication belongs to the report writer.
pub struct RuleEngine<'a> {
    ontologies: &'a OntologySet,
}

impl<'a> RuleEngine<'a> {
    pub fn new(ontologies: &'a OntologySet) -> Self {
        Self { ontologies }
    }

    pub fn apply(&self, positives: &[Claim], negatives: &[Claim]) -> RuleOutcome {
        let mut contradictions = Vec::new();
        let mut narrowings = Vec::new();
        let mut stats = RuleStats::default();

        for positive in positives {
            for negative in negatives {
                stats.evaluated_pairs += 1;

                if !entity_related(self.ontologies, positive, negative)
                    || !data_related(self.ontologies, positive, negative)
                    || !condition_related(self.ontologies, &positive.condition, &negative.condition)
                {
                    continue;
                }

                if positive.condition == negative.condition {
                    stats.equal_condition_pairs += 1;
                    no_condition::apply(
                        self.ontologies,
                        positive,
                        negative,
                        &mut contradictions,
                        &mut narrowings,
                    );
                } else if condition_higher(
                    self.ontologies,
                    &positive.condition,
                    &negative.condition,
                ) {
                    stats.higher_condition_pairs += 1;
                    higher_condition::apply(
                        self.ontologies,
                        positive,
                        negative,
                        &mut contradictions,
                        &mut narrowings,
                    );
                } else if condition_lower(
                    self.ontologies,
                    &positive.condition,
                    &negative.condition,
                ) {
                    stats.lower_condition_pairs += 1;
                    lower_condition::apply(
                        self.ontologies,
                        positive,
                        negative,
                        &mut contradictions,
                        &mut narrowings,
                    );
                }
            }
        }

        debug!(
            evaluated = stats.evaluated_pairs,
            equal_condition = stats.equal_condition_pairs,
            higher_condition = stats.higher_condition_pairs,
            lower_condition = stats.lower_condition_pairs,
            contradictions = contradictions.len(),
            narrowings = narrowings.len(),
            "rule engine pass complete"
        );

        RuleOutcome {
            contradictions,
            narrowings,
            stats,
        }
    }
}
