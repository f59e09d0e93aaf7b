use privalint_core::{has_negation, Claim, Evidence, EvidenceClaim, Verb, ANY_CONDITION};
use privalint_ontology::names::VOTE_BUCKETS;
use privalint_ontology::OntologySet;
use std::collections::BTreeSet;
use std::collections::HashMap;
use tracing::debug;

/// A claim after normalization, carrying every evidence record that backed
/// one of its merged members.
#[derive(Debug, Clone)]
pub struct MergedClaim {
    pub claim: Claim,
    pub evidences: Vec<Evidence>,
}

pub struct NormalizedClaims {
    pub positives: Vec<MergedClaim>,
    pub negatives: Vec<MergedClaim>,
}

/// Runs the full normalization pipeline: verb partition, per-sentence
/// duplicate reduction, the negation filter on negatives, and the final
/// merge by (entity, verb, data) with condition voting.
pub fn normalize(ontologies: &OntologySet, raw: Vec<EvidenceClaim>) -> NormalizedClaims {
    let (positives, negatives): (Vec<_>, Vec<_>) =
        raw.into_iter().partition(|claim| claim.verb == Verb::Collect);

    let positives = reduce_duplicates(ontologies, positives);
    let negatives = reduce_duplicates(ontologies, negatives);
    let negatives = filter_negations(negatives);

    NormalizedClaims {
        positives: merge_by_triple(ontologies, positives),
        negatives: merge_by_triple(ontologies, negatives),
    }
}

/// Groups claims by (entity, verb, data, sentence) and collapses each group
/// to one representative whose condition is the merged union of the group's
/// recognized conditions.
pub fn reduce_duplicates(
    ontologies: &OntologySet,
    claims: Vec<EvidenceClaim>,
) -> Vec<EvidenceClaim> {
    let mut order: Vec<(String, String, String, String)> = Vec::new();
    let mut groups: HashMap<(String, String, String, String), Vec<EvidenceClaim>> = HashMap::new();
    for claim in claims {
        let key = (
            claim.entity.clone(),
            claim.verb.as_str().to_string(),
            claim.data.clone(),
            claim.sentence.clone(),
        );
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(claim);
    }

    let mut reduced = Vec::new();
    for key in order {
        let mut group = groups.remove(&key).unwrap();
        if group.len() > 1 {
            let mut union: BTreeSet<String> = BTreeSet::new();
            for member in &group {
                union.extend(ontologies.condition.recognize_lower(&member.condition));
            }
            let union = ontologies.condition.registry().reduce_specificity(&union);
            let merged = ontologies.condition.merge_terms(&union);
            let condition = ontologies.condition.render(&merged);
            debug!(
                entity = %group[0].entity,
                data = %group[0].data,
                members = group.len(),
                condition = %condition,
                "collapsed duplicate extractions"
            );
            let mut representative = group.swap_remove(0);
            representative.condition = condition;
            reduced.push(representative);
        } else {
            reduced.push(group.pop().unwrap());
        }
    }
    reduced
}

/// Drops negative claims whose surrounding context shows no linguistic
/// negation; these are upstream hallucinations attached to affirmative
/// sentences.
pub fn filter_negations(claims: Vec<EvidenceClaim>) -> Vec<EvidenceClaim> {
    claims
        .into_iter()
        .filter(|claim| claim.verb.is_negative() && has_negation(&claim.context))
        .collect()
}

/// Groups by (entity, verb, data) irrespective of condition; multi-member
/// groups get a voted condition and carry every member's evidence.
pub fn merge_by_triple(
    ontologies: &OntologySet,
    claims: Vec<EvidenceClaim>,
) -> Vec<MergedClaim> {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut groups: HashMap<(String, String, String), Vec<EvidenceClaim>> = HashMap::new();
    for claim in claims {
        let key = (
            claim.entity.clone(),
            claim.verb.as_str().to_string(),
            claim.data.clone(),
        );
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(claim);
    }

    let mut merged = Vec::new();
    for key in order {
        let group = groups.remove(&key).unwrap();
        let condition = if group.len() > 1 {
            vote_condition(ontologies, &group)
        } else {
            group[0].condition.clone()
        };

        let mut claim = group[0].claim();
        claim.condition = condition;
        let evidences = group.iter().map(EvidenceClaim::evidence).collect();
        merged.push(MergedClaim { claim, evidences });
    }
    merged
}

/// Condition voting across a merged group. When more than two thirds of the
/// group carries no condition at all, the group collapses to
/// "any condition"; otherwise conditioned members vote into the top-level
/// buckets and a bucket is kept on more than a third of the valid votes,
/// falling back to the single strongest bucket above a quarter.
fn vote_condition(ontologies: &OntologySet, group: &[EvidenceClaim]) -> String {
    let valid: Vec<&EvidenceClaim> = group
        .iter()
        .filter(|member| !member.condition.contains(ANY_CONDITION))
        .collect();

    if (group.len() - valid.len()) as f64 > group.len() as f64 * 2.0 / 3.0 {
        return group
            .iter()
            .find(|member| member.condition.contains(ANY_CONDITION))
            .map(|member| member.condition.clone())
            .unwrap_or_else(|| ANY_CONDITION.to_string());
    }

    let mut votes: Vec<(&'static str, usize)> =
        VOTE_BUCKETS.iter().map(|bucket| (*bucket, 0)).collect();
    for member in &valid {
        for atom in ontologies.condition.recognize_lower(&member.condition) {
            if let Some(bucket) = ontologies.condition.vote_bucket(&atom) {
                for entry in votes.iter_mut() {
                    if entry.0 == bucket {
                        entry.1 += 1;
                    }
                }
            }
        }
    }

    let threshold = valid.len() as f64 / 3.0;
    let mut chosen: Vec<&'static str> = votes
        .iter()
        .filter(|(_, count)| *count as f64 > threshold)
        .map(|(bucket, _)| *bucket)
        .collect();

    if chosen.is_empty() {
        // Argmax with first-bucket-wins tie resolution.
        let mut best: Option<(&'static str, usize)> = None;
        for (bucket, count) in &votes {
            if best.map_or(true, |(_, top)| *count > top) {
                best = Some((bucket, *count));
            }
        }
        if let Some((bucket, count)) = best {
            if count as f64 > valid.len() as f64 / 4.0 {
                chosen.push(bucket);
            }
        }
    }

    if chosen.is_empty() {
        ANY_CONDITION.to_string()
    } else {
        chosen.join(" and ")
    }
}
