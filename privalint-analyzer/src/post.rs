use crate::report::{Report, ReportNode, SynthesizedNode};
use privalint_core::{parse_candidate_set, ANY_CONDITION};
use privalint_ontology::names::{ANDROID, THIRD_PARTIES, WE};
use privalint_ontology::{EntityOntology, OntologySet};
use std::collections::BTreeSet;
use tracing::info;

pub struct PostStats {
    pub resolved_entities: usize,
    pub synthesized_claims: usize,
}

/// Runs both resolver passes over a deserialized report: rewriting
/// unspecified entities to a concrete actor, then synthesizing claims the
/// extraction stage missed from the candidate sets.
pub fn post_process_report(ontologies: &OntologySet, report: &mut Report) -> PostStats {
    let rewritten = resolve_unspecified_entities(ontologies, report);
    let resolved_entities = rewritten.len();
    report.rule1 = Some(rewritten);
    report.tuples = report
        .nodes
        .iter()
        .filter(|node| !EntityOntology::is_unspecified(&node.entity))
        .map(|node| node.tuple.clone())
        .collect();
    report.tuples.sort();

    let synthesized = infer_missing_claims(ontologies, report);
    let synthesized_claims = synthesized.len();
    report.rule2 = Some(synthesized);

    info!(
        resolved_entities,
        synthesized_claims, "post-analysis resolver finished"
    );
    PostStats {
        resolved_entities,
        synthesized_claims,
    }
}

fn is_first_party_node(node: &ReportNode) -> bool {
    node.entity.trim() == WE
}

fn is_negative_node(node: &ReportNode) -> bool {
    node.verb.contains("not")
}

fn rewrite_entity(node: &mut ReportNode, entity: &str) {
    node.entity = entity.to_string();
    node.tuple = format!(
        "({}, {}, {}, {})",
        node.entity, node.verb, node.data, node.condition
    );
}

/// Rewrites every claim whose entity is the unspecified placeholder:
/// to the third-party actor when the evidence names one or when the first
/// party already claims the same data elsewhere, to the first party
/// otherwise. Returns the rewritten tuple renderings.
pub fn resolve_unspecified_entities(ontologies: &OntologySet, report: &mut Report) -> Vec<String> {
    let third_party_alias = ontologies.entity.third_party_names();

    let first_party_collect_data: BTreeSet<String> = report
        .nodes
        .iter()
        .filter(|node| is_first_party_node(node) && !is_negative_node(node))
        .map(|node| node.data.clone())
        .collect();

    let (unspecified, mut kept): (Vec<ReportNode>, Vec<ReportNode>) = report
        .nodes
        .drain(..)
        .partition(|node| EntityOntology::is_unspecified(&node.entity));

    let mut rewritten_tuples = Vec::new();
    for mut node in unspecified {
        let names_third_party = node.evidence.iter().any(|evidence| {
            third_party_alias
                .iter()
                .any(|alias| evidence.candidate_entity.contains(alias.as_str()))
        });

        if names_third_party || first_party_collect_data.contains(&node.data) {
            rewrite_entity(&mut node, THIRD_PARTIES);
        } else {
            rewrite_entity(&mut node, WE);
        }
        rewritten_tuples.push(node.tuple.clone());
        kept.push(node);
    }

    report.nodes = kept;
    rewritten_tuples.sort();
    rewritten_tuples
}

/// Scans the candidate sets of every concrete collection claim for
/// (entity, data) combinations no claim covers, and synthesizes a
/// collection claim for each unless a matching negation forbids it.
pub fn infer_missing_claims(ontologies: &OntologySet, report: &Report) -> Vec<SynthesizedNode> {
    let first_party_negated: BTreeSet<String> = report
        .nodes
        .iter()
        .filter(|node| is_negative_node(node) && is_first_party_node(node))
        .map(|node| node.data.clone())
        .collect();
    let third_party_negated: BTreeSet<String> = report
        .nodes
        .iter()
        .filter(|node| is_negative_node(node) && !is_first_party_node(node))
        .map(|node| node.data.clone())
        .collect();

    let covered: BTreeSet<(String, String)> = report
        .nodes
        .iter()
        .map(|node| (node.entity.clone(), node.data.clone()))
        .collect();

    let collect_nodes = report.nodes.iter().filter(|node| {
        !EntityOntology::is_unspecified(&node.entity) && !is_negative_node(node)
    });

    let mut uncovered: BTreeSet<(String, String)> = BTreeSet::new();
    for node in collect_nodes {
        let mut candidate_entities: BTreeSet<String> = BTreeSet::new();
        let mut candidate_data: BTreeSet<String> = BTreeSet::new();
        for evidence in &node.evidence {
            candidate_entities.extend(parse_candidate_set(&evidence.candidate_entity));
            candidate_data.extend(parse_candidate_set(&evidence.candidate_data));

            // Data items mentioned in the surrounding text but missing from
            // the candidate set still count.
            let mut window = evidence.context.clone().unwrap_or_default();
            window.push_str(&evidence.sentence);
            let window = window.trim().to_lowercase();
            candidate_data.extend(ontologies.data.recognize_all(&window));
        }

        for entity in &candidate_entities {
            for data in &candidate_data {
                if data.is_empty() || covered.contains(&(entity.clone(), data.clone())) {
                    continue;
                }
                if entity == WE || entity == ANDROID || entity.is_empty() {
                    if !first_party_negated.contains(data) {
                        uncovered.insert((WE.to_string(), data.clone()));
                    }
                } else if !third_party_negated.contains(data) {
                    uncovered.insert((THIRD_PARTIES.to_string(), data.clone()));
                }
            }
        }
    }

    uncovered
        .into_iter()
        .map(|(entity, data)| SynthesizedNode {
            tuple: format!("({}, collect, {}, {})", entity, data, ANY_CONDITION),
            verb: "collect".to_string(),
            entity,
            data,
        })
        .collect()
}
