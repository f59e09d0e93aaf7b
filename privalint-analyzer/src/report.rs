use crate::normalize::MergedClaim;
use privalint_core::{Claim, PrivalintError, PrivalintResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The serialized analysis document. Field order is the on-disk key order;
/// every list is sorted so identical inputs produce byte-identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub tuples: Vec<String>,
    #[serde(rename = "basicInfo")]
    pub basic_info: BasicInfo,
    pub nodes: Vec<ReportNode>,
    #[serde(rename = "contradictionPairs")]
    pub contradiction_pairs: Vec<String>,
    #[serde(rename = "narrowingPairs")]
    pub narrowing_pairs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule1: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule2: Option<Vec<SynthesizedNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    #[serde(rename = "policyLength")]
    pub policy_length: usize,
    #[serde(rename = "tupleNum")]
    pub tuple_num: usize,
    #[serde(rename = "entityNum")]
    pub entity_num: usize,
    pub entities: Vec<String>,
    #[serde(rename = "dataItemNum")]
    pub data_item_num: usize,
    #[serde(rename = "dataItems")]
    pub data_items: Vec<String>,
    #[serde(rename = "conditionNum")]
    pub condition_num: usize,
    #[serde(rename = "occuredConditions")]
    pub occured_conditions: Vec<String>,
    #[serde(rename = "contradictionPairNum")]
    pub contradiction_pair_num: usize,
    #[serde(rename = "narrowingPairNum")]
    pub narrowing_pair_num: usize,
    #[serde(rename = "collectionTupleNum")]
    pub collection_tuple_num: usize,
    #[serde(rename = "negationTupleNum")]
    pub negation_tuple_num: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportNode {
    pub tuple: String,
    pub entity: String,
    pub verb: String,
    pub data: String,
    pub condition: String,
    pub evidence: Vec<ReportEvidence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEvidence {
    #[serde(rename = "evidenceId")]
    pub evidence_id: usize,
    pub sentence: String,
    #[serde(rename = "candidateEntity")]
    pub candidate_entity: String,
    #[serde(rename = "candidateData")]
    pub candidate_data: String,
    #[serde(rename = "candidateCondition")]
    pub candidate_condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "sentenceIntegrity")]
    pub sentence_integrity: bool,
}

/// A claim inferred by the post-analysis resolver rather than extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedNode {
    pub entity: String,
    pub data: String,
    pub verb: String,
    pub tuple: String,
}

/// Builds the stable report document from the analysis results.
pub fn build_report(
    name: &str,
    policy_content: &str,
    positives: &[MergedClaim],
    negatives: &[MergedClaim],
    contradictions: &[(Claim, Claim)],
    narrowings: &[(Claim, Claim)],
) -> Report {
    let all: Vec<&MergedClaim> = positives.iter().chain(negatives.iter()).collect();

    let entities = sorted_distinct(all.iter().map(|m| m.claim.entity.trim().to_string()));
    let data_items = sorted_distinct(all.iter().map(|m| m.claim.data.trim().to_string()));
    let conditions = sorted_distinct(all.iter().map(|m| m.claim.condition.trim().to_string()));

    let mut tuples: BTreeSet<String> = BTreeSet::new();
    let mut nodes: Vec<ReportNode> = Vec::new();
    for merged in &all {
        tuples.insert(merged.claim.pretty_print());
        let evidence = merged
            .evidences
            .iter()
            .enumerate()
            .map(|(index, evidence)| ReportEvidence {
                evidence_id: index + 1,
                sentence: evidence.sentence.clone(),
                candidate_entity: evidence.candidate_entity.clone(),
                candidate_data: evidence.candidate_data.clone(),
                candidate_condition: evidence.candidate_condition.clone(),
                context: if evidence.sentence_integrity {
                    None
                } else {
                    Some(evidence.context.clone())
                },
                sentence_integrity: evidence.sentence_integrity,
            })
            .collect();
        nodes.push(ReportNode {
            tuple: merged.claim.pretty_print(),
            entity: merged.claim.entity.trim().to_string(),
            verb: merged.claim.verb.as_str().to_string(),
            data: merged.claim.data.trim().to_string(),
            condition: merged.claim.condition.trim().to_string(),
            evidence,
        });
    }
    nodes.sort_by(|a, b| a.tuple.cmp(&b.tuple));

    let contradiction_pairs = render_pairs(contradictions);
    let narrowing_pairs = render_pairs(narrowings);
    let tuples: Vec<String> = tuples.into_iter().collect();

    Report {
        basic_info: BasicInfo {
            name: name.to_string(),
            policy_length: policy_content.chars().count(),
            tuple_num: tuples.len(),
            entity_num: entities.len(),
            entities,
            data_item_num: data_items.len(),
            data_items,
            condition_num: conditions.len(),
            occured_conditions: conditions.clone(),
            contradiction_pair_num: contradictions.len(),
            narrowing_pair_num: narrowings.len(),
            collection_tuple_num: positives.len(),
            negation_tuple_num: negatives.len(),
        },
        tuples,
        nodes,
        contradiction_pairs,
        narrowing_pairs,
        rule1: None,
        rule2: None,
    }
}

/// Pair lists are deduplicated on their rendered form and sorted; the raw
/// counts stay in `basicInfo`.
fn render_pairs(pairs: &[(Claim, Claim)]) -> Vec<String> {
    let rendered: BTreeSet<String> = pairs
        .iter()
        .map(|(lhs, rhs)| format!("{} vs {}", lhs.pretty_print(), rhs.pretty_print()))
        .collect();
    rendered.into_iter().collect()
}

fn sorted_distinct(items: impl Iterator<Item = String>) -> Vec<String> {
    let set: BTreeSet<String> = items.collect();
    set.into_iter().collect()
}

pub fn write_report(report: &Report, path: &Path) -> PrivalintResult<()> {
    let rendered = serde_yaml::to_string(report)?;
    std::fs::write(path, rendered).map_err(|err| PrivalintError::ReportError {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

pub fn read_report(path: &Path) -> PrivalintResult<Report> {
    let content =
        std::fs::read_to_string(path).map_err(|err| PrivalintError::ReportError {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use privalint_core::{Evidence, Verb, ANY_CONDITION};

    fn merged(entity: &str, verb: Verb, data: &str, condition: &str) -> MergedClaim {
        MergedClaim {
            claim: Claim::new(entity, verb, data, condition),
            evidences: vec![Evidence::new(
                "a sentence",
                "a sentence",
                &[entity.to_string()],
                "None",
                &[data.to_string()],
                &[condition.to_string()],
            )],
        }
    }

    #[test]
    fn empty_analysis_yields_zeroed_statistics() {
        let report = build_report("empty", "", &[], &[], &[], &[]);
        assert!(report.tuples.is_empty());
        assert_eq!(report.basic_info.tuple_num, 0);
        assert_eq!(report.basic_info.entity_num, 0);
        assert_eq!(report.basic_info.contradiction_pair_num, 0);
        assert_eq!(report.basic_info.narrowing_pair_num, 0);
        assert!(report.nodes.is_empty());
    }

    #[test]
    fn report_is_deterministic() {
        let positives = vec![
            merged("we", Verb::Collect, "location", ANY_CONDITION),
            merged("google", Verb::Collect, "email", "children"),
        ];
        let negatives = vec![merged("we", Verb::NotCollect, "email", ANY_CONDITION)];
        let pair = (
            positives[1].claim.clone(),
            negatives[0].claim.clone(),
        );
        let first = build_report("p", "body", &positives, &negatives, &[pair.clone()], &[]);
        let second = build_report("p", "body", &positives, &negatives, &[pair], &[]);
        assert_eq!(
            serde_yaml::to_string(&first).unwrap(),
            serde_yaml::to_string(&second).unwrap()
        );
    }

    #[test]
    fn lists_are_sorted() {
        let positives = vec![
            merged("zebra", Verb::Collect, "location", ANY_CONDITION),
            merged("alpha", Verb::Collect, "email", ANY_CONDITION),
        ];
        let report = build_report("p", "body", &positives, &[], &[], &[]);
        assert_eq!(report.basic_info.entities, vec!["alpha", "zebra"]);
        assert!(report.tuples.windows(2).all(|w| w[0] <= w[1]));
        assert!(report.nodes.windows(2).all(|w| w[0].tuple <= w[1].tuple));
    }

    #[test]
    fn duplicate_pairs_collapse_in_rendering() {
        let p = merged("we", Verb::Collect, "email", ANY_CONDITION);
        let n = merged("we", Verb::NotCollect, "email", ANY_CONDITION);
        let pair = (p.claim.clone(), n.claim.clone());
        let report = build_report(
            "p",
            "",
            &[p],
            &[n],
            &[pair.clone(), pair],
            &[],
        );
        assert_eq!(report.contradiction_pairs.len(), 1);
        assert_eq!(report.basic_info.contradiction_pair_num, 2);
    }

    #[test]
    fn windowed_evidence_keeps_its_context() {
        let mut claim = merged("we", Verb::Collect, "email", ANY_CONDITION);
        claim.evidences = vec![Evidence::new(
            "short sentence",
            "lead. short sentence. tail",
            &[],
            "None",
            &[],
            &[],
        )];
        let report = build_report("p", "", &[claim], &[], &[], &[]);
        let evidence = &report.nodes[0].evidence[0];
        assert!(!evidence.sentence_integrity);
        assert_eq!(
            evidence.context.as_deref(),
            Some("lead. short sentence. tail")
        );
    }

    #[test]
    fn yaml_round_trip_preserves_content() {
        let positives = vec![merged("we", Verb::Collect, "email", ANY_CONDITION)];
        let report = build_report("p", "policy text", &positives, &[], &[], &[]);
        let rendered = serde_yaml::to_string(&report).unwrap();
        let parsed: Report = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed.tuples, report.tuples);
        assert_eq!(parsed.basic_info.policy_length, 11);
        assert_eq!(parsed.nodes.len(), 1);
        assert!(parsed.rule1.is_none());
        assert!(parsed.rule2.is_none());
    }
}
