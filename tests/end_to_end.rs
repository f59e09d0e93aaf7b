use privalint_analyzer::runner::{analyze_document, post_process_file};
use privalint_analyzer::{normalize, read_report};
use privalint_conflict::RuleEngine;
use privalint_core::{Claim, Verb, ANY_CONDITION};
use privalint_ontology::OntologySet;
use privalint_tests::load_shipped_ontologies;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn claim(entity: &str, verb: Verb, data: &str, condition: &str) -> Claim {
    Claim::new(entity, verb, data, condition)
}

fn engine_outcome(
    ontologies: &OntologySet,
    positives: &[Claim],
    negatives: &[Claim],
) -> (usize, usize) {
    let outcome = RuleEngine::new(ontologies).apply(positives, negatives);
    (outcome.contradictions.len(), outcome.narrowings.len())
}

#[test]
fn base_contradiction() {
    let ontologies = load_shipped_ontologies();
    let (contradictions, narrowings) = engine_outcome(
        &ontologies,
        &[claim("we", Verb::Collect, "email", ANY_CONDITION)],
        &[claim("we", Verb::NotCollect, "email", ANY_CONDITION)],
    );
    assert_eq!(contradictions, 1);
    assert_eq!(narrowings, 0);
}

#[test]
fn base_narrowing() {
    let ontologies = load_shipped_ontologies();
    let (contradictions, narrowings) = engine_outcome(
        &ontologies,
        &[claim("we", Verb::Collect, "personal_info", ANY_CONDITION)],
        &[claim("we", Verb::NotCollect, "email", ANY_CONDITION)],
    );
    assert_eq!(contradictions, 0);
    assert_eq!(narrowings, 1);
}

#[test]
fn condition_lower_contradiction() {
    let ontologies = load_shipped_ontologies();
    let (contradictions, _) = engine_outcome(
        &ontologies,
        &[claim("we", Verb::Collect, "email", "children")],
        &[claim("we", Verb::NotCollect, "email", ANY_CONDITION)],
    );
    assert!(contradictions >= 1);
}

#[test]
fn condition_higher_narrowing() {
    let ontologies = load_shipped_ontologies();
    let (contradictions, narrowings) = engine_outcome(
        &ontologies,
        &[claim("we", Verb::Collect, "email", ANY_CONDITION)],
        &[claim("we", Verb::NotCollect, "email", "children")],
    );
    assert_eq!(contradictions, 0);
    assert!(narrowings >= 1);
}

#[test]
fn non_personal_exclusion() {
    let ontologies = load_shipped_ontologies();
    let (contradictions, narrowings) = engine_outcome(
        &ontologies,
        &[claim("we", Verb::Collect, "personal_info", ANY_CONDITION)],
        &[claim("we", Verb::NotCollect, "anonymous", ANY_CONDITION)],
    );
    assert_eq!(contradictions, 0);
    assert_eq!(narrowings, 0);
}

#[test]
fn any_condition_relates_to_everything() {
    let ontologies = load_shipped_ontologies();
    for other in ["children", "region", "user_action", "third_party", "security", "retention"] {
        assert!(privalint_conflict::condition_related(
            &ontologies,
            ANY_CONDITION,
            other
        ));
        assert!(privalint_conflict::condition_related(
            &ontologies,
            other,
            ANY_CONDITION
        ));
    }
}

fn extraction_line(sentence: &str, context: &str, response: &str) -> String {
    format!(
        concat!(
            "{{\"sentence\": {s:?}, \"context\": {c:?}, ",
            "\"candidate_entities\": [\"we\", \"third parties\"], ",
            "\"candidate_data\": [\"email\", \"location\"], ",
            "\"candidate_conditions\": [\"children\", \"any condition\"], ",
            "\"response\": {r:?}}}"
        ),
        s = sentence,
        c = context,
        r = response
    )
}

fn write_document(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let jsonl = dir.path().join("analysis.jsonl");
    let policy = dir.path().join("cleaned.html");
    let output = dir.path().join("analysis.yaml");

    let lines = [
        extraction_line(
            "we collect your email address",
            "we collect your email address",
            "(we, collect, email, any condition)",
        ),
        extraction_line(
            "we do not collect your email address",
            "under no circumstances: we do not collect your email address",
            "(we, not collect, email, any condition)",
        ),
        extraction_line(
            "we collect location from children",
            "we collect location from children",
            "(we, collect, location, children)",
        ),
    ];
    fs::write(&jsonl, lines.join("\n")).unwrap();
    fs::write(&policy, "<html><body>policy body</body></html>").unwrap();
    (jsonl, output, policy)
}

#[test]
fn full_document_analysis() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let (jsonl, output, policy) = write_document(&dir);

    let summary =
        analyze_document(&ontologies, &jsonl, &output, &policy, "sample").unwrap();
    assert_eq!(summary.collection_claims, 2);
    assert_eq!(summary.negation_claims, 1);
    assert_eq!(summary.contradiction_pairs, 1);

    let report = read_report(&output).unwrap();
    assert_eq!(report.basic_info.name, "sample");
    assert_eq!(report.basic_info.collection_tuple_num, 2);
    assert_eq!(report.basic_info.negation_tuple_num, 1);
    assert_eq!(report.basic_info.contradiction_pair_num, 1);
    assert!(report
        .tuples
        .contains(&"(we, collect, email, any condition)".to_string()));
    assert!(report.contradiction_pairs[0].contains(" vs "));
}

#[test]
fn report_output_is_byte_identical_across_runs() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let (jsonl, output, policy) = write_document(&dir);

    analyze_document(&ontologies, &jsonl, &output, &policy, "sample").unwrap();
    let first = fs::read(&output).unwrap();
    analyze_document(&ontologies, &jsonl, &output, &policy, "sample").unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_extraction_file_produces_zeroed_report() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let jsonl = dir.path().join("analysis.jsonl");
    let policy = dir.path().join("cleaned.html");
    let output = dir.path().join("analysis.yaml");
    fs::write(&jsonl, "").unwrap();
    fs::write(&policy, "").unwrap();

    let summary =
        analyze_document(&ontologies, &jsonl, &output, &policy, "empty").unwrap();
    assert_eq!(summary.collection_claims, 0);
    assert_eq!(summary.negation_claims, 0);
    assert_eq!(summary.contradiction_pairs, 0);
    assert_eq!(summary.narrowing_pairs, 0);

    let report = read_report(&output).unwrap();
    assert_eq!(report.basic_info.tuple_num, 0);
    assert_eq!(report.basic_info.policy_length, 0);
    assert!(report.nodes.is_empty());
}

#[test]
fn hallucinated_negations_are_dropped() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let jsonl = dir.path().join("analysis.jsonl");
    fs::write(
        &jsonl,
        extraction_line(
            "we collect your email address",
            "we collect your email address",
            "(we, not collect, email, any condition)",
        ),
    )
    .unwrap();

    let raw =
        privalint_analyzer::load_extraction_file(&ontologies, &jsonl).unwrap();
    let normalized = normalize(&ontologies, raw);
    assert!(normalized.negatives.is_empty());
}

#[test]
fn voting_collapses_shared_triples() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let jsonl = dir.path().join("analysis.jsonl");
    let lines = [
        extraction_line("s1", "s1", "(we, collect, location, children)"),
        extraction_line("s2", "s2", "(we, collect, location, children)"),
        extraction_line("s3", "s3", "(we, collect, location, any condition)"),
    ];
    fs::write(&jsonl, lines.join("\n")).unwrap();

    let raw =
        privalint_analyzer::load_extraction_file(&ontologies, &jsonl).unwrap();
    let normalized = normalize(&ontologies, raw);
    assert_eq!(normalized.positives.len(), 1);
    assert_eq!(normalized.positives[0].claim.condition, "children");
    assert_eq!(normalized.positives[0].evidences.len(), 3);
}

#[test]
fn post_processing_resolves_unspecified_and_infers_claims() {
    let ontologies = load_shipped_ontologies();
    let dir = TempDir::new().unwrap();
    let (jsonl, output, policy) = write_document(&dir);

    // An unspecified-entity claim with no third-party trace in its evidence.
    let mut lines = fs::read_to_string(&jsonl).unwrap();
    lines.push('\n');
    lines.push_str(&format!(
        concat!(
            "{{\"sentence\": \"email may be collected\", ",
            "\"context\": \"email may be collected\", ",
            "\"candidate_entities\": [], \"candidate_data\": [\"email\"], ",
            "\"candidate_conditions\": [], ",
            "\"response\": \"(unspecified entity, collect, gender, any condition)\"}}"
        ),
    ));
    fs::write(&jsonl, lines).unwrap();

    analyze_document(&ontologies, &jsonl, &output, &policy, "sample").unwrap();
    let stats = post_process_file(&ontologies, &output).unwrap();
    assert_eq!(stats.resolved_entities, 1);

    let post_path = dir.path().join("post_analysis.yaml");
    let post = read_report(&post_path).unwrap();

    // No third-party alias in evidence and no first-party claim on gender:
    // the unspecified actor defaults to the first party.
    assert!(post
        .rule1
        .as_ref()
        .unwrap()
        .contains(&"(we, collect, gender, any condition)".to_string()));
    assert!(post.nodes.iter().all(|n| !n.entity.contains("unspecified")));

    // The candidate sets cover (we, location) and more; everything
    // uncovered and unnegated is synthesized.
    let synthesized = post.rule2.as_ref().unwrap();
    assert!(!synthesized.is_empty());
    assert!(synthesized.iter().all(|n| n.verb == "collect"));
}
