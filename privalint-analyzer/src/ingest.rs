use privalint_core::{EvidenceClaim, PrivalintResult, Verb};
use privalint_ontology::OntologySet;
use regex::Regex;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// Tuple expressions as the upstream model emits them:
/// `(entity, verb, data, condition)` with comma or semicolon separators.
const TUPLE_PATTERN: &str = r"\((.*?)[;,](.*?)[;,](.*?)[;,](.*?)\)";

fn tuple_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TUPLE_PATTERN).unwrap())
}

/// One line of the upstream extraction file.
#[derive(Debug, Deserialize)]
pub struct ExtractionRecord {
    pub sentence: String,
    pub context: String,
    #[serde(default)]
    pub candidate_entities: Vec<String>,
    #[serde(default)]
    pub candidate_data: Vec<String>,
    #[serde(default)]
    pub candidate_conditions: Vec<String>,
    pub response: String,
}

/// Terminology the upstream pipeline emits for data items that other corpora
/// name differently.
fn translate_data_term(raw: &str) -> &str {
    match raw {
        "cookie / pixel tag" => "cookie",
        "email address" => "email",
        "geolocation" => "location",
        "location data" => "location",
        "advertising id" => "advertising_id",
        "ip address" => "ip_address",
        "postal address" => "address",
        _ => raw,
    }
}

/// Extracts all claims from one record's response text. Conditions are
/// merged into their canonical rendering as they enter the system.
pub fn parse_record(ontologies: &OntologySet, record: &ExtractionRecord) -> Vec<EvidenceClaim> {
    let mut claims = Vec::new();
    for captures in tuple_pattern().captures_iter(&record.response) {
        let entity = captures[1].trim().to_string();
        let verb = Verb::coerce(&captures[2]);
        let data = translate_data_term(captures[3].trim()).to_string();
        let condition = ontologies.condition.merge_text(captures[4].trim());

        claims.push(EvidenceClaim {
            entity,
            verb,
            data,
            condition,
            candidate_entities: record.candidate_entities.clone(),
            candidate_verb: "None".to_string(),
            candidate_data: record.candidate_data.clone(),
            candidate_conditions: record.candidate_conditions.clone(),
            sentence: record.sentence.clone(),
            context: record.context.clone(),
        });
    }
    claims
}

/// Loads every claim from a line-delimited extraction file. Malformed lines
/// are logged and skipped; the document continues.
pub fn load_extraction_file(
    ontologies: &OntologySet,
    path: &Path,
) -> PrivalintResult<Vec<EvidenceClaim>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut claims = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(path = %path.display(), line = index + 1, "unreadable line: {err}");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ExtractionRecord>(&line) {
            Ok(record) => claims.extend(parse_record(ontologies, &record)),
            Err(err) => {
                warn!(path = %path.display(), line = index + 1, "malformed extraction line: {err}");
            }
        }
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_ontologies;

    fn record(response: &str) -> ExtractionRecord {
        ExtractionRecord {
            sentence: "we collect your email".to_string(),
            context: "we collect your email".to_string(),
            candidate_entities: vec!["we".to_string(), "google".to_string()],
            candidate_data: vec!["email".to_string()],
            candidate_conditions: vec!["any condition".to_string()],
            response: response.to_string(),
        }
    }

    #[test]
    fn parses_comma_and_semicolon_tuples() {
        let ontologies = fixture_ontologies();
        let claims = parse_record(
            &ontologies,
            &record("(we, collect, email, any condition) (we; not collect; location; children)"),
        );
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].entity, "we");
        assert_eq!(claims[0].verb, Verb::Collect);
        assert_eq!(claims[0].data, "email");
        assert_eq!(claims[0].condition, "any condition");
        assert_eq!(claims[1].verb, Verb::NotCollect);
        assert_eq!(claims[1].condition, "children");
    }

    #[test]
    fn coerces_nonstandard_verbs() {
        let ontologies = fixture_ontologies();
        let claims = parse_record(
            &ontologies,
            &record("(we, does not share, email, any condition) (we, use, location, consent)"),
        );
        assert_eq!(claims[0].verb, Verb::NotCollect);
        assert_eq!(claims[1].verb, Verb::Collect);
    }

    #[test]
    fn translates_upstream_data_terms() {
        let ontologies = fixture_ontologies();
        let claims = parse_record(
            &ontologies,
            &record("(we, collect, geolocation, any condition)"),
        );
        assert_eq!(claims[0].data, "location");
    }

    #[test]
    fn merges_conditions_on_entry() {
        let ontologies = fixture_ontologies();
        let claims = parse_record(
            &ontologies,
            &record("(we, collect, email, with your consent)"),
        );
        assert_eq!(claims[0].condition, "user_action");
    }

    #[test]
    fn response_without_tuples_yields_nothing() {
        let ontologies = fixture_ontologies();
        assert!(parse_record(&ontologies, &record("not a collection statement")).is_empty());
    }

    #[test]
    fn round_trips_through_pretty_print() {
        let ontologies = fixture_ontologies();
        let original = "(we, collect, email, children)";
        let claims = parse_record(&ontologies, &record(original));
        assert_eq!(claims[0].claim().pretty_print(), original);
    }
}
