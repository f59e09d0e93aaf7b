use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered condition of a claim carrying no condition at all.
pub const ANY_CONDITION: &str = "any condition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Collect,
    NotCollect,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Collect => "collect",
            Verb::NotCollect => "not collect",
        }
    }

    /// Exact match on the two canonical forms, whitespace-trimmed.
    pub fn parse(raw: &str) -> Option<Verb> {
        match raw.trim() {
            "collect" => Some(Verb::Collect),
            "not collect" => Some(Verb::NotCollect),
            _ => None,
        }
    }

    /// Coerce a free-form verb token from the upstream model. Anything that
    /// is not one of the canonical forms counts as negative when it contains
    /// a "no"/"not" fragment, positive otherwise.
    pub fn coerce(raw: &str) -> Verb {
        if let Some(verb) = Verb::parse(raw) {
            return verb;
        }
        let lowered = raw.trim().to_lowercase();
        if lowered.contains("not") || lowered.contains("no") {
            Verb::NotCollect
        } else {
            Verb::Collect
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Verb::NotCollect)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized collection statement: who collects what, under which
/// condition. Equality and hashing are structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub entity: String,
    pub verb: Verb,
    pub data: String,
    pub condition: String,
    pub text: Option<String>,
}

impl Claim {
    pub fn new(entity: impl Into<String>, verb: Verb, data: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            verb,
            data: data.into(),
            condition: condition.into(),
            text: None,
        }
    }

    pub fn pretty_print(&self) -> String {
        match &self.text {
            Some(text) => format!(
                "({}, {}, {}, {}, {})",
                self.entity, self.verb, self.data, self.condition, text
            ),
            None => format!(
                "({}, {}, {}, {})",
                self.entity, self.verb, self.data, self.condition
            ),
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print())
    }
}

/// The sentence, window context and candidate sets that back a claim.
/// Candidate sets are rendered in the `{a,b,c}` form the report uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub sentence: String,
    pub context: String,
    pub candidate_entity: String,
    pub candidate_verb: String,
    pub candidate_data: String,
    pub candidate_condition: String,
    pub sentence_integrity: bool,
}

impl Evidence {
    pub fn new(
        sentence: impl Into<String>,
        context: impl Into<String>,
        candidate_entities: &[String],
        candidate_verb: &str,
        candidate_data: &[String],
        candidate_conditions: &[String],
    ) -> Self {
        let sentence = sentence.into();
        let context = context.into();
        let sentence_integrity = sentence == context;
        Self {
            sentence,
            context,
            candidate_entity: render_candidate_set(candidate_entities),
            candidate_verb: candidate_verb.to_string(),
            candidate_data: render_candidate_set(candidate_data),
            candidate_condition: render_candidate_set(candidate_conditions),
            sentence_integrity,
        }
    }
}

pub fn render_candidate_set(items: &[String]) -> String {
    format!("{{{}}}", items.join(","))
}

/// Splits a `{a,b,c}` candidate rendering back into its members.
pub fn parse_candidate_set(rendered: &str) -> Vec<String> {
    rendered
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .map(|s| s.trim().to_string())
        .collect()
}

/// A raw per-sentence extraction before normalization: the claim fields as
/// the upstream model produced them, plus everything needed to build its
/// evidence record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceClaim {
    pub entity: String,
    pub verb: Verb,
    pub data: String,
    pub condition: String,
    pub candidate_entities: Vec<String>,
    pub candidate_verb: String,
    pub candidate_data: Vec<String>,
    pub candidate_conditions: Vec<String>,
    pub sentence: String,
    pub context: String,
}

impl EvidenceClaim {
    pub fn claim(&self) -> Claim {
        Claim::new(
            self.entity.clone(),
            self.verb,
            self.data.clone(),
            self.condition.clone(),
        )
    }

    pub fn evidence(&self) -> Evidence {
        Evidence::new(
            self.sentence.clone(),
            self.context.clone(),
            &self.candidate_entities,
            &self.candidate_verb,
            &self.candidate_data,
            &self.candidate_conditions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_coercion() {
        assert_eq!(Verb::coerce("collect"), Verb::Collect);
        assert_eq!(Verb::coerce(" not collect "), Verb::NotCollect);
        assert_eq!(Verb::coerce("does not share"), Verb::NotCollect);
        assert_eq!(Verb::coerce("never collects"), Verb::Collect);
        assert_eq!(Verb::coerce("no longer store"), Verb::NotCollect);
        assert_eq!(Verb::coerce("use"), Verb::Collect);
    }

    #[test]
    fn pretty_print_without_text() {
        let claim = Claim::new("we", Verb::Collect, "email", ANY_CONDITION);
        assert_eq!(claim.pretty_print(), "(we, collect, email, any condition)");
    }

    #[test]
    fn pretty_print_with_text() {
        let mut claim = Claim::new("we", Verb::NotCollect, "email", "children");
        claim.text = Some("see section 3".to_string());
        assert_eq!(
            claim.pretty_print(),
            "(we, not collect, email, children, see section 3)"
        );
    }

    #[test]
    fn candidate_set_round_trip() {
        let items = vec!["google".to_string(), "we".to_string()];
        let rendered = render_candidate_set(&items);
        assert_eq!(rendered, "{google,we}");
        assert_eq!(parse_candidate_set(&rendered), items);
    }

    #[test]
    fn evidence_integrity_flag() {
        let single = Evidence::new("a sentence", "a sentence", &[], "None", &[], &[]);
        assert!(single.sentence_integrity);
        let windowed = Evidence::new("a sentence", "lead. a sentence. tail", &[], "None", &[], &[]);
        assert!(!windowed.sentence_integrity);
    }
}
