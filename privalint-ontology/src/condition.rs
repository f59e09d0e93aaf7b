use crate::names::*;
use crate::registry::Registry;
use privalint_core::{PrivalintResult, ANY_CONDITION};
use std::collections::BTreeSet;
use std::path::Path;

/// Condition ontology: recognition plus the merge rules that turn a raw
/// condition string into its canonical `a and b` rendering.
pub struct ConditionOntology {
    registry: Registry,
}

impl ConditionOntology {
    /// Loads `definition/*.yml` and `relation.yml` from the condition
    /// ontology directory.
    pub fn load(dir: &Path) -> PrivalintResult<Self> {
        let mut registry = Registry::new("condition");
        registry.load_definitions(&dir.join("definition"))?;
        install_aliases(&mut registry);
        registry.load_relations(&dir.join("relation.yml"))?;
        registry.finish();
        Ok(Self { registry })
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_lower(&self, a: &str, b: &str) -> bool {
        self.registry.is_lower(a, b)
    }

    pub fn is_higher(&self, a: &str, b: &str) -> bool {
        self.registry.is_higher(a, b)
    }

    pub fn is_related(&self, a: &str, b: &str) -> bool {
        self.registry.is_related(a, b)
    }

    pub fn recognize_first(&self, input: &str) -> Option<String> {
        self.registry.recognize_first(input)
    }

    pub fn recognize_lower(&self, input: &str) -> BTreeSet<String> {
        self.registry.recognize_lower(input)
    }

    /// Applies the condition merge rules to a recognized term set:
    /// 1. `any_condition` never co-occurs with a real condition;
    /// 2. third-party service use and data sharing collapse to third_party;
    /// 3. user input, consent and specific operations collapse to
    ///    user_action;
    /// 4. specific_audience is redundant next to children or region.
    pub fn merge_terms(&self, conditions: &BTreeSet<String>) -> BTreeSet<String> {
        let mut merged = conditions.clone();

        if merged.len() > 1 {
            merged.remove(ANY_CONDITION_TERM);
        }

        if merged.remove(THIRD_PARTY_SERVICE) | merged.remove(DATA_SHARING) {
            merged.insert(THIRD_PARTY.to_string());
        }

        if merged.remove(USER_INPUT) | merged.remove(CONSENT) | merged.remove(SPECIFIC_OPERATION) {
            merged.insert(USER_ACTION.to_string());
        }

        if merged.contains(CHILDREN) || merged.contains(REGION) {
            merged.remove(SPECIFIC_AUDIENCE);
        }

        merged
    }

    /// Renders a merged term set as the canonical condition string.
    pub fn render(&self, conditions: &BTreeSet<String>) -> String {
        let meaningful: Vec<&str> = conditions
            .iter()
            .map(String::as_str)
            .filter(|name| *name != ANY_CONDITION_TERM)
            .collect();
        if meaningful.is_empty() {
            ANY_CONDITION.to_string()
        } else {
            meaningful.join(" and ")
        }
    }

    /// Recognition, specificity reduction, merge rules and rendering in one
    /// step. Idempotent: merging an already-merged string changes nothing.
    pub fn merge_text(&self, raw: &str) -> String {
        let recognized = self.registry.recognize_lower(raw);
        let merged = self.merge_terms(&recognized);
        self.render(&merged)
    }

    /// Splits a merged condition string into its recognized atoms. An atom
    /// that fails recognition stays in the set as `None`; `any_condition`
    /// is dropped when it co-occurs with real atoms.
    pub fn decompose(&self, condition: &str) -> BTreeSet<Option<String>> {
        let mut atoms: BTreeSet<Option<String>> = if condition.contains(" and ") {
            condition
                .split(" and ")
                .map(|part| self.registry.recognize_first(part))
                .collect()
        } else {
            BTreeSet::from([self.registry.recognize_first(condition)])
        };
        if atoms.len() > 1 {
            atoms.remove(&Some(ANY_CONDITION_TERM.to_string()));
        }
        atoms
    }

    /// Maps a condition atom to the vote bucket it belongs to: the first
    /// bucket it equals or sits below in the lattice.
    pub fn vote_bucket(&self, atom: &str) -> Option<&'static str> {
        VOTE_BUCKETS
            .iter()
            .copied()
            .find(|bucket| atom == *bucket || self.registry.is_lower(atom, bucket))
    }
}

fn install_aliases(registry: &mut Registry) {
    for (input, term) in [
        ("not mentioned", ANY_CONDITION_TERM),
        ("no condition", ANY_CONDITION_TERM),
        ("unconditionally", ANY_CONDITION_TERM),
        ("user consent", CONSENT),
        ("opt-in", CONSENT),
        ("opt in", CONSENT),
    ] {
        registry.add_alias(input, term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample() -> ConditionOntology {
        let mut registry = Registry::new("condition");
        registry.add_term(ANY_CONDITION_TERM, &["any[ _]condition", "not mentioned"], &[]);
        registry.add_term(CHILDREN, &["child(ren)?", "under (13|16)", "minor"], &[]);
        registry.add_term(REGION, &["region", "california", "europe"], &[]);
        registry.add_term(SPECIFIC_AUDIENCE, &["specific[ _]audience"], &[]);
        registry.add_term(USER_ACTION, &["user[ _]action"], &[]);
        registry.add_term(CONSENT, &["consent", "permission"], &[]);
        registry.add_term(USER_INPUT, &["\\binput\\b"], &[]);
        registry.add_term(SPECIFIC_OPERATION, &["specific[ _]operation"], &[]);
        registry.add_term(THIRD_PARTY, &["third[ _-]party\\b"], &[]);
        registry.add_term(THIRD_PARTY_SERVICE, &["third[ _-]party[ _]service"], &[]);
        registry.add_term(DATA_SHARING, &["data[ _]sharing"], &[]);
        registry.add_term(SECURITY, &["security"], &[]);
        registry.add_term(RETENTION, &["retention"], &[]);
        for (child, parent) in [
            (CHILDREN, SPECIFIC_AUDIENCE),
            (SPECIFIC_AUDIENCE, ANY_CONDITION_TERM),
            (REGION, ANY_CONDITION_TERM),
            (CONSENT, USER_ACTION),
            (USER_INPUT, USER_ACTION),
            (SPECIFIC_OPERATION, USER_ACTION),
            (USER_ACTION, ANY_CONDITION_TERM),
            (THIRD_PARTY_SERVICE, THIRD_PARTY),
            (DATA_SHARING, THIRD_PARTY),
            (THIRD_PARTY, ANY_CONDITION_TERM),
            (SECURITY, ANY_CONDITION_TERM),
            (RETENTION, ANY_CONDITION_TERM),
        ] {
            registry.add_edge(child, parent);
        }
        registry.finish();
        ConditionOntology::from_registry(registry)
    }

    #[test]
    fn merge_promotes_to_user_action() {
        let ontology = sample();
        assert_eq!(ontology.merge_text("with your consent"), "user_action");
        assert_eq!(ontology.merge_text("input and consent"), "user_action");
    }

    #[test]
    fn merge_promotes_to_third_party() {
        let ontology = sample();
        assert_eq!(ontology.merge_text("data_sharing"), "third_party");
        assert_eq!(
            ontology.merge_text("third_party_service and retention"),
            "retention and third_party"
        );
    }

    #[test]
    fn specific_audience_yields_to_children() {
        let ontology = sample();
        assert_eq!(
            ontology.merge_text("specific_audience and children"),
            "children"
        );
    }

    #[test]
    fn empty_condition_renders_any() {
        let ontology = sample();
        assert_eq!(ontology.merge_text(""), "any condition");
        assert_eq!(ontology.merge_text("for some purpose"), "any condition");
    }

    #[test]
    fn merge_is_idempotent() {
        let ontology = sample();
        for raw in [
            "children and california residents",
            "with your consent",
            "any condition",
            "data_sharing and security",
        ] {
            let once = ontology.merge_text(raw);
            assert_eq!(ontology.merge_text(&once), once);
        }
    }

    #[test]
    fn any_condition_dropped_among_others() {
        let ontology = sample();
        assert_eq!(
            ontology.merge_text("not mentioned unless you are a child"),
            "children"
        );
    }

    #[test]
    fn decompose_handles_conjunctions() {
        let ontology = sample();
        let atoms = ontology.decompose("children and region");
        assert_eq!(
            atoms,
            BTreeSet::from([
                Some(CHILDREN.to_string()),
                Some(REGION.to_string())
            ])
        );
        let unknown = ontology.decompose("quux");
        assert_eq!(unknown, BTreeSet::from([None]));
    }

    #[test]
    fn vote_bucket_accepts_equal_and_lower() {
        let ontology = sample();
        assert_eq!(ontology.vote_bucket(CHILDREN), Some(CHILDREN));
        assert_eq!(ontology.vote_bucket(CONSENT), Some(USER_ACTION));
        assert_eq!(ontology.vote_bucket(DATA_SHARING), Some(THIRD_PARTY));
        assert_eq!(ontology.vote_bucket(ANY_CONDITION_TERM), None);
    }
}
