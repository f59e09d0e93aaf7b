use crate::names::*;
use crate::registry::Registry;
use privalint_core::{has_negation, PrivalintResult};
use std::collections::BTreeSet;
use std::path::Path;

/// Data-category ontology with the personal/non-personal boundary rules.
pub struct DataOntology {
    registry: Registry,
}

impl DataOntology {
    /// Loads `data_ontology.yml` and `relation.yml` from the data ontology
    /// directory.
    pub fn load(dir: &Path) -> PrivalintResult<Self> {
        let mut registry = Registry::new("data");
        registry.load_definitions(&dir.join("data_ontology.yml"))?;
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

    pub fn recognize_first(&self, input: &str) -> Option<String> {
        self.registry.recognize_first(input)
    }

    pub fn recognize_all(&self, input: &str) -> BTreeSet<String> {
        self.registry.recognize_all(input)
    }

    pub fn recognize_lower(&self, input: &str) -> BTreeSet<String> {
        self.registry.recognize_lower(input)
    }

    pub fn is_non_personal(name: &str) -> bool {
        NON_PERSONAL_CLUSTER.contains(&name)
    }

    /// Recognition for comparisons: a negated personal-info phrase
    /// ("not personal info") reads as its non-personal complement.
    pub fn recognize_for_compare(&self, input: &str) -> Option<String> {
        let recognized = self.registry.recognize_first(input)?;
        if recognized == PERSONAL_INFO && has_negation(input) {
            Some(NON_PERSONAL_INFO.to_string())
        } else {
            Some(recognized)
        }
    }

    /// The personal/non-personal boundary override: two cluster members are
    /// always related, a cluster member and a personal datum never are.
    /// Returns `None` when the lattice should decide.
    pub fn cluster_override(a: &str, b: &str) -> Option<bool> {
        match (Self::is_non_personal(a), Self::is_non_personal(b)) {
            (true, true) => Some(true),
            (true, false) | (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// Relatedness with the cluster override applied on top of the lattice.
    pub fn is_related(&self, a: &str, b: &str) -> bool {
        match Self::cluster_override(a, b) {
            Some(forced) => forced,
            None => self.registry.is_related(a, b),
        }
    }
}

fn install_aliases(registry: &mut Registry) {
    // Upstream model tokens arrive lemmatized and occasionally clipped;
    // these exact-string shortcuts pin them to a single term.
    let aliases: &[(&str, &str)] = &[
        ("advertising identifier", "advertising_id"),
        ("cookie", "cookie"),
        ("cookies", "cookie"),
        ("email address", "email"),
        ("email_addre", "email"),
        ("ip address", "ip_address"),
        ("ip addre", "ip_address"),
        ("ip_addre", "ip_address"),
        ("mac address", "mac_address"),
        ("mac_addre", "mac_address"),
        ("sim serial number", "sim_serial_number"),
        ("account", "account"),
        ("account_name", "account"),
        ("device", "device"),
        ("device information", "device"),
        ("addre", "address"),
        ("application", "application"),
        ("anonymou", "anonymous"),
        ("pseudonymou", "pseudonymous"),
        ("gender", "gender"),
        ("sex", "gender"),
        ("wifi", "wifi"),
        ("operating system", "os"),
        ("os", "os"),
        ("fraud_data", "non_personal_info"),
        ("demographic data", "aggregate"),
        ("demographic_data", "aggregate"),
        ("demographic information", "aggregate"),
        ("navigation", "internet_activity"),
        ("interaction", "internet_activity"),
        ("engagement", "internet_activity"),
        ("payment data", "protected_information"),
        ("payment_info", "protected_information"),
        ("payment_card_info", "protected_information"),
        ("card detail", "protected_information"),
        ("credit_card_number", "protected_information"),
        ("credit_card_info", "protected_information"),
        ("debit_card_number", "protected_information"),
        ("financial_information", "protected_information"),
        ("health_information", "protected_information"),
        ("health_insurance_information", "protected_information"),
        ("health_medical_information", "protected_information"),
        ("insurance_policy_number", "protected_information"),
        ("education_information", "protected_information"),
        ("employment_information", "protected_information"),
        ("purchase_history", "protected_information"),
        ("marital_status", "protected_information"),
        ("medical_condition", "protected_information"),
        ("medical_history", "protected_information"),
        ("disability", "protected_information"),
        ("physical_description", "protected_information"),
    ];
    for (input, term) in aliases {
        registry.add_alias(input, term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataOntology {
        let mut registry = Registry::new("data");
        registry.add_term(PERSONAL_INFO, &["personal (data|info(rmation)?)"], &[]);
        registry.add_term("contact_information", &["contact info(rmation)?"], &[]);
        registry.add_term("email", &["e-?mail"], &[]);
        registry.add_term(NON_PERSONAL_INFO, &["non-?personal info(rmation)?"], &[]);
        registry.add_term(ANONYMOUS, &["anonym(ous|ized)"], &[]);
        registry.add_term(AGGREGATE, &["aggregated? (data|info)"], &[]);
        registry.add_edge("contact_information", PERSONAL_INFO);
        registry.add_edge("email", "contact_information");
        registry.add_edge(ANONYMOUS, NON_PERSONAL_INFO);
        registry.add_edge(AGGREGATE, NON_PERSONAL_INFO);
        registry.finish();
        DataOntology::from_registry(registry)
    }

    #[test]
    fn cluster_members_always_related() {
        let data = sample();
        assert!(data.is_related(ANONYMOUS, AGGREGATE));
        assert!(data.is_related(AGGREGATE, NON_PERSONAL_INFO));
    }

    #[test]
    fn cluster_never_relates_to_personal() {
        let data = sample();
        assert!(!data.is_related(ANONYMOUS, PERSONAL_INFO));
        assert!(!data.is_related(PERSONAL_INFO, NON_PERSONAL_INFO));
        assert!(!data.is_related("email", ANONYMOUS));
    }

    #[test]
    fn lattice_decides_inside_personal_space() {
        let data = sample();
        assert!(data.is_related("email", PERSONAL_INFO));
        assert!(data.is_lower("email", PERSONAL_INFO));
    }

    #[test]
    fn negated_personal_reads_as_non_personal() {
        let data = sample();
        assert_eq!(
            data.recognize_for_compare("not personal information"),
            Some(NON_PERSONAL_INFO.to_string())
        );
        assert_eq!(
            data.recognize_for_compare("personal information"),
            Some(PERSONAL_INFO.to_string())
        );
        assert_eq!(
            data.recognize_for_compare("not your email"),
            Some("email".to_string())
        );
    }
}
