use crate::names::*;
use crate::registry::Registry;
use privalint_core::PrivalintResult;
use std::collections::BTreeSet;
use std::path::Path;

/// Actor ontology: the first party, named companies and services, and the
/// generic third-party categories.
pub struct EntityOntology {
    registry: Registry,
}

impl EntityOntology {
    /// Loads `entity_ontology.yml` and `relation.yml` from the entity
    /// ontology directory.
    pub fn load(dir: &Path) -> PrivalintResult<Self> {
        let mut registry = Registry::new("entity");
        registry.load_definitions(&dir.join("entity_ontology.yml"))?;
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

    pub fn is_first_party(name: &str) -> bool {
        name == WE
    }

    pub fn is_unspecified(name: &str) -> bool {
        name.contains(UNSPECIFIED)
    }

    /// Every canonical entity other than the first party and the
    /// unspecified placeholder denotes some third party.
    pub fn third_party_names(&self) -> Vec<String> {
        self.registry
            .term_names()
            .filter(|name| *name != WE && *name != UNSPECIFIED)
            .map(str::to_string)
            .collect()
    }
}

fn install_aliases(registry: &mut Registry) {
    let aliases: &[(&str, &str)] = &[
        ("we", WE),
        ("the application", WE),
        ("our company", WE),
        ("3rd-party", THIRD_PARTIES),
        ("3rd party", THIRD_PARTIES),
        ("advertiser", "advertiser"),
        ("advertisers", "advertiser"),
        ("analytic", "analytics"),
        ("analytics", "analytics"),
        ("social_media", "social_media"),
        ("ocial_media", "social_media"),
        ("wireless carrier", "wireless_carrier"),
        ("google_map", "google_maps"),
        ("itune", "itunes"),
        ("unity_ad", "unity_ads"),
        ("crashlytic", "crashlytics"),
        ("google_analytic", "google_analytics"),
    ];
    for (input, term) in aliases {
        registry.add_alias(input, term);
    }
}
