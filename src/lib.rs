//! Privalint analyzes privacy-policy collection claims extracted upstream,
//! detecting self-contradictions and over-broad collection statements via
//! three subsumption ontologies and an algebraic rule engine.

pub use privalint_analyzer as analyzer;
pub use privalint_conflict as conflict;
pub use privalint_core as claims;
pub use privalint_ontology as ontology;

pub use privalint_analyzer::{
    analyze_document, build_report, normalize, post_process_report, read_report, write_report,
};
pub use privalint_conflict::{RuleEngine, RuleOutcome};
pub use privalint_core::{Claim, Evidence, EvidenceClaim, PrivalintError, PrivalintResult, Verb};
pub use privalint_ontology::OntologySet;
