pub mod condition;
pub mod data;
pub mod entity;
pub mod names;
pub mod registry;

pub use condition::*;
pub use data::*;
pub use entity::*;
pub use registry::*;

use privalint_core::PrivalintResult;
use std::path::Path;

/// The three family registries, loaded once at startup and shared read-only
/// across every document.
pub struct OntologySet {
    pub entity: EntityOntology,
    pub data: DataOntology,
    pub condition: ConditionOntology,
}

impl OntologySet {
    /// Loads all three families from an ontology root directory laid out as
    /// `entity/`, `data/` and `condition/` subdirectories.
    pub fn load(root: &Path) -> PrivalintResult<Self> {
        Ok(Self {
            entity: EntityOntology::load(&root.join("entity"))?,
            data: DataOntology::load(&root.join("data"))?,
            condition: ConditionOntology::load(&root.join("condition"))?,
        })
    }
}
