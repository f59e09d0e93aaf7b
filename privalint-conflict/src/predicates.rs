use privalint_core::Claim;
use privalint_ontology::{DataOntology, OntologySet};
use std::collections::BTreeSet;

/// Same entity string, or both recognize to lattice-related actors.
pub fn entity_related(ontologies: &OntologySet, p: &Claim, n: &Claim) -> bool {
    if p.entity == n.entity {
        return true;
    }
    match (
        ontologies.entity.recognize_first(&p.entity),
        ontologies.entity.recognize_first(&n.entity),
    ) {
        (Some(e1), Some(e2)) => {
            ontologies.entity.is_lower(&e1, &e2) || ontologies.entity.is_higher(&e1, &e2)
        }
        _ => false,
    }
}

pub fn entity_lower(ontologies: &OntologySet, entity1: &str, entity2: &str) -> bool {
    match (
        ontologies.entity.recognize_first(entity1),
        ontologies.entity.recognize_first(entity2),
    ) {
        (Some(e1), Some(e2)) => ontologies.entity.is_lower(&e1, &e2),
        _ => false,
    }
}

pub fn entity_higher(ontologies: &OntologySet, entity1: &str, entity2: &str) -> bool {
    entity_lower(ontologies, entity2, entity1)
}

/// Same data string, or lattice-related categories. The personal versus
/// non-personal boundary overrides the lattice in both directions.
pub fn data_related(ontologies: &OntologySet, p: &Claim, n: &Claim) -> bool {
    if p.data == n.data {
        return true;
    }
    match (
        ontologies.data.recognize_for_compare(&p.data),
        ontologies.data.recognize_for_compare(&n.data),
    ) {
        (Some(d1), Some(d2)) => match DataOntology::cluster_override(&d1, &d2) {
            Some(forced) => forced,
            None => ontologies.data.is_lower(&d1, &d2) || ontologies.data.is_higher(&d1, &d2),
        },
        _ => false,
    }
}

pub fn data_lower(ontologies: &OntologySet, data1: &str, data2: &str) -> bool {
    match (
        ontologies.data.recognize_for_compare(data1),
        ontologies.data.recognize_for_compare(data2),
    ) {
        (Some(d1), Some(d2)) => ontologies.data.is_lower(&d1, &d2),
        _ => false,
    }
}

pub fn data_higher(ontologies: &OntologySet, data1: &str, data2: &str) -> bool {
    data_lower(ontologies, data2, data1)
}

fn atoms_related(
    ontologies: &OntologySet,
    a: &Option<String>,
    b: &Option<String>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ontologies.condition.is_related(a, b),
        _ => false,
    }
}

fn atom_lower(ontologies: &OntologySet, a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ontologies.condition.is_lower(a, b),
        _ => false,
    }
}

fn atom_higher(ontologies: &OntologySet, a: &Option<String>, b: &Option<String>) -> bool {
    atom_lower(ontologies, b, a)
}

type Atoms = BTreeSet<Option<String>>;

fn decompose(ontologies: &OntologySet, condition: &str) -> Atoms {
    ontologies.condition.decompose(condition)
}

/// Two condition strings are related when their singleton atoms are
/// lattice-related, or when every atom of the smaller conjunction has a
/// related counterpart in the larger one.
pub fn condition_related(ontologies: &OntologySet, condition1: &str, condition2: &str) -> bool {
    let atoms1 = decompose(ontologies, condition1);
    let atoms2 = decompose(ontologies, condition2);

    if atoms1.len() == 1 && atoms2.len() == 1 {
        return atoms_related(ontologies, atoms1.first().unwrap(), atoms2.first().unwrap());
    }

    let (more, less) = if atoms1.len() >= atoms2.len() {
        (&atoms1, &atoms2)
    } else {
        (&atoms2, &atoms1)
    };
    less.iter()
        .all(|a| more.iter().any(|b| atoms_related(ontologies, a, b)))
}

/// Whether `condition1` is stricter than `condition2`: lattice-lower as
/// singletons, a strict superset of atoms, or at least as many atoms with a
/// lower counterpart for each atom of `condition2`.
pub fn condition_lower(ontologies: &OntologySet, condition1: &str, condition2: &str) -> bool {
    let atoms1 = decompose(ontologies, condition1);
    let atoms2 = decompose(ontologies, condition2);

    if atoms1.len() == 1 && atoms2.len() == 1 {
        return atom_lower(ontologies, atoms1.first().unwrap(), atoms2.first().unwrap());
    }
    if atoms2.is_subset(&atoms1) && atoms1 != atoms2 {
        return true;
    }
    if atoms1.len() >= atoms2.len() {
        return atoms2
            .iter()
            .all(|b| atoms1.iter().any(|a| atom_lower(ontologies, a, b)));
    }
    false
}

/// The dual of `condition_lower`.
pub fn condition_higher(ontologies: &OntologySet, condition1: &str, condition2: &str) -> bool {
    let atoms1 = decompose(ontologies, condition1);
    let atoms2 = decompose(ontologies, condition2);

    if atoms1.len() == 1 && atoms2.len() == 1 {
        return atom_higher(ontologies, atoms1.first().unwrap(), atoms2.first().unwrap());
    }
    if atoms1.is_subset(&atoms2) && atoms1 != atoms2 {
        return true;
    }
    if atoms1.len() <= atoms2.len() {
        return atoms1
            .iter()
            .all(|a| atoms2.iter().any(|b| atom_higher(ontologies, a, b)));
    }
    false
}
