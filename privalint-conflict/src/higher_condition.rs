use crate::predicates::{condition_higher, data_higher, data_lower, entity_higher, entity_lower};
use privalint_core::{Claim, Verb};
use privalint_ontology::OntologySet;

// Rules for pairs where the positive claim's condition is broader than the
// negation's. The collection statement over-claims relative to the narrower
// negation, so each of the nine placements is a narrowing, not a strict
// contradiction.

pub fn apply(
    ontologies: &OntologySet,
    positive: &Claim,
    negative: &Claim,
    _contradictions: &mut Vec<(Claim, Claim)>,
    narrowings: &mut Vec<(Claim, Claim)>,
) {
    if positive.verb != Verb::Collect || negative.verb != Verb::NotCollect {
        return;
    }
    // data equal
    n1(ontologies, positive, negative, narrowings);
    n2(ontologies, positive, negative, narrowings);
    n3(ontologies, positive, negative, narrowings);
    // positive data broader
    n4(ontologies, positive, negative, narrowings);
    n5(ontologies, positive, negative, narrowings);
    n6(ontologies, positive, negative, narrowings);
    // positive data narrower
    n7(ontologies, positive, negative, narrowings);
    n8(ontologies, positive, negative, narrowings);
    n9(ontologies, positive, negative, narrowings);
}

// (companyX, collect, email, any condition) vs (companyX, not collect, email, children)
fn n1(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && p.data == n.data
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email, any condition) vs (companyX, not collect, email, children)
fn n2(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && p.data == n.data
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, any condition) vs (advertiser, not collect, email, children)
fn n3(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && p.data == n.data
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, personal info, any condition) vs (companyX, not collect, email, children)
fn n4(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && data_higher(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, personal info, any condition) vs (companyX, not collect, email, children)
fn n5(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && data_higher(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, personal info, any condition) vs (advertiser, not collect, email, children)
fn n6(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && data_higher(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, any condition) vs (companyX, not collect, personal info, children)
fn n7(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && data_lower(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email, any condition) vs (companyX, not collect, personal info, children)
fn n8(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && data_lower(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, any condition) vs (advertiser, not collect, personal info, children)
fn n9(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && data_lower(o, &p.data, &n.data)
        && condition_higher(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}
