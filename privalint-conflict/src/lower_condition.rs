use crate::predicates::{condition_lower, data_higher, data_lower, entity_higher, entity_lower};
use privalint_core::{Claim, Verb};
use privalint_ontology::OntologySet;

// Rules for pairs where the positive claim's condition is stricter than the
// negation's. A negation stated without restriction covers every stricter
// circumstance, so each of the nine placements is a contradiction.

pub fn apply(
    ontologies: &OntologySet,
    positive: &Claim,
    negative: &Claim,
    contradictions: &mut Vec<(Claim, Claim)>,
    _narrowings: &mut Vec<(Claim, Claim)>,
) {
    if positive.verb != Verb::Collect || negative.verb != Verb::NotCollect {
        return;
    }
    // data equal
    c1(ontologies, positive, negative, contradictions);
    c2(ontologies, positive, negative, contradictions);
    c3(ontologies, positive, negative, contradictions);
    // positive data broader
    c4(ontologies, positive, negative, contradictions);
    c5(ontologies, positive, negative, contradictions);
    c6(ontologies, positive, negative, contradictions);
    // positive data narrower
    c7(ontologies, positive, negative, contradictions);
    c8(ontologies, positive, negative, contradictions);
    c9(ontologies, positive, negative, contradictions);
}

// (companyX, collect, email, children) vs (companyX, not collect, email, any condition)
fn c1(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && p.data == n.data
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email, children) vs (companyX, not collect, email, any condition)
fn c2(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && p.data == n.data
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, children) vs (advertiser, not collect, email, any condition)
fn c3(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && p.data == n.data
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, personal info, children) vs (companyX, not collect, email, any condition)
fn c4(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && data_higher(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, personal info, children) vs (companyX, not collect, email, any condition)
fn c5(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && data_higher(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, personal info, children) vs (advertiser, not collect, email, any condition)
fn c6(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && data_higher(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, children) vs (companyX, not collect, personal info, any condition)
fn c7(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity
        && data_lower(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email, children) vs (companyX, not collect, personal info, any condition)
fn c8(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity)
        && data_lower(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email, children) vs (advertiser, not collect, personal info, any condition)
fn c9(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity)
        && data_lower(o, &p.data, &n.data)
        && condition_lower(o, &p.condition, &n.condition)
    {
        out.push((p.clone(), n.clone()));
    }
}
