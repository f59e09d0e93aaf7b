use crate::predicates::{data_higher, data_lower, entity_higher, entity_lower};
use privalint_core::{Claim, Verb};
use privalint_ontology::OntologySet;

// Rules for pairs whose conditions are identical, so the condition carries
// no information. Five placements contradict outright; four mark the
// positive claim as broader than the negation.

pub fn apply(
    ontologies: &OntologySet,
    positive: &Claim,
    negative: &Claim,
    contradictions: &mut Vec<(Claim, Claim)>,
    narrowings: &mut Vec<(Claim, Claim)>,
) {
    if positive.verb != Verb::Collect || negative.verb != Verb::NotCollect {
        return;
    }
    c1(positive, negative, contradictions);
    c2(ontologies, positive, negative, contradictions);
    c3(ontologies, positive, negative, contradictions);
    c4(ontologies, positive, negative, contradictions);
    c5(ontologies, positive, negative, contradictions);
    n1(ontologies, positive, negative, narrowings);
    n2(ontologies, positive, negative, narrowings);
    n3(ontologies, positive, negative, narrowings);
    n4(ontologies, positive, negative, narrowings);
}

// (companyX, collect, email) vs (companyX, not collect, email)
fn c1(p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity && p.data == n.data {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email) vs (companyX, not collect, personal info)
fn c2(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity && data_lower(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email) vs (advertiser, not collect, email)
fn c3(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity) && p.data == n.data {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, email) vs (advertiser, not collect, personal info)
fn c4(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity) && data_lower(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email) vs (companyX, not collect, personal info)
fn c5(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity) && data_lower(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}

// Narrowings keep the negation on the lower or equal data item.
// (companyX, collect, personal info) vs (companyX, not collect, email)
fn n1(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if p.entity == n.entity && data_higher(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}

// (companyX, collect, personal info) vs (advertiser, not collect, email)
fn n2(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_lower(o, &p.entity, &n.entity) && data_higher(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, email) vs (companyX, not collect, email)
fn n3(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity) && p.data == n.data {
        out.push((p.clone(), n.clone()));
    }
}

// (advertiser, collect, personal info) vs (companyX, not collect, email)
fn n4(o: &OntologySet, p: &Claim, n: &Claim, out: &mut Vec<(Claim, Claim)>) {
    if entity_higher(o, &p.entity, &n.entity) && data_higher(o, &p.data, &n.data) {
        out.push((p.clone(), n.clone()));
    }
}
