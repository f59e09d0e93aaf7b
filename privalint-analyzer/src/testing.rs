//! Shared in-memory ontology fixture for the unit tests in this crate.

use privalint_ontology::names::*;
use privalint_ontology::{
    ConditionOntology, DataOntology, EntityOntology, OntologySet, Registry,
};

pub fn fixture_ontologies() -> OntologySet {
    let mut entity = Registry::new("entity");
    entity.add_term(WE, &[r"\bwe\b", r"\bour company\b"], &[]);
    entity.add_term(UNSPECIFIED, &["unspecified"], &[]);
    entity.add_term(THIRD_PARTIES, &["third[ _-]part(y|ies)"], &[]);
    entity.add_term("advertiser", &["advertiser"], &[]);
    entity.add_term("google", &[r"\bgoogle\b"], &[]);
    entity.add_term("facebook", &["facebook", "meta"], &[]);
    entity.add_edge("advertiser", THIRD_PARTIES);
    entity.add_edge("google", THIRD_PARTIES);
    entity.add_edge("facebook", THIRD_PARTIES);
    entity.finish();

    let mut data = Registry::new("data");
    data.add_term(PERSONAL_INFO, &["personal[ _](data|info(rmation)?)"], &[]);
    data.add_term("contact_information", &["contact[ _]info(rmation)?"], &[]);
    data.add_term("email", &["e-?mail"], &[]);
    data.add_term("location", &["location", "geolocation"], &[]);
    data.add_term(NON_PERSONAL_INFO, &["non-?personal[ _]info(rmation)?"], &[]);
    data.add_term(ANONYMOUS, &["anonym(ous|ized)"], &[]);
    data.add_term(AGGREGATE, &["aggregated?"], &[]);
    data.add_edge("contact_information", PERSONAL_INFO);
    data.add_edge("email", "contact_information");
    data.add_edge("location", PERSONAL_INFO);
    data.add_edge(ANONYMOUS, NON_PERSONAL_INFO);
    data.add_edge(AGGREGATE, NON_PERSONAL_INFO);
    data.finish();

    let mut condition = Registry::new("condition");
    condition.add_term(ANY_CONDITION_TERM, &["any[ _]condition", "not mentioned"], &[]);
    condition.add_term(CHILDREN, &["child(ren)?", "under (13|16)"], &[]);
    condition.add_term(REGION, &["region", "california", "europe"], &[]);
    condition.add_term(SPECIFIC_AUDIENCE, &["specific[ _]audience"], &[]);
    condition.add_term(USER_ACTION, &["user[ _]action"], &[]);
    condition.add_term(CONSENT, &["consent", "permission"], &[]);
    condition.add_term(USER_INPUT, &[r"\binput\b"], &[]);
    condition.add_term(SPECIFIC_OPERATION, &["specific[ _]operation"], &[]);
    condition.add_term(THIRD_PARTY, &["third[ _-]party\\b"], &[]);
    condition.add_term(THIRD_PARTY_SERVICE, &["third[ _-]party[ _]service"], &[]);
    condition.add_term(DATA_SHARING, &["data[ _]sharing"], &[]);
    condition.add_term(SECURITY, &["security"], &[]);
    condition.add_term(RETENTION, &["retention"], &[]);
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
        condition.add_edge(child, parent);
    }
    condition.finish();

    OntologySet {
        entity: EntityOntology::from_registry(entity),
        data: DataOntology::from_registry(data),
        condition: ConditionOntology::from_registry(condition),
    }
}
