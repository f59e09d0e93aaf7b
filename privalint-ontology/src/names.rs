//! Canonical term names the analysis logic refers to directly.

// Entity family
pub const WE: &str = "we";
pub const UNSPECIFIED: &str = "unspecified";
pub const THIRD_PARTIES: &str = "third_parties";
pub const ANDROID: &str = "android";

// Data family
pub const PERSONAL_INFO: &str = "personal_info";
pub const NON_PERSONAL_INFO: &str = "non_personal_info";
pub const AGGREGATE: &str = "aggregate";
pub const ANONYMOUS: &str = "anonymous";
pub const PSEUDONYMOUS: &str = "pseudonymous";

/// Data categories that describe de-identified rather than personal data.
/// Relatedness across the personal/non-personal boundary is always false.
pub const NON_PERSONAL_CLUSTER: &[&str] =
    &[NON_PERSONAL_INFO, AGGREGATE, ANONYMOUS, PSEUDONYMOUS];

// Condition family
pub const ANY_CONDITION_TERM: &str = "any_condition";
pub const CHILDREN: &str = "children";
pub const REGION: &str = "region";
pub const USER_ACTION: &str = "user_action";
pub const THIRD_PARTY: &str = "third_party";
pub const SECURITY: &str = "security";
pub const RETENTION: &str = "retention";
pub const THIRD_PARTY_SERVICE: &str = "third_party_service";
pub const DATA_SHARING: &str = "data_sharing";
pub const USER_INPUT: &str = "input";
pub const CONSENT: &str = "consent";
pub const SPECIFIC_OPERATION: &str = "specific_operation";
pub const SPECIFIC_AUDIENCE: &str = "specific_audience";

/// Top-level condition buckets, in voting priority order.
pub const VOTE_BUCKETS: &[&str] =
    &[CHILDREN, REGION, USER_ACTION, THIRD_PARTY, SECURITY, RETENTION];
