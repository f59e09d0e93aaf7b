pub mod engine;
pub mod higher_condition;
pub mod lower_condition;
pub mod no_condition;
pub mod predicates;

pub use engine::*;
pub use predicates::*;
