// Planning: static milestone tables and the plan draft generator.

pub mod generator;
pub mod handlers;
