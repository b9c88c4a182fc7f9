// Recommendation: questionnaire validation and the rule-based suggestion engine.

pub mod engine;
pub mod handlers;
pub mod validation;
