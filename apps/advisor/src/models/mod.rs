pub mod plan;
pub mod questionnaire;
pub mod suggestion;
