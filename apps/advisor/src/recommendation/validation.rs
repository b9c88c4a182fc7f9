use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::questionnaire::QuestionnaireAnswers;

const MAX_CODING_PREF: u8 = 10;
const MAX_ASSISTANCE_LEVEL: u8 = 100;
const HOURS_IN_WEEK: u32 = 168;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireIssue {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireValidation {
    pub passed: bool,
    pub issues: Vec<QuestionnaireIssue>,
}

impl QuestionnaireValidation {
    /// Folds every issue into a single `AppError::Validation` message.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.passed {
            return Ok(());
        }
        let message = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(message))
    }
}

/// Checks the answers that must hold before a submission reaches the engine.
///
/// FAIL conditions:
/// - `studentLevel` missing or blank
/// - `codingPref` above 10
/// - `aiAssistanceLevel` above 100
/// - `hoursPerWeek` above the number of hours in a week
pub fn validate_answers(answers: &QuestionnaireAnswers) -> QuestionnaireValidation {
    let mut issues = Vec::new();

    let has_level = answers
        .student_level
        .as_deref()
        .map(|l| !l.trim().is_empty())
        .unwrap_or(false);
    if !has_level {
        issues.push(issue("studentLevel", "Please select your student level"));
    }

    if answers.coding_pref > MAX_CODING_PREF {
        issues.push(issue(
            "codingPref",
            &format!(
                "must be between 0 and {MAX_CODING_PREF}, got {}",
                answers.coding_pref
            ),
        ));
    }

    if answers.ai_assistance_level > MAX_ASSISTANCE_LEVEL {
        issues.push(issue(
            "aiAssistanceLevel",
            &format!(
                "must be between 0 and {MAX_ASSISTANCE_LEVEL}, got {}",
                answers.ai_assistance_level
            ),
        ));
    }

    if answers.hours_per_week > HOURS_IN_WEEK {
        issues.push(issue(
            "hoursPerWeek",
            &format!("cannot exceed {HOURS_IN_WEEK}, got {}", answers.hours_per_week),
        ));
    }

    QuestionnaireValidation {
        passed: issues.is_empty(),
        issues,
    }
}

fn issue(field: &str, reason: &str) -> QuestionnaireIssue {
    QuestionnaireIssue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
