use serde::{Deserialize, Serialize};

/// Answers collected by the multi-step questionnaire.
///
/// Every field is optional on the wire; missing fields fall back to the
/// defaults below so the recommendation engine never has to handle absence.
/// `student_level` is the only answer required at the API boundary
/// (see `recommendation::validation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    pub user_id: Option<String>,

    // User profile
    pub user_role: Option<String>,
    pub experience_level: Option<String>,
    pub primary_goal: Option<String>,
    pub preferred_contact: Option<String>,

    // Academic info
    pub student_level: Option<String>,
    pub education: Option<String>,
    pub top_subjects: Vec<String>,

    // Skills & experience
    /// Self-reported interest in coding, 0 – 10.
    pub coding_pref: u8,
    /// `None` when the question was skipped, which is distinct from an empty list.
    pub known_skills: Option<Vec<String>>,
    pub skill_tags: Vec<String>,
    pub github_or_portfolio: String,
    pub resume_text: String,

    // Context & goals
    pub context_info: String,
    pub target_companies: Vec<String>,

    // Preferences
    pub hours_per_week: u32,
    /// Months.
    pub goal_timeline: u32,
    pub location_pref: String,

    // Career aspirations
    pub industries: Vec<String>,
    pub certifications_desired: bool,
    pub constraints: String,
    pub role_seeking: String,
    pub risk_appetite: String,

    // AI preferences
    pub ai_consent: bool,
    pub ai_assistance_level: u8,
}

impl Default for QuestionnaireAnswers {
    fn default() -> Self {
        Self {
            user_id: None,
            user_role: None,
            experience_level: None,
            primary_goal: None,
            preferred_contact: None,
            student_level: None,
            education: None,
            top_subjects: vec![],
            coding_pref: 0,
            known_skills: None,
            skill_tags: vec![],
            github_or_portfolio: String::new(),
            resume_text: String::new(),
            context_info: String::new(),
            target_companies: vec![],
            hours_per_week: 10,
            goal_timeline: 6,
            location_pref: "Remote".to_string(),
            industries: vec![],
            certifications_desired: false,
            constraints: String::new(),
            role_seeking: "internship".to_string(),
            risk_appetite: "balanced".to_string(),
            ai_consent: false,
            ai_assistance_level: 50,
        }
    }
}

impl QuestionnaireAnswers {
    pub fn has_subject(&self, subject: &str) -> bool {
        self.top_subjects.iter().any(|s| s == subject)
    }

    pub fn has_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let answers: QuestionnaireAnswers = serde_json::from_str("{}").unwrap();
        assert_eq!(answers, QuestionnaireAnswers::default());
        assert_eq!(answers.hours_per_week, 10);
        assert_eq!(answers.goal_timeline, 6);
        assert_eq!(answers.location_pref, "Remote");
        assert!(answers.known_skills.is_none());
    }

    #[test]
    fn test_camel_case_fields_are_read() {
        let answers: QuestionnaireAnswers = serde_json::from_value(serde_json::json!({
            "studentLevel": "undergraduate",
            "codingPref": 9,
            "topSubjects": ["Math", "Physics"],
            "knownSkills": [],
            "hoursPerWeek": 20
        }))
        .unwrap();

        assert_eq!(answers.student_level.as_deref(), Some("undergraduate"));
        assert_eq!(answers.coding_pref, 9);
        assert!(answers.has_subject("Math"));
        assert!(!answers.has_subject("math"));
        assert_eq!(answers.known_skills, Some(vec![]));
        assert_eq!(answers.hours_per_week, 20);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let answers: QuestionnaireAnswers =
            serde_json::from_str(r#"{"favouriteColour": "blue", "industries": ["Finance"]}"#)
                .unwrap();
        assert!(answers.has_industry("Finance"));
    }
}
