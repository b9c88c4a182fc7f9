//! Recommendation Engine: rule-based mapping from questionnaire answers to
//! ranked career suggestions.
//!
//! Rules are evaluated independently, in table order, and every rule that
//! fires contributes its suggestion. The output keeps evaluation order (no
//! sort by score) and is truncated to `MAX_SUGGESTIONS`. When no rule fires
//! the fixed default pair replaces the result wholesale.

use crate::models::questionnaire::QuestionnaireAnswers;
use crate::models::suggestion::{
    CareerSuggestion, Confidence, CostRange, SkillGap, SuggestionSet,
};

pub const MAX_SUGGESTIONS: usize = 3;

const CODING_PREF_THRESHOLD: u8 = 7;

const DEFAULT_HAVE: &[&str] = &["Basic Computer Skills"];

const GENERIC_NEED: &[&str] = &["Advanced Programming", "Industry Knowledge", "Soft Skills"];

const NEXT_STEPS: &[&str] = &[
    "1. Complete foundational courses in your chosen field",
    "2. Build 2-3 portfolio projects",
    "3. Start networking with industry professionals",
    "4. Apply for internships or entry-level positions",
];

/// Static description of one suggestion the engine can emit.
struct PathTemplate {
    name: &'static str,
    score: u8,
    why: &'static str,
    key_skills: &'static [&'static str],
    cost: CostRange,
}

impl PathTemplate {
    fn build(&self) -> CareerSuggestion {
        CareerSuggestion {
            name: self.name.to_string(),
            score: self.score,
            why: self.why.to_string(),
            key_skills: self.key_skills.iter().map(|s| s.to_string()).collect(),
            estimated_cost_range: self.cost,
        }
    }
}

struct SuggestionRule {
    applies: fn(&QuestionnaireAnswers) -> bool,
    path: PathTemplate,
}

const FULL_STACK: PathTemplate = PathTemplate {
    name: "Full Stack Developer",
    score: 92,
    why: "Your high coding preference and technical background make you an excellent candidate for full stack development. This role combines frontend and backend development, offering diverse challenges and strong job market demand.",
    key_skills: &["JavaScript", "React", "Node.js", "Databases", "Git"],
    cost: CostRange::new(0, 500, 2000),
};

const DATA_SCIENTIST: PathTemplate = PathTemplate {
    name: "Data Scientist",
    score: 88,
    why: "Your strong mathematical background combined with analytical thinking makes data science a natural fit. This field is rapidly growing with excellent career prospects and competitive salaries.",
    key_skills: &["Python", "Statistics", "Machine Learning", "SQL", "Data Visualization"],
    cost: CostRange::new(100, 800, 3000),
};

const PRODUCT_MANAGER: PathTemplate = PathTemplate {
    name: "Product Manager",
    score: 85,
    why: "Your interest in business and technology intersection makes product management ideal. You'll bridge technical and business teams to create products users love.",
    key_skills: &["Product Strategy", "User Research", "Analytics", "Communication", "Agile"],
    cost: CostRange::new(200, 600, 1500),
};

const DEFAULT_PATHS: &[PathTemplate] = &[
    PathTemplate {
        name: "Software Engineer",
        score: 82,
        why: "A versatile career path that offers excellent growth opportunities and is in high demand across all industries. Perfect for building strong technical foundations.",
        key_skills: &["Programming", "Problem Solving", "Algorithms", "Testing", "Version Control"],
        cost: CostRange::new(0, 400, 1800),
    },
    PathTemplate {
        name: "UX/UI Designer",
        score: 78,
        why: "Combines creativity with technology to create user-friendly digital experiences. Great career growth and increasing demand in the digital world.",
        key_skills: &["Design Thinking", "Prototyping", "User Research", "Figma", "HTML/CSS"],
        cost: CostRange::new(150, 700, 2200),
    },
];

/// Priority order matters: it is the output order.
const RULES: &[SuggestionRule] = &[
    SuggestionRule {
        applies: |a| a.coding_pref >= CODING_PREF_THRESHOLD,
        path: FULL_STACK,
    },
    SuggestionRule {
        applies: |a| a.has_subject("Math") || a.has_subject("Statistics"),
        path: DATA_SCIENTIST,
    },
    SuggestionRule {
        applies: |a| a.has_industry("Finance") || a.has_industry("Business"),
        path: PRODUCT_MANAGER,
    },
];

/// Produces the suggestion set for one questionnaire submission. Never fails.
pub fn suggest(answers: &QuestionnaireAnswers) -> SuggestionSet {
    let mut top_paths: Vec<CareerSuggestion> = RULES
        .iter()
        .filter(|rule| (rule.applies)(answers))
        .map(|rule| rule.path.build())
        .collect();

    if top_paths.is_empty() {
        top_paths = DEFAULT_PATHS.iter().map(PathTemplate::build).collect();
    }
    top_paths.truncate(MAX_SUGGESTIONS);

    // Medium is unreachable while DEFAULT_PATHS is non-empty.
    let confidence = if top_paths.is_empty() {
        Confidence::Medium
    } else {
        Confidence::High
    };

    let have = match &answers.known_skills {
        Some(skills) => skills.clone(),
        None => to_strings(DEFAULT_HAVE),
    };

    SuggestionSet {
        top_paths,
        confidence,
        skill_gap: SkillGap {
            have,
            need: to_strings(GENERIC_NEED),
        },
        next_steps: to_strings(NEXT_STEPS),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &SuggestionSet) -> Vec<&str> {
        set.top_paths.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_high_coding_pref_suggests_full_stack() {
        let answers = QuestionnaireAnswers {
            coding_pref: 9,
            ..Default::default()
        };
        let set = suggest(&answers);
        let full_stack = set.find("Full Stack Developer").expect("full stack suggested");
        assert_eq!(full_stack.score, 92);
    }

    #[test]
    fn test_coding_pref_threshold_is_inclusive() {
        let at = suggest(&QuestionnaireAnswers {
            coding_pref: 7,
            ..Default::default()
        });
        let below = suggest(&QuestionnaireAnswers {
            coding_pref: 6,
            ..Default::default()
        });
        assert!(at.find("Full Stack Developer").is_some());
        assert!(below.find("Full Stack Developer").is_none());
    }

    #[test]
    fn test_math_subject_suggests_data_scientist() {
        let answers = QuestionnaireAnswers {
            top_subjects: vec!["Math".to_string()],
            ..Default::default()
        };
        let set = suggest(&answers);
        assert_eq!(set.find("Data Scientist").map(|s| s.score), Some(88));
    }

    #[test]
    fn test_statistics_subject_suggests_data_scientist() {
        let answers = QuestionnaireAnswers {
            top_subjects: vec!["Statistics".to_string()],
            ..Default::default()
        };
        assert!(suggest(&answers).find("Data Scientist").is_some());
    }

    #[test]
    fn test_business_industry_suggests_product_manager() {
        let answers = QuestionnaireAnswers {
            industries: vec!["Business".to_string()],
            ..Default::default()
        };
        let set = suggest(&answers);
        assert_eq!(names(&set), vec!["Product Manager"]);
        assert_eq!(set.top_paths[0].score, 85);
    }

    #[test]
    fn test_no_match_returns_default_pair() {
        let set = suggest(&QuestionnaireAnswers::default());
        assert_eq!(names(&set), vec!["Software Engineer", "UX/UI Designer"]);
        assert_eq!(set.confidence, Confidence::High);
    }

    #[test]
    fn test_default_pair_not_merged_with_partial_matches() {
        let set = suggest(&QuestionnaireAnswers {
            industries: vec!["Finance".to_string()],
            ..Default::default()
        });
        assert!(set.find("Software Engineer").is_none());
        assert!(set.find("UX/UI Designer").is_none());
    }

    #[test]
    fn test_all_rules_keep_evaluation_order() {
        let answers = QuestionnaireAnswers {
            coding_pref: 10,
            top_subjects: vec!["Statistics".to_string()],
            industries: vec!["Finance".to_string()],
            ..Default::default()
        };
        let set = suggest(&answers);
        assert_eq!(
            names(&set),
            vec!["Full Stack Developer", "Data Scientist", "Product Manager"]
        );
    }

    #[test]
    fn test_at_most_three_and_scores_bounded() {
        let inputs = [
            QuestionnaireAnswers::default(),
            QuestionnaireAnswers {
                coding_pref: 10,
                top_subjects: vec!["Math".to_string(), "Statistics".to_string()],
                industries: vec!["Finance".to_string(), "Business".to_string()],
                ..Default::default()
            },
            QuestionnaireAnswers {
                coding_pref: 255,
                ..Default::default()
            },
        ];
        for answers in &inputs {
            let set = suggest(answers);
            assert!(set.top_paths.len() <= MAX_SUGGESTIONS);
            assert!(!set.top_paths.is_empty());
            for s in &set.top_paths {
                assert!(s.score <= 100, "{} scored {}", s.name, s.score);
                assert!(s.estimated_cost_range.is_ordered());
            }
        }
    }

    #[test]
    fn test_skill_gap_have_defaults_when_skipped() {
        let set = suggest(&QuestionnaireAnswers::default());
        assert_eq!(set.skill_gap.have, vec!["Basic Computer Skills"]);
        assert_eq!(set.skill_gap.need.len(), 3);
    }

    #[test]
    fn test_skill_gap_have_echoes_known_skills() {
        let set = suggest(&QuestionnaireAnswers {
            known_skills: Some(vec!["Python".to_string(), "SQL".to_string()]),
            ..Default::default()
        });
        assert_eq!(set.skill_gap.have, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_skill_gap_have_keeps_explicit_empty_list() {
        let set = suggest(&QuestionnaireAnswers {
            known_skills: Some(vec![]),
            ..Default::default()
        });
        assert!(set.skill_gap.have.is_empty());
    }

    #[test]
    fn test_next_steps_are_fixed() {
        let a = suggest(&QuestionnaireAnswers::default());
        let b = suggest(&QuestionnaireAnswers {
            coding_pref: 8,
            ..Default::default()
        });
        assert_eq!(a.next_steps.len(), 4);
        assert_eq!(a.next_steps, b.next_steps);
    }

    #[test]
    fn test_wire_shape_uses_snake_case_keys() {
        let value = serde_json::to_value(suggest(&QuestionnaireAnswers::default())).unwrap();
        assert!(value.get("top_paths").is_some());
        assert_eq!(value["confidence"], "high");
        assert!(value["top_paths"][0].get("estimated_cost_range").is_some());
        assert!(value["skill_gap"].get("need").is_some());
    }
}
