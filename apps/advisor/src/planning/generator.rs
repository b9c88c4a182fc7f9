//! Plan Generator: turns a selected career path into a learning plan draft.
//!
//! Flow: foundation milestones (shared by every path) → path-specific table
//! lookup (generic fallback for unknown paths) → fixed cost / duration / weekly
//! effort. Milestones are concatenated in that order and never re-sorted.

use tracing::debug;

use crate::models::plan::{CostEstimate, Milestone, PlanDraft, PlanRequest, Resource, ResourceType};
use crate::models::questionnaire::QuestionnaireAnswers;

pub const COST_ESTIMATE: CostEstimate = CostEstimate::new(120, 850, 2400);
pub const TOTAL_DURATION_MONTHS: u32 = 6;
pub const WEEKLY_HOURS: u32 = 15;

struct ResourceSpec {
    title: &'static str,
    url: &'static str,
    cost: u32,
    kind: ResourceType,
}

struct MilestoneSpec {
    month: u32,
    week: u32,
    title: &'static str,
    description: &'static str,
    hours: u32,
    resources: &'static [ResourceSpec],
}

impl MilestoneSpec {
    fn build(&self) -> Milestone {
        Milestone {
            month: self.month,
            week: self.week,
            title: self.title.to_string(),
            description: self.description.to_string(),
            hours: self.hours,
            resources: self
                .resources
                .iter()
                .map(|r| Resource {
                    title: r.title.to_string(),
                    url: r.url.to_string(),
                    cost: r.cost,
                    resource_type: r.kind,
                    description: None,
                    duration: None,
                    rating: None,
                })
                .collect(),
            completed: false,
            completed_at: None,
        }
    }
}

const fn course(title: &'static str, url: &'static str, cost: u32) -> ResourceSpec {
    ResourceSpec {
        title,
        url,
        cost,
        kind: ResourceType::Course,
    }
}

const FOUNDATION: &[MilestoneSpec] = &[
    MilestoneSpec {
        month: 1,
        week: 1,
        title: "Foundations Setup",
        description: "Set up learning environment and complete basic orientation courses",
        hours: 10,
        resources: &[ResourceSpec {
            title: "Getting Started Guide",
            url: "https://example.com/getting-started",
            cost: 0,
            kind: ResourceType::Guide,
        }],
    },
    MilestoneSpec {
        month: 1,
        week: 2,
        title: "Core Concepts Introduction",
        description: "Learn fundamental concepts and terminology in your chosen field",
        hours: 12,
        resources: &[course("Introduction Course", "https://coursera.org/intro-course", 49)],
    },
];

const FULL_STACK: &[MilestoneSpec] = &[
    MilestoneSpec {
        month: 1,
        week: 3,
        title: "HTML & CSS Mastery",
        description: "Master HTML5 and CSS3, including responsive design and CSS Grid/Flexbox",
        hours: 15,
        resources: &[
            course("HTML/CSS Complete Course", "https://example.com/html-css", 0),
            ResourceSpec {
                title: "CSS Grid Garden",
                url: "https://cssgridgarden.com",
                cost: 0,
                kind: ResourceType::Interactive,
            },
        ],
    },
    MilestoneSpec {
        month: 2,
        week: 1,
        title: "JavaScript Fundamentals",
        description: "Learn JavaScript ES6+, DOM manipulation, and async programming",
        hours: 20,
        resources: &[course("JavaScript: The Complete Guide", "https://udemy.com/js-course", 89)],
    },
    MilestoneSpec {
        month: 2,
        week: 3,
        title: "React Development",
        description: "Build modern web applications with React, hooks, and state management",
        hours: 18,
        resources: &[course("React - The Complete Guide", "https://udemy.com/react-course", 94)],
    },
    MilestoneSpec {
        month: 3,
        week: 2,
        title: "Backend with Node.js",
        description: "Learn server-side development with Node.js, Express, and databases",
        hours: 22,
        resources: &[course("Node.js Developer Course", "https://example.com/nodejs", 79)],
    },
];

const DATA_SCIENTIST: &[MilestoneSpec] = &[
    MilestoneSpec {
        month: 1,
        week: 3,
        title: "Python Programming",
        description: "Master Python syntax, data structures, and programming fundamentals",
        hours: 18,
        resources: &[course("Python for Data Science", "https://coursera.org/python-ds", 49)],
    },
    MilestoneSpec {
        month: 2,
        week: 1,
        title: "Statistics & Probability",
        description: "Learn statistical concepts essential for data analysis and machine learning",
        hours: 16,
        resources: &[course("Statistics for Data Science", "https://edx.org/stats-course", 0)],
    },
    MilestoneSpec {
        month: 2,
        week: 3,
        title: "Data Analysis with Pandas",
        description: "Master data manipulation and analysis using Python pandas library",
        hours: 14,
        resources: &[course("Pandas Mastery Course", "https://example.com/pandas", 69)],
    },
    MilestoneSpec {
        month: 3,
        week: 2,
        title: "Machine Learning Basics",
        description: "Introduction to ML algorithms, scikit-learn, and model evaluation",
        hours: 20,
        resources: &[course("Machine Learning A-Z", "https://udemy.com/ml-course", 129)],
    },
];

const GENERIC: &[MilestoneSpec] = &[
    MilestoneSpec {
        month: 2,
        week: 1,
        title: "Skill Building Phase 1",
        description: "Focus on core technical skills for your chosen career path",
        hours: 16,
        resources: &[course("Foundational Skills Course", "https://example.com/foundations", 79)],
    },
    MilestoneSpec {
        month: 3,
        week: 1,
        title: "Project Development",
        description: "Build your first major project to demonstrate your skills",
        hours: 25,
        resources: &[course("Project-Based Learning", "https://example.com/projects", 99)],
    },
];

const PATH_TABLE: &[(&str, &[MilestoneSpec])] = &[
    ("Full Stack Developer", FULL_STACK),
    ("Data Scientist", DATA_SCIENTIST),
];

/// Path-specific milestones; exact, case-sensitive lookup with generic fallback.
fn path_milestones(selected_path: &str) -> &'static [MilestoneSpec] {
    PATH_TABLE
        .iter()
        .find(|(name, _)| *name == selected_path)
        .map(|(_, specs)| *specs)
        .unwrap_or_else(|| {
            debug!("No milestone table for path {selected_path:?}, using generic sequence");
            GENERIC
        })
}

/// Whether the generator has a dedicated milestone sequence for this path.
pub fn has_dedicated_track(selected_path: &str) -> bool {
    PATH_TABLE.iter().any(|(name, _)| *name == selected_path)
}

/// Generates a plan draft for a plan request. Never fails.
///
/// Cost, duration and weekly effort are fixed constants; the questionnaire
/// context (`hoursPerWeek`, `goalTimeline`) does not influence them.
pub fn generate(request: &PlanRequest) -> PlanDraft {
    let milestones = FOUNDATION
        .iter()
        .chain(path_milestones(&request.selected_path))
        .map(MilestoneSpec::build)
        .collect();

    PlanDraft {
        selected_path: request.selected_path.clone(),
        milestones,
        cost_estimate: COST_ESTIMATE,
        total_duration_months: TOTAL_DURATION_MONTHS,
        weekly_hours: WEEKLY_HOURS,
    }
}

pub fn generate_plan(selected_path: &str, context: &QuestionnaireAnswers) -> PlanDraft {
    generate(&PlanRequest::new(selected_path, context.clone()))
}
