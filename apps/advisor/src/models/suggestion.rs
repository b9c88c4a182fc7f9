use serde::{Deserialize, Serialize};

/// Low / mid / high estimate of what pursuing a path costs, in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
}

impl CostRange {
    pub const fn new(low: u32, mid: u32, high: u32) -> Self {
        Self { low, mid, high }
    }

    pub fn is_ordered(&self) -> bool {
        self.low <= self.mid && self.mid <= self.high
    }
}

/// One ranked career path candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub name: String,
    /// 0 – 100
    pub score: u8,
    pub why: String,
    pub key_skills: Vec<String>,
    pub estimated_cost_range: CostRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub have: Vec<String>,
    pub need: Vec<String>,
}

/// Everything returned for one questionnaire submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    /// At most three, in evaluation order.
    pub top_paths: Vec<CareerSuggestion>,
    pub confidence: Confidence,
    pub skill_gap: SkillGap,
    pub next_steps: Vec<String>,
}

impl SuggestionSet {
    pub fn find(&self, name: &str) -> Option<&CareerSuggestion> {
        self.top_paths.iter().find(|s| s.name == name)
    }
}
