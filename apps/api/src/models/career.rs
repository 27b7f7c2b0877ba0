use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Static reference data describing one career path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerProfile {
    pub name: String,
    pub required_skills: Vec<String>,
    pub salary_range: SalaryRange,
    pub description: String,
}

/// One ranked entry in a career recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub career: String,
    pub match_score: f64,
    pub description: String,
    pub required_skills: Vec<String>,
    pub salary_range: SalaryRange,
}
