use serde::{Deserialize, Serialize};

/// The three semantic fields pulled out of raw resume text.
/// All-empty fields are a valid value; downstream stages score them as a blank resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
}

impl ResumeFields {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.experience.is_empty() && self.education.is_empty()
    }

    /// Skill list joined with spaces, the form the skills vectorizer consumes.
    pub fn skills_text(&self) -> String {
        self.skills.join(" ")
    }
}

/// Presentational split of the overall score (0.40 / 0.35 / 0.25).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: f64,
    pub category_scores: CategoryScores,
    pub feedback: Vec<String>,
}
