//! Career matcher. Ranks static career profiles against a user's skill list.
//!
//! Pipeline per profile: cosine similarity × 100 → salary fit → experience bonus →
//! education bonus. The final score is left unclamped and may exceed 100;
//! only the standalone `adjust_score` path clamps.

use tracing::debug;

use crate::analysis::adjust::{apply_career_bonuses, salary_fit_multiplier, EducationLevel};
use crate::analysis::extractor::round2;
use crate::analysis::vectorizer::{cosine_similarity, TfidfVectorizer};
use crate::errors::AnalysisError;
use crate::models::career::{CareerProfile, CareerRecommendation, SalaryRange};

pub const TOP_RECOMMENDATIONS: usize = 3;

fn profile(name: &str, skills: &[&str], min: f64, max: f64, description: &str) -> CareerProfile {
    CareerProfile {
        name: name.to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        salary_range: SalaryRange { min, max },
        description: description.to_string(),
    }
}

/// The built-in career table, in declaration order.
pub fn default_career_profiles() -> Vec<CareerProfile> {
    vec![
        profile(
            "Software Engineer",
            &["Python", "Java", "JavaScript", "SQL", "Git", "Problem Solving", "Algorithms"],
            80_000.0,
            150_000.0,
            "Develop and maintain software applications",
        ),
        profile(
            "Data Scientist",
            &["Python", "R", "Machine Learning", "Statistics", "Data Analysis", "SQL"],
            90_000.0,
            160_000.0,
            "Analyze complex data sets and build predictive models",
        ),
        profile(
            "Product Manager",
            &["Project Management", "Communication", "Market Research", "Agile", "Leadership"],
            85_000.0,
            155_000.0,
            "Manage product development and strategy",
        ),
        profile(
            "DevOps Engineer",
            &["AWS", "Docker", "Kubernetes", "CI/CD", "Linux", "Scripting"],
            95_000.0,
            170_000.0,
            "Implement and maintain cloud infrastructure",
        ),
        profile(
            "UX Designer",
            &["UI/UX", "Figma", "User Research", "Prototyping", "Wireframing"],
            75_000.0,
            140_000.0,
            "Design user interfaces and experiences",
        ),
        profile(
            "Frontend Developer",
            &["JavaScript", "React", "HTML", "CSS", "TypeScript", "UI/UX"],
            70_000.0,
            130_000.0,
            "Create responsive and interactive web interfaces",
        ),
        profile(
            "Backend Developer",
            &["Node.js", "Python", "Java", "SQL", "REST API", "Microservices"],
            80_000.0,
            140_000.0,
            "Develop server-side applications and APIs",
        ),
    ]
}

/// Frozen profile table plus a vectorizer fit over all profiles' skills.
#[derive(Debug, Clone)]
pub struct CareerMatcher {
    profiles: Vec<CareerProfile>,
    profile_vectors: Vec<Vec<f64>>,
    vectorizer: TfidfVectorizer,
}

impl CareerMatcher {
    pub fn new(profiles: Vec<CareerProfile>) -> Result<Self, AnalysisError> {
        let documents: Vec<String> = profiles.iter().map(|p| p.required_skills.join(" ")).collect();
        let vectorizer = TfidfVectorizer::fit(&documents, None)?;
        let profile_vectors = documents.iter().map(|d| vectorizer.transform(d)).collect();

        Ok(Self {
            profiles,
            profile_vectors,
            vectorizer,
        })
    }

    pub fn profiles(&self) -> &[CareerProfile] {
        &self.profiles
    }

    /// Similarity of a skill list to every profile, scaled to 0–100, in profile order.
    pub fn similarities(&self, skills: &[String]) -> Vec<f64> {
        let user_vector = self.vectorizer.transform(&skills.join(" "));
        self.profile_vectors
            .iter()
            .map(|pv| cosine_similarity(&user_vector, pv) * 100.0)
            .collect()
    }

    /// Scores every profile and returns the top three, highest first.
    /// Equal scores keep profile declaration order.
    pub fn match_careers(
        &self,
        skills: &[String],
        expected_salary: f64,
        years_experience: f64,
        education_level: &str,
    ) -> Result<Vec<CareerRecommendation>, AnalysisError> {
        if skills.iter().all(|s| s.trim().is_empty()) {
            return Err(AnalysisError::Validation(
                "Please provide at least one skill".to_string(),
            ));
        }
        if !expected_salary.is_finite() || !years_experience.is_finite() {
            return Err(AnalysisError::Validation(
                "expected_salary and years_experience must be finite numbers".to_string(),
            ));
        }

        let level = EducationLevel::from_label(education_level);

        let mut recommendations: Vec<CareerRecommendation> = self
            .profiles
            .iter()
            .zip(self.similarities(skills))
            .map(|(profile, similarity)| {
                let range = profile.salary_range;
                let salary_fit = salary_fit_multiplier(expected_salary, range.min, range.max);
                let score = apply_career_bonuses(similarity * salary_fit, years_experience, level);
                debug!(career = %profile.name, similarity, score, "Career match scored");

                CareerRecommendation {
                    career: profile.name.clone(),
                    match_score: round2(score),
                    description: profile.description.clone(),
                    required_skills: profile.required_skills.clone(),
                    salary_range: range,
                }
            })
            .collect();

        // stable sort keeps declaration order for ties
        recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        recommendations.truncate(TOP_RECOMMENDATIONS);
        Ok(recommendations)
    }
}
