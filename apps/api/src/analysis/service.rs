//! `AnalysisService` is the one object request handlers talk to.
//!
//! Built once at startup (load or train), then shared read-only behind an `Arc`.
//! Nothing reachable from a request mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::adjust::{adjust_score, EducationLevel};
use crate::analysis::artifact;
use crate::analysis::careers::{default_career_profiles, CareerMatcher};
use crate::analysis::extractor::{
    self, determine_role_type, extract_education_level, extract_years_of_experience, round2,
    SkillOverlap,
};
use crate::analysis::scorer::{score_result, ResumeScorer};
use crate::errors::AnalysisError;
use crate::models::career::{CareerProfile, CareerRecommendation};
use crate::models::resume::{ResumeFields, ScoreResult};

/// Heuristic facts derived from the extracted fields, reported next to the model score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInsights {
    pub years_experience: u32,
    pub education_level: EducationLevel,
    pub role_type: String,
    pub adjusted_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub fields: ResumeFields,
    pub analysis: ScoreResult,
    pub insights: ProfileInsights,
}

pub struct AnalysisService {
    scorer: ResumeScorer,
    matcher: CareerMatcher,
}

impl AnalysisService {
    pub fn new(scorer: ResumeScorer, matcher: CareerMatcher) -> Self {
        Self { scorer, matcher }
    }

    /// Loads the model bundle from `model_dir` (training it first when absent) and
    /// fits the career matcher over the built-in profiles.
    pub fn initialize(model_dir: &Path) -> Result<Self, AnalysisError> {
        let scorer = artifact::load_or_train(model_dir)?;
        let matcher = CareerMatcher::new(default_career_profiles())?;
        info!(
            "Analysis service ready ({} career profiles)",
            matcher.profiles().len()
        );
        Ok(Self::new(scorer, matcher))
    }

    pub fn extract_fields(&self, text: &str) -> ResumeFields {
        extractor::extract_fields(text)
    }

    pub fn scan_skills(&self, text: &str) -> Vec<String> {
        extractor::scan_skills(text)
    }

    pub fn score_resume(&self, fields: &ResumeFields) -> Result<ScoreResult, AnalysisError> {
        self.scorer.score_resume(fields)
    }

    pub fn match_careers(
        &self,
        skills: &[String],
        expected_salary: f64,
        years_experience: f64,
        education_level: &str,
    ) -> Result<Vec<CareerRecommendation>, AnalysisError> {
        self.matcher
            .match_careers(skills, expected_salary, years_experience, education_level)
    }

    pub fn keyword_match(&self, resume_text: &str, job_description: &str) -> SkillOverlap {
        extractor::compare_skill_overlap(resume_text, job_description)
    }

    pub fn career_profiles(&self) -> &[CareerProfile] {
        self.matcher.profiles()
    }

    /// Full document path: segment, score, then attach heuristic insights.
    pub fn analyze_text(&self, text: &str) -> Result<DocumentAnalysis, AnalysisError> {
        let fields = self.extract_fields(text);
        if fields.is_empty() {
            warn!("No skills, experience or education sections detected");
        }
        let raw_score = self.scorer.predict(&fields)?;
        let analysis = score_result(raw_score);

        let years_experience = extract_years_of_experience(&fields.experience);
        let education_level = extract_education_level(&fields.education);
        let insights = ProfileInsights {
            years_experience,
            education_level,
            role_type: determine_role_type(&fields.skills_text()).to_string(),
            adjusted_score: round2(adjust_score(
                raw_score,
                f64::from(years_experience),
                education_level,
            )),
        };

        Ok(DocumentAnalysis {
            fields,
            analysis,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::training_data::TRAINING_SAMPLES;

    fn service() -> AnalysisService {
        AnalysisService::new(
            ResumeScorer::train(TRAINING_SAMPLES).unwrap(),
            CareerMatcher::new(default_career_profiles()).unwrap(),
        )
    }

    const RESUME: &str = "Skills\n\
        AWS, Docker, Kubernetes, Linux\n\
        Experience\n\
        DevOps Engineer for 6 years managing cloud infrastructure\n\
        Education\n\
        Masters in Computer Science\n";

    #[test]
    fn test_analyze_text_end_to_end() {
        let result = service().analyze_text(RESUME).unwrap();
        assert_eq!(result.fields.skills, vec!["aws", "docker", "kubernetes", "linux"]);
        assert_eq!(result.insights.years_experience, 6);
        assert_eq!(result.insights.education_level, EducationLevel::Masters);
        assert_eq!(result.insights.role_type, "devops");
        assert_eq!(result.analysis.feedback.len(), 4);
    }

    #[test]
    fn test_adjusted_score_uses_standalone_rule() {
        let svc = service();
        let result = svc.analyze_text(RESUME).unwrap();
        let raw = svc.scorer.predict(&result.fields).unwrap();
        let expected = (raw * 1.1 * 1.05).clamp(0.0, 100.0);
        assert!((result.insights.adjusted_score - expected).abs() < 0.006);
    }

    #[test]
    fn test_analysis_matches_direct_scoring() {
        let svc = service();
        let result = svc.analyze_text(RESUME).unwrap();
        assert_eq!(result.analysis, svc.score_resume(&result.fields).unwrap());
    }

    #[test]
    fn test_blank_document_is_not_an_error() {
        let result = service().analyze_text("").unwrap();
        assert!(result.fields.is_empty());
        assert_eq!(result.insights.years_experience, 0);
        assert_eq!(result.insights.education_level, EducationLevel::Other);
        assert_eq!(result.insights.role_type, "other");
    }

    #[test]
    fn test_initialize_trains_into_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AnalysisService::initialize(dir.path()).unwrap();
        assert!(artifact::exists(dir.path()));
        assert_eq!(svc.career_profiles().len(), 7);
    }

    #[test]
    fn test_end_to_end_career_match() {
        let recs = service()
            .match_careers(
                &["AWS".to_string(), "Docker".to_string(), "Kubernetes".to_string()],
                100_000.0,
                6.0,
                "bachelors",
            )
            .unwrap();
        let devops = recs.iter().find(|r| r.career == "DevOps Engineer").unwrap();
        assert!(devops.match_score > 0.0);
    }
}
