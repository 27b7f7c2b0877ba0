//! Scorer: three frozen vectorizers, a frozen scaler and a random-forest regressor
//! mapping `ResumeFields` to an overall score and its category split.

use tracing::{debug, info};

use crate::analysis::extractor::round2;
use crate::analysis::feedback::generate_feedback;
use crate::analysis::forest::{ForestParams, RandomForestRegressor};
use crate::analysis::scaler::StandardScaler;
use crate::analysis::training_data::TrainingSample;
use crate::analysis::vectorizer::TfidfVectorizer;
use crate::errors::AnalysisError;
use crate::models::resume::{CategoryScores, ResumeFields, ScoreResult};

pub const SKILLS_MAX_FEATURES: usize = 1000;
pub const EXPERIENCE_MAX_FEATURES: usize = 500;
pub const EDUCATION_MAX_FEATURES: usize = 500;

pub const SKILLS_WEIGHT: f64 = 0.40;
pub const EXPERIENCE_WEIGHT: f64 = 0.35;
pub const EDUCATION_WEIGHT: f64 = 0.25;

/// Fitted scoring model. Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ResumeScorer {
    pub(crate) skills_vectorizer: TfidfVectorizer,
    pub(crate) experience_vectorizer: TfidfVectorizer,
    pub(crate) education_vectorizer: TfidfVectorizer,
    pub(crate) scaler: StandardScaler,
    pub(crate) regressor: RandomForestRegressor,
}

/// Category split of an overall score, each part clamped to [0, 100].
pub fn category_scores(overall_score: f64) -> CategoryScores {
    CategoryScores {
        skills: (overall_score * SKILLS_WEIGHT).clamp(0.0, 100.0),
        experience: (overall_score * EXPERIENCE_WEIGHT).clamp(0.0, 100.0),
        education: (overall_score * EDUCATION_WEIGHT).clamp(0.0, 100.0),
    }
}

impl ResumeScorer {
    /// Fits every stage on the given corpus. Any failure here is fatal for serving.
    pub fn train(samples: &[TrainingSample]) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::Training(
                "training corpus is empty".to_string(),
            ));
        }

        info!("Fitting vectorizers on {} samples", samples.len());
        let skills_texts: Vec<String> = samples.iter().map(TrainingSample::skills_text).collect();
        let experience_texts: Vec<&str> = samples.iter().map(|s| s.experience).collect();
        let education_texts: Vec<&str> = samples.iter().map(|s| s.education).collect();

        let skills_vectorizer = TfidfVectorizer::fit(&skills_texts, Some(SKILLS_MAX_FEATURES))?;
        let experience_vectorizer =
            TfidfVectorizer::fit(&experience_texts, Some(EXPERIENCE_MAX_FEATURES))?;
        let education_vectorizer =
            TfidfVectorizer::fit(&education_texts, Some(EDUCATION_MAX_FEATURES))?;

        let rows: Vec<Vec<f64>> = samples
            .iter()
            .map(|s| {
                combine(
                    &skills_vectorizer,
                    &experience_vectorizer,
                    &education_vectorizer,
                    &s.skills_text(),
                    s.experience,
                    s.education,
                )
            })
            .collect();

        let scaler = StandardScaler::fit(&rows)?;
        let scaled = rows
            .iter()
            .map(|r| scaler.transform(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AnalysisError::Training(e.to_string()))?;

        let targets: Vec<f64> = samples.iter().map(|s| s.score).collect();
        let regressor = RandomForestRegressor::fit(&scaled, &targets, ForestParams::default())?;

        info!(
            "Model trained: {} input features (skills {}, experience {}, education {})",
            regressor.n_features(),
            skills_vectorizer.vocabulary_size(),
            experience_vectorizer.vocabulary_size(),
            education_vectorizer.vocabulary_size()
        );

        Ok(Self {
            skills_vectorizer,
            experience_vectorizer,
            education_vectorizer,
            scaler,
            regressor,
        })
    }

    /// Total input width expected by the scaler and regressor.
    pub fn feature_count(&self) -> usize {
        self.skills_vectorizer.vocabulary_size()
            + self.experience_vectorizer.vocabulary_size()
            + self.education_vectorizer.vocabulary_size()
    }

    /// Checks that all stages agree on the feature width.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.skills_vectorizer.validate()?;
        self.experience_vectorizer.validate()?;
        self.education_vectorizer.validate()?;
        self.scaler.validate()?;
        self.regressor.validate()?;

        let width = self.feature_count();
        if self.scaler.width() != width || self.regressor.n_features() != width {
            return Err(AnalysisError::Artifact(format!(
                "feature width mismatch: vectorizers {width}, scaler {}, regressor {}",
                self.scaler.width(),
                self.regressor.n_features()
            )));
        }
        Ok(())
    }

    /// Raw regressor output for the given fields. Not clamped.
    pub fn predict(&self, fields: &ResumeFields) -> Result<f64, AnalysisError> {
        let skills_text = fields.skills_text();
        debug!(
            skills_len = skills_text.len(),
            experience_len = fields.experience.len(),
            education_len = fields.education.len(),
            "Scoring resume fields"
        );

        let row = combine(
            &self.skills_vectorizer,
            &self.experience_vectorizer,
            &self.education_vectorizer,
            &skills_text,
            &fields.experience,
            &fields.education,
        );
        let scaled = self.scaler.transform(&row)?;
        let score = self.regressor.predict(&scaled)?;

        if !score.is_finite() {
            return Err(AnalysisError::Inference(format!(
                "regressor produced a non-finite score ({score})"
            )));
        }
        Ok(score)
    }

    pub fn score_resume(&self, fields: &ResumeFields) -> Result<ScoreResult, AnalysisError> {
        let overall = self.predict(fields)?;
        Ok(score_result(overall))
    }
}

/// Category split, feedback and rounding for an already-predicted overall score.
/// Feedback bands see the unrounded values.
pub fn score_result(overall: f64) -> ScoreResult {
    let categories = category_scores(overall);
    let feedback = generate_feedback(
        overall,
        categories.skills,
        categories.experience,
        categories.education,
    );

    ScoreResult {
        overall_score: round2(overall),
        category_scores: CategoryScores {
            skills: round2(categories.skills),
            experience: round2(categories.experience),
            education: round2(categories.education),
        },
        feedback,
    }
}

fn combine(
    skills_vectorizer: &TfidfVectorizer,
    experience_vectorizer: &TfidfVectorizer,
    education_vectorizer: &TfidfVectorizer,
    skills_text: &str,
    experience_text: &str,
    education_text: &str,
) -> Vec<f64> {
    let mut row = skills_vectorizer.transform(skills_text);
    row.extend(experience_vectorizer.transform(experience_text));
    row.extend(education_vectorizer.transform(education_text));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::training_data::TRAINING_SAMPLES;

    fn trained() -> ResumeScorer {
        ResumeScorer::train(TRAINING_SAMPLES).unwrap()
    }

    fn devops_fields() -> ResumeFields {
        ResumeFields {
            skills: vec!["AWS".into(), "Docker".into(), "Kubernetes".into()],
            experience: "DevOps Engineer with 6 years experience".into(),
            education: "Bachelor in Computer Engineering".into(),
        }
    }

    #[test]
    fn test_empty_corpus_is_training_failure() {
        assert!(matches!(
            ResumeScorer::train(&[]),
            Err(AnalysisError::Training(_))
        ));
    }

    #[test]
    fn test_trained_model_is_consistent() {
        let scorer = trained();
        scorer.validate().unwrap();
        assert!(scorer.feature_count() > 0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = trained();
        let fields = devops_fields();
        assert_eq!(
            scorer.score_resume(&fields).unwrap(),
            scorer.score_resume(&fields).unwrap()
        );
    }

    #[test]
    fn test_retraining_reproduces_scores() {
        let fields = devops_fields();
        let a = trained().score_resume(&fields).unwrap();
        let b = trained().score_resume(&fields).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_category_ratios_follow_weights() {
        let scorer = trained();
        let overall = scorer.predict(&devops_fields()).unwrap();
        let result = scorer.score_resume(&devops_fields()).unwrap();

        assert!((result.category_scores.skills - overall * 0.40).abs() < 0.006);
        assert!((result.category_scores.experience - overall * 0.35).abs() < 0.006);
        assert!((result.category_scores.education - overall * 0.25).abs() < 0.006);
        for part in [
            result.category_scores.skills,
            result.category_scores.experience,
            result.category_scores.education,
        ] {
            assert!((0.0..=100.0).contains(&part));
        }
    }

    #[test]
    fn test_category_scores_clamp() {
        let high = category_scores(400.0);
        assert_eq!(high.skills, 100.0);
        assert_eq!(high.experience, 100.0);
        assert_eq!(high.education, 100.0);

        let low = category_scores(-20.0);
        assert_eq!(low.skills, 0.0);
        assert_eq!(low.education, 0.0);
    }

    #[test]
    fn test_score_result_matches_score_resume() {
        let scorer = trained();
        let raw = scorer.predict(&devops_fields()).unwrap();
        assert_eq!(
            score_result(raw),
            scorer.score_resume(&devops_fields()).unwrap()
        );
    }

    #[test]
    fn test_score_result_bands_use_unrounded_overall() {
        // 59.996 rounds to 60.0 but still sits in the lowest overall band
        let result = score_result(59.996);
        assert_eq!(result.overall_score, 60.0);
        assert_eq!(result.feedback[0], score_result(10.0).feedback[0]);
    }

    #[test]
    fn test_empty_fields_still_score() {
        let result = trained().score_resume(&ResumeFields::default()).unwrap();
        assert!(result.overall_score.is_finite());
        assert_eq!(result.feedback.len(), 4);
    }

    #[test]
    fn test_score_stays_within_training_range() {
        let result = trained().score_resume(&devops_fields()).unwrap();
        assert!((35.0..=90.0).contains(&result.overall_score));
    }

    #[test]
    fn test_unknown_vocabulary_is_tolerated() {
        let fields = ResumeFields {
            skills: vec!["Basket weaving".into()],
            experience: "Lighthouse keeper".into(),
            education: "Self taught".into(),
        };
        let blank = trained().score_resume(&ResumeFields::default()).unwrap();
        let unknown = trained().score_resume(&fields).unwrap();
        assert_eq!(blank, unknown);
    }
}
