//! Adjuster: multiplicative rule tables applied on top of a base score.
//!
//! Two independent rule sets live here and must not be mixed:
//! - `adjust_score`: experience then education multiplier, clamped to [0, 100].
//! - `salary_fit_multiplier` + `apply_career_bonuses`: career matching only, unclamped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Phd,
    Masters,
    Bachelors,
    Other,
}

impl EducationLevel {
    /// Parses a user-supplied level label. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "phd" => EducationLevel::Phd,
            "masters" => EducationLevel::Masters,
            "bachelors" => EducationLevel::Bachelors,
            _ => EducationLevel::Other,
        }
    }

    pub fn is_advanced(self) -> bool {
        matches!(self, EducationLevel::Phd | EducationLevel::Masters)
    }
}

pub fn experience_multiplier(years_experience: f64) -> f64 {
    if years_experience >= 5.0 {
        1.1
    } else if years_experience >= 3.0 {
        1.05
    } else if years_experience < 1.0 {
        0.9
    } else {
        1.0
    }
}

pub fn education_multiplier(level: EducationLevel) -> f64 {
    match level {
        EducationLevel::Phd => 1.1,
        EducationLevel::Masters => 1.05,
        EducationLevel::Bachelors => 1.0,
        EducationLevel::Other => 0.95,
    }
}

/// Standalone score adjustment: experience, then education, then clamp to [0, 100].
pub fn adjust_score(base_score: f64, years_experience: f64, level: EducationLevel) -> f64 {
    let adjusted = base_score * experience_multiplier(years_experience) * education_multiplier(level);
    adjusted.clamp(0.0, 100.0)
}

/// Salary fit against a career's declared range.
pub fn salary_fit_multiplier(expected_salary: f64, min: f64, max: f64) -> f64 {
    if expected_salary > max {
        0.7
    } else if expected_salary < min {
        0.9
    } else {
        1.0
    }
}

/// Career-matching bonuses applied to an already salary-adjusted score, one step at a
/// time: 5+ years → ×1.1, then advanced degree → ×1.05. Not clamped.
pub fn apply_career_bonuses(score: f64, years_experience: f64, level: EducationLevel) -> f64 {
    let mut adjusted = score;
    if years_experience >= 5.0 {
        adjusted *= 1.1;
    }
    if level.is_advanced() {
        adjusted *= 1.05;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_experience_bands() {
        assert!(approx(experience_multiplier(5.0), 1.1));
        assert!(approx(experience_multiplier(12.0), 1.1));
        assert!(approx(experience_multiplier(3.0), 1.05));
        assert!(approx(experience_multiplier(4.9), 1.05));
        assert!(approx(experience_multiplier(1.0), 1.0));
        assert!(approx(experience_multiplier(2.5), 1.0));
        assert!(approx(experience_multiplier(0.5), 0.9));
    }

    #[test]
    fn test_education_bands() {
        assert!(approx(education_multiplier(EducationLevel::Phd), 1.1));
        assert!(approx(education_multiplier(EducationLevel::Masters), 1.05));
        assert!(approx(education_multiplier(EducationLevel::Bachelors), 1.0));
        assert!(approx(education_multiplier(EducationLevel::Other), 0.95));
    }

    #[test]
    fn test_five_years_masters_composes_to_1_155() {
        assert!(approx(adjust_score(50.0, 5.0, EducationLevel::Masters), 57.75));
    }

    #[test]
    fn test_adjust_clamps_to_100() {
        assert_eq!(adjust_score(95.0, 5.0, EducationLevel::Masters), 100.0);
    }

    #[test]
    fn test_adjust_clamps_negative_to_zero() {
        assert_eq!(adjust_score(-10.0, 2.0, EducationLevel::Bachelors), 0.0);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(EducationLevel::from_label("PhD"), EducationLevel::Phd);
        assert_eq!(EducationLevel::from_label(" masters "), EducationLevel::Masters);
        assert_eq!(EducationLevel::from_label("bachelors"), EducationLevel::Bachelors);
        assert_eq!(EducationLevel::from_label(""), EducationLevel::Other);
        assert_eq!(EducationLevel::from_label("diploma"), EducationLevel::Other);
    }

    #[test]
    fn test_salary_fit() {
        assert!(approx(salary_fit_multiplier(200_000.0, 80_000.0, 150_000.0), 0.7));
        assert!(approx(salary_fit_multiplier(50_000.0, 80_000.0, 150_000.0), 0.9));
        assert!(approx(salary_fit_multiplier(150_000.0, 80_000.0, 150_000.0), 1.0));
        assert!(approx(salary_fit_multiplier(80_000.0, 80_000.0, 150_000.0), 1.0));
    }

    #[test]
    fn test_career_bonuses() {
        assert!(approx(apply_career_bonuses(100.0, 6.0, EducationLevel::Bachelors), 110.0));
        assert!(approx(apply_career_bonuses(100.0, 4.0, EducationLevel::Phd), 105.0));
        assert!(approx(apply_career_bonuses(100.0, 5.0, EducationLevel::Masters), 115.5));
        // "other" gets no career penalty, unlike the standalone rule
        assert_eq!(apply_career_bonuses(42.0, 0.0, EducationLevel::Other), 42.0);
    }

    #[test]
    fn test_career_bonuses_apply_in_sequence() {
        let base = 63.7 * 0.9;
        assert_eq!(
            apply_career_bonuses(base, 7.0, EducationLevel::Masters),
            base * 1.1 * 1.05
        );
    }
}
