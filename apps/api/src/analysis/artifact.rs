//! Model artifact bundle: the fitted scorer stages as JSON files under one directory.
//!
//! The regressor file doubles as the presence marker. When it is missing the model is
//! retrained from the embedded corpus and written out; when it exists every companion
//! file must load and agree on the feature width, otherwise startup fails.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::analysis::scorer::ResumeScorer;
use crate::analysis::training_data::TRAINING_SAMPLES;
use crate::errors::AnalysisError;

pub const MODEL_FILE: &str = "resume_model.json";
pub const SKILLS_VECTORIZER_FILE: &str = "skills_vectorizer.json";
pub const EXPERIENCE_VECTORIZER_FILE: &str = "experience_vectorizer.json";
pub const EDUCATION_VECTORIZER_FILE: &str = "education_vectorizer.json";
pub const SCALER_FILE: &str = "scaler.json";

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), AnalysisError> {
    let file = File::create(dir.join(name))
        .map_err(|e| AnalysisError::Artifact(format!("cannot create {name}: {e}")))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, AnalysisError> {
    let file = File::open(dir.join(name))
        .map_err(|e| AnalysisError::Artifact(format!("cannot open {name}: {e}")))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AnalysisError::Artifact(format!("cannot parse {name}: {e}")))
}

pub fn save(scorer: &ResumeScorer, dir: &Path) -> Result<(), AnalysisError> {
    fs::create_dir_all(dir)?;
    write_json(dir, SKILLS_VECTORIZER_FILE, &scorer.skills_vectorizer)?;
    write_json(dir, EXPERIENCE_VECTORIZER_FILE, &scorer.experience_vectorizer)?;
    write_json(dir, EDUCATION_VECTORIZER_FILE, &scorer.education_vectorizer)?;
    write_json(dir, SCALER_FILE, &scorer.scaler)?;
    // written last so a partial bundle is never mistaken for a complete one
    write_json(dir, MODEL_FILE, &scorer.regressor)?;
    info!("Model artifact saved to {}", dir.display());
    Ok(())
}

pub fn load(dir: &Path) -> Result<ResumeScorer, AnalysisError> {
    let scorer = ResumeScorer {
        skills_vectorizer: read_json(dir, SKILLS_VECTORIZER_FILE)?,
        experience_vectorizer: read_json(dir, EXPERIENCE_VECTORIZER_FILE)?,
        education_vectorizer: read_json(dir, EDUCATION_VECTORIZER_FILE)?,
        scaler: read_json(dir, SCALER_FILE)?,
        regressor: read_json(dir, MODEL_FILE)?,
    };
    scorer.validate()?;
    info!(
        "Model artifact loaded from {} ({} features)",
        dir.display(),
        scorer.feature_count()
    );
    Ok(scorer)
}

pub fn exists(dir: &Path) -> bool {
    dir.join(MODEL_FILE).is_file()
}

/// Loads the bundle from `dir`, or trains from the embedded corpus and saves it.
pub fn load_or_train(dir: &Path) -> Result<ResumeScorer, AnalysisError> {
    if exists(dir) {
        return load(dir);
    }

    info!(
        "No model artifact in {}; training from embedded corpus",
        dir.display()
    );
    let scorer = ResumeScorer::train(TRAINING_SAMPLES)?;
    save(&scorer, dir)?;
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeFields;

    fn fields() -> ResumeFields {
        ResumeFields {
            skills: vec!["Python".into(), "SQL".into()],
            experience: "Backend Developer with 4 years experience".into(),
            education: "Masters in Computer Science".into(),
        }
    }

    #[test]
    fn test_missing_bundle_trains_and_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("models");
        assert!(!exists(&model_dir));

        load_or_train(&model_dir).unwrap();

        for name in [
            MODEL_FILE,
            SKILLS_VECTORIZER_FILE,
            EXPERIENCE_VECTORIZER_FILE,
            EDUCATION_VECTORIZER_FILE,
            SCALER_FILE,
        ] {
            assert!(model_dir.join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn test_reloaded_bundle_scores_like_trained_model() {
        let dir = tempfile::tempdir().unwrap();
        let trained = load_or_train(dir.path()).unwrap();
        let loaded = load_or_train(dir.path()).unwrap();
        assert_eq!(
            trained.score_resume(&fields()).unwrap(),
            loaded.score_resume(&fields()).unwrap()
        );
    }

    #[test]
    fn test_missing_companion_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        load_or_train(dir.path()).unwrap();
        fs::remove_file(dir.path().join(SCALER_FILE)).unwrap();

        assert!(matches!(
            load_or_train(dir.path()),
            Err(AnalysisError::Artifact(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        load_or_train(dir.path()).unwrap();
        fs::write(dir.path().join(MODEL_FILE), "{not json").unwrap();

        assert!(matches!(load(dir.path()), Err(AnalysisError::Artifact(_))));
    }

    #[test]
    fn test_mismatched_vectorizer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        load_or_train(dir.path()).unwrap();
        // swap in a vectorizer with a different vocabulary size
        let skills = fs::read(dir.path().join(SKILLS_VECTORIZER_FILE)).unwrap();
        fs::write(dir.path().join(EDUCATION_VECTORIZER_FILE), skills).unwrap();

        assert!(matches!(load(dir.path()), Err(AnalysisError::Artifact(_))));
    }
}
