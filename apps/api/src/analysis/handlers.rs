//! Axum route handlers for the resume and career API.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::extractor::SkillOverlap;
use crate::analysis::service::DocumentAnalysis;
use crate::errors::AppError;
use crate::extraction::{DocumentKind, ExtractionError};
use crate::models::career::{CareerProfile, CareerRecommendation};
use crate::models::resume::{ResumeFields, ScoreResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ScanSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordMatchRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CareerRecommendationRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub expected_salary: f64,
    #[serde(default)]
    pub years_experience: f64,
    #[serde(default)]
    pub education_level: String,
}

#[derive(Debug, Serialize)]
pub struct CareerRecommendationResponse {
    pub recommendations: Vec<CareerRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub file_name: String,
    #[serde(flatten)]
    pub result: DocumentAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct UploadForm {
    files: HashMap<String, UploadedFile>,
    text: HashMap<String, String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;

        match file_name {
            Some(file_name) => {
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                form.text
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    Ok(form)
}

fn take_file(form: &mut UploadForm, field: &str) -> Result<UploadedFile, AppError> {
    let file = form
        .files
        .remove(field)
        .ok_or_else(|| AppError::Validation(format!("No file provided in field '{field}'")))?;
    if file.file_name.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    DocumentKind::from_file_name(&file.file_name)?;
    Ok(file)
}

/// Extracted text, or empty text when the document cannot be read.
async fn document_text(state: &AppState, file: UploadedFile) -> Result<String, AppError> {
    match state.extractor.extract(&file.file_name, file.bytes).await {
        Ok(text) => Ok(text),
        Err(ExtractionError::Unreadable(reason)) => {
            warn!(
                "Text extraction failed for {}: {reason}; scoring empty fields",
                file.file_name
            );
            Ok(String::new())
        }
        Err(e) => Err(e.into()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Multipart upload (`file`). Extracts text, segments it, scores it with the
/// trained model and attaches experience/education insights.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let mut form = read_form(multipart).await?;
    let file = take_file(&mut form, "file")?;
    let file_name = file.file_name.clone();
    info!("Analyzing uploaded resume {file_name}");

    let text = document_text(&state, file).await?;
    let result = state.analysis.analyze_text(&text)?;

    Ok(Json(AnalyzeResumeResponse { file_name, result }))
}

/// POST /api/v1/resumes/score
///
/// Scores already-structured resume fields.
pub async fn handle_score_fields(
    State(state): State<AppState>,
    Json(fields): Json<ResumeFields>,
) -> Result<Json<ScoreResult>, AppError> {
    let result = state.analysis.score_resume(&fields)?;
    Ok(Json(result))
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract_fields(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<ResumeFields> {
    Json(state.analysis.extract_fields(&req.text))
}

/// POST /api/v1/resumes/skills
pub async fn handle_scan_skills(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<ScanSkillsResponse> {
    Json(ScanSkillsResponse {
        skills: state.analysis.scan_skills(&req.text),
    })
}

/// POST /api/v1/resumes/keyword-match
///
/// Skill-vocabulary overlap between resume text and a job description.
pub async fn handle_keyword_match(
    State(state): State<AppState>,
    Json(req): Json<KeywordMatchRequest>,
) -> Result<Json<SkillOverlap>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(Json(
        state
            .analysis
            .keyword_match(&req.resume_text, &req.job_description),
    ))
}

/// POST /api/v1/resumes/keyword-match/upload
///
/// Multipart variant: `resume` file plus `job_description` text field.
pub async fn handle_keyword_match_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkillOverlap>, AppError> {
    let mut form = read_form(multipart).await?;
    let job_description = form
        .text
        .remove("job_description")
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing resume or job description".to_string()))?;
    let file = take_file(&mut form, "resume")?;

    let resume_text = document_text(&state, file).await?;
    Ok(Json(
        state.analysis.keyword_match(&resume_text, &job_description),
    ))
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerProfile>> {
    Json(state.analysis.career_profiles().to_vec())
}

/// POST /api/v1/careers/recommendations
///
/// Top three careers for a skill list, adjusted for salary, experience and degree.
pub async fn handle_career_recommendations(
    State(state): State<AppState>,
    Json(req): Json<CareerRecommendationRequest>,
) -> Result<Json<CareerRecommendationResponse>, AppError> {
    let recommendations = state.analysis.match_careers(
        &req.skills,
        req.expected_salary,
        req.years_experience,
        &req.education_level,
    )?;
    Ok(Json(CareerRecommendationResponse { recommendations }))
}
