use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::interviewer::Interviewer;
use crate::models::interview::{FinalScore, Progress, ResponseRecord, ScoreResult};
use crate::models::resume::{ParsedResume, ResumeContext};
use crate::scoring::aggregate::FinalScoreAggregator;
use crate::scoring::response::ResponseScorer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub resume: ParsedResume,
    pub role: String,
    #[serde(default)]
    pub role_description: String,
    /// Per-interview override of the configured question cap.
    #[serde(default)]
    pub max_questions: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub interview_id: Uuid,
    pub question: String,
    pub should_end: bool,
    pub progress: Progress,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The transcribed previous answer. Absent or blank answers yield a
    /// fixed clarification request without advancing the interview.
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question: String,
    pub should_end: bool,
    pub progress: Progress,
}

#[derive(Debug, Deserialize)]
pub struct ScoreResponseRequest {
    pub question: String,
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub responses: Vec<ResponseRecord>,
}

/// POST /api/v1/interviews
pub async fn handle_start(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<Json<StartInterviewResponse>, AppError> {
    if req.role.trim().is_empty() {
        return Err(AppError::Validation("role must not be empty".to_string()));
    }
    let max_questions = req.max_questions.unwrap_or(state.config.max_questions);
    if max_questions == 0 {
        return Err(AppError::Validation(
            "max_questions must be at least 1".to_string(),
        ));
    }

    let mut interviewer = Interviewer::new(
        req.resume,
        req.role,
        req.role_description,
        state.gateway(),
        max_questions,
    );
    let opening = interviewer.generate_next_question(None).await;
    let progress = interviewer.get_progress();
    let interview_id = state.sessions.insert(interviewer).await;

    Ok(Json(StartInterviewResponse {
        interview_id,
        question: opening.question,
        should_end: opening.should_end,
        progress,
    }))
}

/// POST /api/v1/interviews/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let session = lookup(&state, id).await?;
    let mut interviewer = session.lock().await;
    let next = interviewer.generate_next_question(req.answer.as_deref()).await;

    Ok(Json(AnswerResponse {
        question: next.question,
        should_end: next.should_end,
        progress: interviewer.get_progress(),
    }))
}

/// GET /api/v1/interviews/:id/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Progress>, AppError> {
    let session = lookup(&state, id).await?;
    let interviewer = session.lock().await;
    Ok(Json(interviewer.get_progress()))
}

/// POST /api/v1/interviews/:id/responses/score
///
/// Fire-and-forget relative to conversation progression: the session lock is
/// released before the scoring call, so the next turn never waits on it.
pub async fn handle_score_response(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScoreResponseRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    let (role, resume_context) = interview_context(&state, id).await?;
    let scorer = ResponseScorer::new(state.gateway());
    let result = scorer
        .score_response(&req.transcript, &req.question, &role, &resume_context)
        .await;
    Ok(Json(result))
}

/// POST /api/v1/interviews/:id/report
pub async fn handle_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<FinalScore>, AppError> {
    let (role, resume_context) = interview_context(&state, id).await?;
    let aggregator = FinalScoreAggregator::new(state.gateway());
    let final_score = aggregator
        .aggregate(&req.responses, &role, &resume_context)
        .await;
    Ok(Json(final_score))
}

async fn lookup(
    state: &AppState,
    id: Uuid,
) -> Result<std::sync::Arc<tokio::sync::Mutex<Interviewer>>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

async fn interview_context(
    state: &AppState,
    id: Uuid,
) -> Result<(String, ResumeContext), AppError> {
    let session = lookup(state, id).await?;
    let interviewer = session.lock().await;
    Ok((interviewer.role().to_string(), interviewer.resume_context()))
}
