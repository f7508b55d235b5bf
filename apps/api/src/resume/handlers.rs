use axum::{extract::Multipart, extract::State, Json};

use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::resume::parser::{extract_text, parse_resume_content, validate_upload};
use crate::state::AppState;

/// POST /api/v1/resumes/parse
///
/// Multipart upload with a single `file` field (PDF or TXT). Returns the
/// structured resume ready to start an interview with.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        validate_upload(&file_name, content_type.as_deref(), data.len())?;
        let text = extract_text(&file_name, content_type.as_deref(), &data)?;
        let parsed = parse_resume_content(&text, &state.llm).await?;
        return Ok(Json(parsed));
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart upload".to_string(),
    ))
}
