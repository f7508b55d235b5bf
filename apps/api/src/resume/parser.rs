//! Resume intake — file validation, text extraction, and LLM parsing.
//!
//! This is thin orchestration around the LLM gateway, not part of the
//! never-fail interview core: a resume that cannot be extracted or parsed
//! surfaces as an `AppError` to the uploader.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::resume::ParsedResume;
use crate::resume::prompts::RESUME_PARSE_INSTRUCTIONS;

pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Near-deterministic temperature: parsing is extraction, not generation.
const PARSE_TEMPERATURE: f32 = 0.3;

/// Rejects uploads before any bytes are processed.
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<(), AppError> {
    if size > MAX_FILE_SIZE_BYTES {
        return Err(AppError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }
    if !is_pdf(file_name, content_type) && !is_text(file_name, content_type) {
        return Err(AppError::Validation(
            "Unsupported file type. Please upload a PDF or TXT file.".to_string(),
        ));
    }
    Ok(())
}

/// Pulls plain text out of an uploaded resume file.
pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    if is_pdf(file_name, content_type) {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AppError::UnprocessableEntity(format!("Failed to extract text from PDF: {e}"))
        })?;
        info!("Extracted {} chars from PDF '{}'", text.len(), file_name);
        Ok(text)
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Parses resume text into its structured form via one LLM call.
pub async fn parse_resume_content(
    text: &str,
    llm: &LlmClient,
) -> Result<ParsedResume, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text is empty after extraction".to_string(),
        ));
    }

    let system = format!("{JSON_ONLY_SYSTEM}\n\n{RESUME_PARSE_INSTRUCTIONS}");
    let mut parsed: ParsedResume = llm
        .call_json(text, &system, PARSE_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    // The model is told not to echo the text; the server owns this field.
    parsed.raw_text = text.to_string();

    info!(
        "Parsed resume for '{}': {} experience entries, {} skills",
        parsed.personal_info.name,
        parsed.experience.len(),
        parsed.skills.len()
    );
    Ok(parsed)
}

fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    content_type == Some("application/pdf") || file_name.to_lowercase().ends_with(".pdf")
}

fn is_text(file_name: &str, content_type: Option<&str>) -> bool {
    content_type == Some("text/plain") || file_name.to_lowercase().ends_with(".txt")
}
