//! Per-response scoring — turns one transcript into a four-category score.
//!
//! The model's own arithmetic is never trusted: each category is clamped to
//! its cap independently and the total is recomputed from the clamped parts.
//! Scoring must never block interview progress, so every failure path
//! resolves to a fixed neutral score.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::{strip_json_fences, CompletionGateway};
use crate::models::interview::{
    CategoryScores, ScoreResult, COMMUNICATION_CAP, CONTENT_CAP, EXPERIENCE_CAP, PERFORMANCE_CAP,
};
use crate::models::resume::ResumeContext;
use crate::scoring::prompts::{SCORE_PROMPT_TEMPLATE, SCORE_SYSTEM_TEMPLATE};

/// Sampling temperature for scoring calls.
const SCORE_TEMPERATURE: f32 = 0.7;

/// Raw model output, tolerant of missing or out-of-range fields.
#[derive(Debug, Deserialize)]
struct RawScorePayload {
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    analysis: Option<RawCategories>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCategories {
    #[serde(default)]
    communication: Option<f64>,
    #[serde(default)]
    content: Option<f64>,
    #[serde(default)]
    experience: Option<f64>,
    #[serde(default)]
    performance: Option<f64>,
}

pub struct ResponseScorer {
    gateway: Arc<dyn CompletionGateway>,
}

impl ResponseScorer {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    /// Scores one transcript against the question it answered.
    ///
    /// Infallible: upstream or decode failures yield the neutral fallback
    /// score instead of an error.
    pub async fn score_response(
        &self,
        transcript: &str,
        question: &str,
        role: &str,
        resume: &ResumeContext,
    ) -> ScoreResult {
        let system = SCORE_SYSTEM_TEMPLATE.replace("{role}", role);
        let prompt = SCORE_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{transcript}", transcript)
            .replace("{name}", &resume.name)
            .replace("{experience}", &resume.experience)
            .replace("{skills}", &resume.skills.join(", "));

        match self
            .gateway
            .generate_completion(&system, &prompt, SCORE_TEMPERATURE)
            .await
        {
            Ok(text) => parse_score_payload(&text).unwrap_or_else(|| {
                warn!("Score payload did not decode; using neutral fallback");
                neutral_fallback()
            }),
            Err(e) => {
                warn!("Scoring call failed: {e}; using neutral fallback");
                neutral_fallback()
            }
        }
    }
}

/// Decodes and normalizes a model scoring payload. Returns `None` only when
/// the text is not valid JSON for the expected shape; decoded-but-missing
/// fields clamp to zero.
fn parse_score_payload(text: &str) -> Option<ScoreResult> {
    let payload: RawScorePayload = serde_json::from_str(strip_json_fences(text)).ok()?;
    let raw = payload.analysis.unwrap_or_default();

    let analysis = CategoryScores {
        communication: clamp_category(raw.communication, COMMUNICATION_CAP),
        content: clamp_category(raw.content, CONTENT_CAP),
        experience: clamp_category(raw.experience, EXPERIENCE_CAP),
        performance: clamp_category(raw.performance, PERFORMANCE_CAP),
    };

    Some(ScoreResult {
        // Recomputed from clamped parts; the model-reported total is ignored.
        score: analysis.total().min(100),
        feedback: payload
            .feedback
            .unwrap_or_else(|| "Analysis completed.".to_string()),
        analysis,
    })
}

fn clamp_category(value: Option<f64>, cap: u32) -> u32 {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(cap)) as u32
}

/// Fixed neutral score used whenever scoring cannot complete.
fn neutral_fallback() -> ScoreResult {
    ScoreResult {
        score: 60,
        feedback: "Response provided good insights with room for more specific examples."
            .to_string(),
        analysis: CategoryScores {
            communication: 15,
            content: 18,
            experience: 15,
            performance: 12,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FakeGateway {
        reply: Option<String>,
    }

    #[async_trait]
    impl CompletionGateway for FakeGateway {
        async fn generate_completion(
            &self,
            _system: &str,
            _user: &str,
            _temperature: f32,
        ) -> Result<String, LlmError> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    fn scorer(reply: Option<&str>) -> ResponseScorer {
        ResponseScorer::new(Arc::new(FakeGateway {
            reply: reply.map(String::from),
        }))
    }

    fn resume_context() -> ResumeContext {
        ResumeContext {
            name: "Jordan Lee".to_string(),
            experience: "Engineer at Acme Corp".to_string(),
            skills: vec!["React".to_string()],
        }
    }

    async fn score_with(reply: Option<&str>) -> ScoreResult {
        scorer(reply)
            .score_response("I built things.", "Tell me about a project.", "Backend", &resume_context())
            .await
    }

    #[tokio::test]
    async fn test_valid_payload_scores_within_caps_and_sums() {
        let reply = r#"{
            "score": 95,
            "feedback": "Strong answer.",
            "analysis": {"communication": 20, "content": 25, "experience": 18, "performance": 15}
        }"#;
        let result = score_with(Some(reply)).await;
        assert_eq!(result.analysis.communication, 20);
        assert_eq!(result.analysis.content, 25);
        assert_eq!(result.analysis.experience, 18);
        assert_eq!(result.analysis.performance, 15);
        // Total recomputed from parts, not the model-reported 95.
        assert_eq!(result.score, 78);
        assert_eq!(result.feedback, "Strong answer.");
    }

    #[tokio::test]
    async fn test_out_of_range_categories_are_clamped_independently() {
        let reply = r#"{
            "score": 999,
            "feedback": "??",
            "analysis": {"communication": 40, "content": -5, "experience": 26.7, "performance": 20.4}
        }"#;
        let result = score_with(Some(reply)).await;
        assert_eq!(result.analysis.communication, COMMUNICATION_CAP);
        assert_eq!(result.analysis.content, 0);
        assert_eq!(result.analysis.experience, EXPERIENCE_CAP);
        assert_eq!(result.analysis.performance, PERFORMANCE_CAP);
        assert_eq!(result.score, result.analysis.total());
        assert!(result.score <= 100);
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted() {
        let reply = "```json\n{\"feedback\": \"ok\", \"analysis\": {\"communication\": 10, \"content\": 10, \"experience\": 10, \"performance\": 10}}\n```";
        let result = score_with(Some(reply)).await;
        assert_eq!(result.score, 40);
    }

    #[tokio::test]
    async fn test_missing_analysis_clamps_to_zero() {
        let result = score_with(Some(r#"{"feedback": "thin"}"#)).await;
        assert_eq!(result.analysis, CategoryScores::ZERO);
        assert_eq!(result.score, 0);
    }

    #[tokio::test]
    async fn test_non_json_reply_yields_neutral_fallback() {
        let result = score_with(Some("I cannot produce JSON today.")).await;
        assert_eq!(result.score, 60);
        assert_eq!(result.analysis.total(), 60);
    }

    #[tokio::test]
    async fn test_gateway_failure_yields_neutral_fallback() {
        let result = score_with(None).await;
        assert_eq!(result.score, 60);
        assert_eq!(
            result.analysis,
            CategoryScores {
                communication: 15,
                content: 18,
                experience: 15,
                performance: 12
            }
        );
    }

    #[test]
    fn test_score_consistency_law_over_varied_inputs() {
        // For any decoded payload: each category within caps, score == sum.
        for (c, n, e, p) in [
            (0.0, 0.0, 0.0, 0.0),
            (12.4, 29.6, 13.0, 7.0),
            (100.0, 100.0, 100.0, 100.0),
            (-3.0, 14.0, 25.0, 20.0),
        ] {
            let text = format!(
                r#"{{"analysis": {{"communication": {c}, "content": {n}, "experience": {e}, "performance": {p}}}}}"#
            );
            let result = parse_score_payload(&text).unwrap();
            assert!(result.analysis.communication <= COMMUNICATION_CAP);
            assert!(result.analysis.content <= CONTENT_CAP);
            assert!(result.analysis.experience <= EXPERIENCE_CAP);
            assert!(result.analysis.performance <= PERFORMANCE_CAP);
            assert_eq!(result.score, result.analysis.total());
        }
    }
}
