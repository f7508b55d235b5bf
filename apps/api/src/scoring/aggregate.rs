//! Final score aggregation — the end-of-interview report.
//!
//! The numeric breakdown is a pure function of the per-turn category scores
//! and is always computed for real; only the narrative may fall back to
//! generic text when the LLM call fails.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, CompletionGateway};
use crate::models::interview::{CategoryScores, FinalScore, ResponseRecord};
use crate::models::resume::ResumeContext;
use crate::scoring::prompts::{REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM_TEMPLATE};

/// Sampling temperature for the narrative call.
const REPORT_TEMPERATURE: f32 = 0.8;
/// Transcript excerpt length in the per-turn summaries.
const SUMMARY_EXCERPT_CHARS: usize = 200;

/// Pure numeric aggregation: rounded per-category means plus the rounded
/// mean of per-response totals. Responses not yet scored (no `analysis`)
/// are skipped. Empty input aggregates to all zeros.
pub fn aggregate_breakdown(responses: &[ResponseRecord]) -> (CategoryScores, u32) {
    let analyses: Vec<&CategoryScores> =
        responses.iter().filter_map(|r| r.analysis.as_ref()).collect();
    if analyses.is_empty() {
        return (CategoryScores::ZERO, 0);
    }

    let count = analyses.len() as f64;
    let mean = |select: fn(&CategoryScores) -> u32| -> u32 {
        let sum: u32 = analyses.iter().map(|a| select(*a)).sum();
        (f64::from(sum) / count).round() as u32
    };

    let breakdown = CategoryScores {
        communication: mean(|a| a.communication),
        content: mean(|a| a.content),
        experience: mean(|a| a.experience),
        performance: mean(|a| a.performance),
    };
    let overall = mean(|a| a.total());

    (breakdown, overall)
}

/// Narrative fields of the final report, decoded from the model.
#[derive(Debug, Default, Deserialize)]
struct Narrative {
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvement_areas: Vec<String>,
    #[serde(default)]
    detailed_feedback: String,
    #[serde(default)]
    recommendations: Vec<String>,
}

pub struct FinalScoreAggregator {
    gateway: Arc<dyn CompletionGateway>,
}

impl FinalScoreAggregator {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    /// Builds the final report: exact numeric aggregation first, then a
    /// holistic narrative from the LLM. Infallible: a failed or unparsable
    /// narrative call substitutes generic text around the real numbers.
    pub async fn aggregate(
        &self,
        responses: &[ResponseRecord],
        role: &str,
        resume: &ResumeContext,
    ) -> FinalScore {
        let (breakdown, overall) = aggregate_breakdown(responses);
        info!(
            "Aggregated {} responses: overall {}/100",
            responses.len(),
            overall
        );

        let system = REPORT_SYSTEM_TEMPLATE.replace("{role}", role);
        let prompt = REPORT_PROMPT_TEMPLATE
            .replace("{name}", &resume.name)
            .replace("{experience}", &resume.experience)
            .replace("{skills}", &resume.skills.join(", "))
            .replace("{communication}", &breakdown.communication.to_string())
            .replace("{content}", &breakdown.content.to_string())
            .replace("{experience_score}", &breakdown.experience.to_string())
            .replace("{performance}", &breakdown.performance.to_string())
            .replace("{overall}", &overall.to_string())
            .replace("{responses_summary}", &summarize_responses(responses));

        let narrative = match self
            .gateway
            .generate_completion(&system, &prompt, REPORT_TEMPERATURE)
            .await
        {
            Ok(text) => match serde_json::from_str::<Narrative>(strip_json_fences(&text)) {
                Ok(narrative) => narrative,
                Err(e) => {
                    warn!("Narrative payload did not decode: {e}; using generic narrative");
                    Narrative::default()
                }
            },
            Err(e) => {
                warn!("Narrative call failed: {e}; using generic narrative");
                Narrative::default()
            }
        };

        FinalScore {
            overall_score: overall,
            breakdown,
            strengths: non_empty_or(narrative.strengths, generic_strengths),
            improvement_areas: non_empty_or(narrative.improvement_areas, generic_improvements),
            detailed_feedback: if narrative.detailed_feedback.trim().is_empty() {
                GENERIC_DETAILED_FEEDBACK.to_string()
            } else {
                narrative.detailed_feedback
            },
            recommendations: non_empty_or(narrative.recommendations, generic_recommendations),
        }
    }
}

/// Per-turn summary block for the narrative prompt: question, transcript
/// excerpt, score, feedback.
fn summarize_responses(responses: &[ResponseRecord]) -> String {
    responses
        .iter()
        .enumerate()
        .map(|(index, r)| {
            let excerpt: String = r.transcript.chars().take(SUMMARY_EXCERPT_CHARS).collect();
            format!(
                "Question {}: \"{}\"\nResponse: \"{}...\"\nScore: {}/100\nFeedback: {}\n",
                index + 1,
                r.question,
                excerpt,
                r.score.unwrap_or(0),
                r.feedback.as_deref().unwrap_or("(not yet scored)"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty_or(items: Vec<String>, fallback: fn() -> Vec<String>) -> Vec<String> {
    if items.is_empty() {
        fallback()
    } else {
        items
    }
}

fn generic_strengths() -> Vec<String> {
    vec![
        "Engaged well in the interview conversation".to_string(),
        "Demonstrated relevant background knowledge".to_string(),
        "Showed professional communication skills".to_string(),
    ]
}

fn generic_improvements() -> Vec<String> {
    vec![
        "Could provide more detailed technical explanations".to_string(),
        "Consider adding more specific examples from experience".to_string(),
    ]
}

fn generic_recommendations() -> Vec<String> {
    vec![
        "Practice explaining technical concepts with specific examples".to_string(),
        "Prepare stories that highlight problem-solving abilities".to_string(),
        "Focus on quantifying achievements and business impact".to_string(),
        "Continue developing expertise in core technical skills".to_string(),
    ]
}

const GENERIC_DETAILED_FEEDBACK: &str = "The candidate demonstrated good foundational \
    skills with opportunities to enhance technical depth and provide more specific \
    examples in future interviews.";

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

    fn record(c: u32, n: u32, e: u32, p: u32) -> ResponseRecord {
        ResponseRecord {
            question_id: "1".to_string(),
            question: "Tell me about a project.".to_string(),
            transcript: "I built a dashboard.".to_string(),
            audio_url: None,
            score: Some(c + n + e + p),
            feedback: Some("Solid.".to_string()),
            analysis: Some(CategoryScores {
                communication: c,
                content: n,
                experience: e,
                performance: p,
            }),
        }
    }

    fn resume_context() -> ResumeContext {
        ResumeContext {
            name: "Jordan Lee".to_string(),
            experience: "Engineer at Acme Corp".to_string(),
            skills: vec!["React".to_string()],
        }
    }

    #[test]
    fn test_empty_responses_aggregate_to_zero() {
        let (breakdown, overall) = aggregate_breakdown(&[]);
        assert_eq!(breakdown, CategoryScores::ZERO);
        assert_eq!(overall, 0);
    }

    #[test]
    fn test_uniform_responses_aggregate_to_themselves() {
        let responses = vec![record(20, 25, 18, 15); 4];
        let (breakdown, overall) = aggregate_breakdown(&responses);
        assert_eq!(
            breakdown,
            CategoryScores {
                communication: 20,
                content: 25,
                experience: 18,
                performance: 15
            }
        );
        assert_eq!(overall, 78);
    }

    #[test]
    fn test_means_are_rounded_to_nearest() {
        let responses = vec![record(10, 10, 10, 10), record(15, 15, 15, 15)];
        let (breakdown, overall) = aggregate_breakdown(&responses);
        // 12.5 rounds away from zero.
        assert_eq!(breakdown.communication, 13);
        // Overall is the rounded mean of totals (40 and 60), not the sum of
        // the rounded category means.
        assert_eq!(overall, 50);
    }

    #[test]
    fn test_unscored_responses_are_skipped() {
        let mut unscored = record(10, 10, 10, 10);
        unscored.analysis = None;
        let responses = vec![record(20, 20, 20, 15), unscored];
        let (breakdown, overall) = aggregate_breakdown(&responses);
        assert_eq!(breakdown.communication, 20);
        assert_eq!(overall, 75);
    }

    #[tokio::test]
    async fn test_failed_narrative_keeps_real_numbers() {
        let aggregator = FinalScoreAggregator::new(Arc::new(FakeGateway { reply: None }));
        let responses = vec![record(20, 25, 18, 15); 2];
        let score = aggregator
            .aggregate(&responses, "Backend", &resume_context())
            .await;

        assert_eq!(score.overall_score, 78);
        assert_eq!(score.breakdown.content, 25);
        // Narrative fell back to the generic text.
        assert_eq!(score.strengths, generic_strengths());
        assert_eq!(score.detailed_feedback, GENERIC_DETAILED_FEEDBACK);
    }

    #[tokio::test]
    async fn test_narrative_fields_come_from_model_when_parsable() {
        let reply = r#"{
            "strengths": ["Clear storytelling"],
            "improvement_areas": ["More metrics"],
            "detailed_feedback": "Strong throughout.",
            "recommendations": ["Lead a design review"]
        }"#;
        let aggregator = FinalScoreAggregator::new(Arc::new(FakeGateway {
            reply: Some(reply.to_string()),
        }));
        let score = aggregator
            .aggregate(&[record(20, 25, 18, 15)], "Backend", &resume_context())
            .await;

        assert_eq!(score.strengths, vec!["Clear storytelling"]);
        assert_eq!(score.improvement_areas, vec!["More metrics"]);
        assert_eq!(score.detailed_feedback, "Strong throughout.");
        assert_eq!(score.recommendations, vec!["Lead a design review"]);
        assert_eq!(score.overall_score, 78);
    }

    #[tokio::test]
    async fn test_partial_narrative_backfills_missing_fields() {
        let reply = r#"{"strengths": ["Concise answers"]}"#;
        let aggregator = FinalScoreAggregator::new(Arc::new(FakeGateway {
            reply: Some(reply.to_string()),
        }));
        let score = aggregator
            .aggregate(&[record(10, 10, 10, 10)], "Backend", &resume_context())
            .await;

        assert_eq!(score.strengths, vec!["Concise answers"]);
        assert_eq!(score.improvement_areas, generic_improvements());
        assert_eq!(score.recommendations, generic_recommendations());
    }

    #[test]
    fn test_summary_truncates_long_transcripts() {
        let mut r = record(10, 10, 10, 10);
        r.transcript = "word ".repeat(200);
        let summary = summarize_responses(&[r]);
        // 200 chars of excerpt plus the surrounding scaffolding.
        assert!(summary.len() < 400);
        assert!(summary.contains("Score: 40/100"));
    }
}
