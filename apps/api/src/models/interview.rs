use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-category score caps. The four categories always sum to 100.
pub const COMMUNICATION_CAP: u32 = 25;
pub const CONTENT_CAP: u32 = 30;
pub const EXPERIENCE_CAP: u32 = 25;
pub const PERFORMANCE_CAP: u32 = 20;

/// One question/answer exchange in an interview.
/// `answer` stays empty until the candidate responds; it is backfilled in
/// place on the most recent entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of a single `generate_next_question` turn.
#[derive(Debug, Clone, Serialize)]
pub struct NextQuestion {
    pub question: String,
    pub should_end: bool,
}

/// Derived read-only view over question counters.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Scores for the four rubric categories. Clamped to their caps
/// (25/30/25/20) everywhere they are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub communication: u32,
    pub content: u32,
    pub experience: u32,
    pub performance: u32,
}

impl CategoryScores {
    pub fn total(&self) -> u32 {
        self.communication + self.content + self.experience + self.performance
    }

    pub const ZERO: CategoryScores = CategoryScores {
        communication: 0,
        content: 0,
        experience: 0,
        performance: 0,
    };
}

/// Scored evaluation of one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always the sum of the clamped category scores, 0-100.
    pub score: u32,
    pub feedback: String,
    pub analysis: CategoryScores,
}

/// One answered question as tracked by the caller. `score`/`feedback`/
/// `analysis` are filled in asynchronously once the scorer has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question_id: String,
    pub question: String,
    pub transcript: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub analysis: Option<CategoryScores>,
}

/// End-of-interview report. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalScore {
    pub overall_score: u32,
    pub breakdown: CategoryScores,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub detailed_feedback: String,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_caps_sum_to_100() {
        assert_eq!(
            COMMUNICATION_CAP + CONTENT_CAP + EXPERIENCE_CAP + PERFORMANCE_CAP,
            100
        );
    }

    #[test]
    fn test_category_scores_total() {
        let scores = CategoryScores {
            communication: 20,
            content: 25,
            experience: 18,
            performance: 15,
        };
        assert_eq!(scores.total(), 78);
        assert_eq!(CategoryScores::ZERO.total(), 0);
    }

    #[test]
    fn test_response_record_deserializes_before_scoring() {
        // A freshly transcribed record has no score fields yet.
        let json = r#"{
            "question_id": "3",
            "question": "Tell me about a project.",
            "transcript": "I built a chatbot."
        }"#;
        let record: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(record.score.is_none());
        assert!(record.analysis.is_none());
        assert!(record.audio_url.is_none());
    }
}
