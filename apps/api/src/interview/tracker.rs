//! Conversation state tracking — the per-interview state machine.
//!
//! Owns the current topic, topic depth, follow-up budget, and the running
//! memory of what the candidate has covered. Decides follow-up vs transition;
//! interview completion itself is triggered by the interviewer, not here.
//!
//! Invariant: `follow_up_count <= MAX_FOLLOW_UPS` and
//! `topic_depth <= MAX_TOPIC_DEPTH` after any sequence of calls. Once either
//! bound is reached `should_transition` reports true and the next
//! `reset_topic` zeroes both counters.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::interview::mentions::{ExtractedMentions, MentionExtractor};

/// Max consecutive follow-ups inside one topic.
pub const MAX_FOLLOW_UPS: u32 = 3;
/// Max exploration depth inside one topic.
pub const MAX_TOPIC_DEPTH: u32 = 3;

/// Where the conversation currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initial,
    FollowUp,
    Transition,
    Completion,
}

/// Interview themes. A closed set rather than free text so topic selection
/// and coverage checks are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// The fixed opening question, before any core topic is entered.
    Introduction,
    TechnicalExperience,
    ProjectDeepDive,
    ProblemSolving,
    TeamCollaboration,
    /// Sentinel once every core topic has been covered.
    WrapUp,
}

/// Core topics, visited in order; `WrapUp` follows once all are covered.
pub const CORE_TOPICS: [Topic; 4] = [
    Topic::TechnicalExperience,
    Topic::ProjectDeepDive,
    Topic::ProblemSolving,
    Topic::TeamCollaboration,
];

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Introduction => "introduction",
            Topic::TechnicalExperience => "technical_experience",
            Topic::ProjectDeepDive => "project_deep_dive",
            Topic::ProblemSolving => "problem_solving",
            Topic::TeamCollaboration => "team_collaboration",
            Topic::WrapUp => "wrap_up",
        }
    }
}

/// What kind of follow-up to ask next. A function of the current topic depth
/// alone, with content only breaking ties at shallow depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpKind {
    Clarification,
    Example,
    Challenge,
    Outcome,
    Technical,
}

/// One analyzed answer, as remembered for later prompt context.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub topic: Topic,
    pub details: Vec<String>,
    pub technologies: Vec<String>,
    pub projects: Vec<String>,
    pub companies: Vec<String>,
    pub challenges: Vec<String>,
    pub outcomes: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Result of analyzing one candidate answer.
#[derive(Debug, Clone)]
pub struct ResponseAnalysis {
    pub acknowledgment: String,
    pub should_follow_up: bool,
    pub follow_up_kind: FollowUpKind,
    pub mentions: ExtractedMentions,
}

const GENERIC_ACKS: &[&str] = &[
    "That's interesting!",
    "I see.",
    "Great example!",
    "That sounds like valuable experience.",
    "Excellent!",
    "That's a good approach.",
    "Nice work!",
    "That makes sense.",
];

const CHALLENGE_ACKS: &[&str] = &[
    "That sounds challenging!",
    "Those kinds of problems can be tricky to solve.",
    "Complex issues like that really test your skills.",
];

const TECH_ACKS: &[&str] = &[
    "Great technology choices!",
    "That's a solid tech stack.",
    "Those are excellent tools for that kind of project.",
];

const PROJECT_ACKS: &[&str] = &[
    "That project sounds really interesting!",
    "What a great project to work on!",
    "That must have been an engaging project.",
];

/// Answers containing any of these are worth digging into.
const INTERESTING_KEYWORDS: &[&str] = &[
    "project",
    "challenge",
    "problem",
    "built",
    "created",
    "developed",
    "team",
    "solution",
    "implementation",
    "architecture",
];

pub struct ConversationTracker {
    phase: Phase,
    current_topic: Topic,
    topic_depth: u32,
    follow_up_count: u32,
    memory: Vec<MemoryEntry>,
    covered_topics: Vec<Topic>,
    extractor: Box<dyn MentionExtractor>,
    rng: StdRng,
}

impl ConversationTracker {
    pub fn new(extractor: Box<dyn MentionExtractor>) -> Self {
        Self::with_rng(extractor, StdRng::from_entropy())
    }

    /// Injectable RNG so acknowledgment selection is reproducible in tests.
    pub fn with_rng(extractor: Box<dyn MentionExtractor>, rng: StdRng) -> Self {
        Self {
            phase: Phase::Initial,
            current_topic: Topic::Introduction,
            topic_depth: 0,
            follow_up_count: 0,
            memory: Vec::new(),
            covered_topics: Vec::new(),
            extractor,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_topic(&self) -> Topic {
        self.current_topic
    }

    pub fn topic_depth(&self) -> u32 {
        self.topic_depth
    }

    pub fn follow_up_count(&self) -> u32 {
        self.follow_up_count
    }

    pub fn covered_topics(&self) -> &[Topic] {
        &self.covered_topics
    }

    pub fn memory(&self) -> &[MemoryEntry] {
        &self.memory
    }

    /// Enters a new topic: zeroes both counters and records coverage.
    /// Phase is `Initial` for the interview's first topic, `Transition` after.
    pub fn reset_topic(&mut self, topic: Topic) {
        self.phase = if self.covered_topics.is_empty() {
            Phase::Initial
        } else {
            Phase::Transition
        };
        self.current_topic = topic;
        self.topic_depth = 0;
        self.follow_up_count = 0;
        self.covered_topics.push(topic);
    }

    /// First core topic not yet covered, or `WrapUp` once all four are done.
    pub fn next_topic(&self) -> Topic {
        CORE_TOPICS
            .iter()
            .find(|t| !self.covered_topics.contains(t))
            .copied()
            .unwrap_or(Topic::WrapUp)
    }

    /// Analyzes one candidate answer: extracts mentions, picks an
    /// acknowledgment, decides whether to follow up and how, and appends a
    /// memory entry regardless of the decision.
    pub fn analyze_response(&mut self, answer: &str) -> ResponseAnalysis {
        let mentions = self.extractor.extract(answer);
        let acknowledgment = self.pick_acknowledgment(&mentions);
        let should_follow_up = self.should_follow_up(answer, &mentions);
        let follow_up_kind = self.follow_up_kind(answer, &mentions);

        self.memory.push(MemoryEntry {
            topic: self.current_topic,
            details: mentions.key_details.clone(),
            technologies: mentions.technologies.clone(),
            projects: mentions.projects.clone(),
            companies: mentions.companies.clone(),
            challenges: mentions.challenges.clone(),
            outcomes: mentions.outcomes.clone(),
            timestamp: Utc::now(),
        });

        ResponseAnalysis {
            acknowledgment,
            should_follow_up,
            follow_up_kind,
            mentions,
        }
    }

    /// Records that a follow-up question was asked within the current topic.
    /// Counters saturate at their caps; by then `should_transition` already
    /// forces a topic change.
    pub fn record_follow_up(&mut self) {
        self.follow_up_count = (self.follow_up_count + 1).min(MAX_FOLLOW_UPS);
        self.topic_depth = (self.topic_depth + 1).min(MAX_TOPIC_DEPTH);
        self.phase = Phase::FollowUp;
    }

    /// Marks the interview finished. Only the interviewer calls this.
    pub fn complete(&mut self) {
        self.phase = Phase::Completion;
    }

    pub fn should_transition(&self) -> bool {
        self.follow_up_count >= MAX_FOLLOW_UPS || self.topic_depth >= MAX_TOPIC_DEPTH
    }

    /// Renders the last three memory entries, oldest first, for inclusion in
    /// a generation prompt.
    pub fn conversation_context(&self) -> String {
        let start = self.memory.len().saturating_sub(3);
        let recent = &self.memory[start..];

        let mut context = String::from("=== CONVERSATION CONTEXT ===\n");
        if !recent.is_empty() {
            context.push_str("Previously discussed:\n");
            for (index, entry) in recent.iter().enumerate() {
                context.push_str(&format!("{}. Topic: {}\n", index + 1, entry.topic.label()));
                if !entry.technologies.is_empty() {
                    context.push_str(&format!(
                        "   Technologies: {}\n",
                        entry.technologies.join(", ")
                    ));
                }
                if !entry.projects.is_empty() {
                    context.push_str(&format!("   Projects: {}\n", entry.projects.join(", ")));
                }
                if !entry.companies.is_empty() {
                    context.push_str(&format!("   Companies: {}\n", entry.companies.join(", ")));
                }
            }
        }
        context
    }

    fn pick_acknowledgment(&mut self, mentions: &ExtractedMentions) -> String {
        let pool: &[&str] = if !mentions.challenges.is_empty() {
            CHALLENGE_ACKS
        } else if !mentions.technologies.is_empty() {
            TECH_ACKS
        } else if !mentions.projects.is_empty() {
            PROJECT_ACKS
        } else {
            GENERIC_ACKS
        };
        pool.choose(&mut self.rng)
            .copied()
            .unwrap_or("That's interesting!")
            .to_string()
    }

    fn should_follow_up(&self, answer: &str, _mentions: &ExtractedMentions) -> bool {
        // The follow-up budget is a hard bound.
        if self.follow_up_count >= MAX_FOLLOW_UPS {
            return false;
        }

        // Very short answers get a clarifying follow-up.
        if answer.split_whitespace().count() < 5 {
            return true;
        }

        let lower = answer.to_lowercase();
        let has_interesting_content = INTERESTING_KEYWORDS.iter().any(|kw| lower.contains(kw));

        has_interesting_content || self.topic_depth < MAX_TOPIC_DEPTH
    }

    fn follow_up_kind(&self, answer: &str, mentions: &ExtractedMentions) -> FollowUpKind {
        let lower = answer.to_lowercase();
        match self.topic_depth {
            // First follow-up digs into specifics.
            0 => {
                if lower.contains("project") || lower.contains("built") {
                    FollowUpKind::Technical
                } else {
                    FollowUpKind::Clarification
                }
            }
            // Second follow-up explores challenges or asks for an example.
            1 => {
                if !mentions.challenges.is_empty() {
                    FollowUpKind::Challenge
                } else {
                    FollowUpKind::Example
                }
            }
            // Third follow-up asks about results.
            2 => FollowUpKind::Outcome,
            _ => FollowUpKind::Clarification,
        }
    }
}
