//! Conversational interviewer — sequences one interview turn by turn.
//!
//! Every turn yields a question or a closing remark, even under total LLM
//! unavailability: each generation path has a deterministic fallback built
//! from the entities already extracted, so the candidate is never left
//! without a next prompt.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::interview::mentions::{ExtractedMentions, PatternMentionExtractor};
use crate::interview::prompts::{
    follow_up_style, topic_guidance, FOLLOW_UP_PROMPT_TEMPLATE, FOLLOW_UP_SYSTEM,
    TRANSITION_PROMPT_TEMPLATE, TRANSITION_SYSTEM,
};
use crate::interview::tracker::{ConversationTracker, ResponseAnalysis, Topic};
use crate::llm_client::CompletionGateway;
use crate::models::interview::{ConversationEntry, NextQuestion, Progress};
use crate::models::resume::{ParsedResume, ResumeContext};

/// Sampling temperature for follow-up generation.
const FOLLOW_UP_TEMPERATURE: f32 = 0.85;
/// Sampling temperature for topic transitions.
const TRANSITION_TEMPERATURE: f32 = 0.8;
/// The fatigue heuristic only activates once this many questions were asked.
const FATIGUE_CHECK_AFTER: u32 = 6;
/// Average answer length (words) below which the candidate is considered
/// fatigued and the interview winds down early.
const FATIGUE_WORDS_THRESHOLD: f64 = 10.0;

/// Fixed response when a non-first turn arrives without a usable answer.
/// Treated as a soft failure: no state is mutated, the turn can be retried.
const CLARIFICATION_REQUEST: &str =
    "I'm having trouble processing your response. Could you please repeat that?";

const CLOSING_REMARKS: &[&str] = &[
    "Thank you for sharing so much about your experience! Before we wrap up, is there \
     anything else important about your background that we haven't discussed?",
    "This has been a great conversation! Do you have any questions for me about the \
     role or the company?",
    "We've covered a lot of ground today. Is there anything else you'd like to highlight \
     about your experience or any questions about the position?",
];

pub struct Interviewer {
    resume: ParsedResume,
    role: String,
    role_description: String,
    history: Vec<ConversationEntry>,
    questions_asked: u32,
    max_questions: u32,
    tracker: ConversationTracker,
    gateway: Arc<dyn CompletionGateway>,
    rng: StdRng,
}

impl Interviewer {
    pub fn new(
        resume: ParsedResume,
        role: String,
        role_description: String,
        gateway: Arc<dyn CompletionGateway>,
        max_questions: u32,
    ) -> Self {
        let extractor = PatternMentionExtractor::new(&resume.skills);
        Self {
            resume,
            role,
            role_description,
            history: Vec::new(),
            questions_asked: 0,
            max_questions,
            tracker: ConversationTracker::new(Box::new(extractor)),
            gateway,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant so closing-remark and acknowledgment selection is
    /// reproducible in tests.
    pub fn with_seed(
        resume: ParsedResume,
        role: String,
        role_description: String,
        gateway: Arc<dyn CompletionGateway>,
        max_questions: u32,
        seed: u64,
    ) -> Self {
        let extractor = PatternMentionExtractor::new(&resume.skills);
        Self {
            resume,
            role,
            role_description,
            history: Vec::new(),
            questions_asked: 0,
            max_questions,
            tracker: ConversationTracker::with_rng(
                Box::new(extractor),
                StdRng::seed_from_u64(seed),
            ),
            gateway,
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn resume_context(&self) -> ResumeContext {
        ResumeContext::from(&self.resume)
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    /// Produces the next interviewer utterance.
    ///
    /// The first call emits the fixed opening question without an LLM call.
    /// Later calls require the candidate's previous answer; a missing or
    /// blank answer yields a fixed clarification request without mutating any
    /// state, so the turn can simply be retried.
    pub async fn generate_next_question(&mut self, previous_answer: Option<&str>) -> NextQuestion {
        if self.questions_asked == 0 {
            let question = format!(
                "To start, could you tell me a bit about yourself and your background in {}?",
                self.role
            );
            self.push_question(question.clone());
            info!("Interview opened for role '{}'", self.role);
            return NextQuestion {
                question,
                should_end: false,
            };
        }

        let answer = match previous_answer {
            Some(a) if !a.trim().is_empty() => a,
            _ => {
                warn!("Turn requested without a previous answer; asking to repeat");
                return NextQuestion {
                    question: CLARIFICATION_REQUEST.to_string(),
                    should_end: false,
                };
            }
        };

        // Backfill the answer onto the most recent open history entry.
        if let Some(last) = self.history.last_mut() {
            last.answer = answer.to_string();
        }

        // Terminal states: question cap reached or the candidate is fading.
        // Either way the turn emits a closing remark and no follow-up or
        // transition logic runs.
        if self.questions_asked + 1 >= self.max_questions || self.fatigued() {
            let remark = self.closing_remark();
            self.tracker.complete();
            self.push_question(remark.clone());
            info!(
                "Interview ending after {} questions",
                self.questions_asked
            );
            return NextQuestion {
                question: remark,
                should_end: true,
            };
        }

        let analysis = self.tracker.analyze_response(answer);

        let question = if analysis.should_follow_up && !self.tracker.should_transition() {
            let question = self.generate_follow_up(answer, &analysis).await;
            self.tracker.record_follow_up();
            question
        } else {
            let next_topic = self.tracker.next_topic();
            self.tracker.reset_topic(next_topic);
            self.generate_transition(answer, next_topic, &analysis).await
        };

        self.push_question(question.clone());
        NextQuestion {
            question,
            should_end: false,
        }
    }

    /// Derived read-only progress view.
    pub fn get_progress(&self) -> Progress {
        let percentage = if self.max_questions == 0 {
            0.0
        } else {
            (f64::from(self.questions_asked) / f64::from(self.max_questions) * 100.0).min(100.0)
        };
        Progress {
            current: self.questions_asked,
            total: self.max_questions,
            percentage,
        }
    }

    fn push_question(&mut self, question: String) {
        self.history.push(ConversationEntry {
            question,
            answer: String::new(),
            timestamp: Utc::now(),
        });
        self.questions_asked += 1;
    }

    /// Candidates giving consistently terse answers late in the interview are
    /// winding down; end early rather than grinding through the full budget.
    fn fatigued(&self) -> bool {
        if self.questions_asked < FATIGUE_CHECK_AFTER {
            return false;
        }
        let answered: Vec<usize> = self
            .history
            .iter()
            .filter(|entry| !entry.answer.trim().is_empty())
            .map(|entry| entry.answer.split_whitespace().count())
            .collect();
        if answered.is_empty() {
            return false;
        }
        let avg = answered.iter().sum::<usize>() as f64 / answered.len() as f64;
        avg < FATIGUE_WORDS_THRESHOLD
    }

    fn closing_remark(&mut self) -> String {
        CLOSING_REMARKS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CLOSING_REMARKS[0])
            .to_string()
    }

    async fn generate_follow_up(&mut self, answer: &str, analysis: &ResponseAnalysis) -> String {
        let prompt = FOLLOW_UP_PROMPT_TEMPLATE
            .replace("{conversation_context}", &self.tracker.conversation_context())
            .replace("{previous_answer}", answer)
            .replace("{technologies}", &list_or_none(&analysis.mentions.technologies))
            .replace("{projects}", &list_or_none(&analysis.mentions.projects))
            .replace("{companies}", &list_or_none(&analysis.mentions.companies))
            .replace("{challenges}", &list_or_none(&analysis.mentions.challenges))
            .replace("{timeframes}", &list_or_none(&analysis.mentions.timeframes))
            .replace("{key_details}", &list_or_none(&analysis.mentions.key_details))
            .replace("{style_instruction}", follow_up_style(analysis.follow_up_kind))
            .replace("{suggested_acknowledgment}", &analysis.acknowledgment);

        match self
            .gateway
            .generate_completion(FOLLOW_UP_SYSTEM, &prompt, FOLLOW_UP_TEMPERATURE)
            .await
        {
            Ok(text) if !text.trim().is_empty() => tidy_question(&text),
            Ok(_) => {
                warn!("Follow-up generation returned empty text; using fallback");
                fallback_follow_up(&analysis.mentions)
            }
            Err(e) => {
                warn!("Follow-up generation failed: {e}; using fallback");
                fallback_follow_up(&analysis.mentions)
            }
        }
    }

    async fn generate_transition(
        &mut self,
        answer: &str,
        next_topic: Topic,
        analysis: &ResponseAnalysis,
    ) -> String {
        let prompt = TRANSITION_PROMPT_TEMPLATE
            .replace("{conversation_context}", &self.tracker.conversation_context())
            .replace("{previous_answer}", answer)
            .replace("{role}", &self.role)
            .replace("{role_description}", &self.role_description)
            .replace("{next_topic}", next_topic.label())
            .replace("{topic_guidance}", topic_guidance(next_topic))
            .replace("{suggested_acknowledgment}", &analysis.acknowledgment);

        info!("Transitioning to topic '{}'", next_topic.label());

        match self
            .gateway
            .generate_completion(TRANSITION_SYSTEM, &prompt, TRANSITION_TEMPERATURE)
            .await
        {
            Ok(text) if !text.trim().is_empty() => tidy_question(&text),
            Ok(_) => {
                warn!("Transition generation returned empty text; using fallback");
                fallback_transition(next_topic)
            }
            Err(e) => {
                warn!("Transition generation failed: {e}; using fallback");
                fallback_transition(next_topic)
            }
        }
    }
}

/// Deterministic follow-up built from what the candidate already gave us.
fn fallback_follow_up(mentions: &ExtractedMentions) -> String {
    if let Some(project) = mentions.projects.first() {
        format!(
            "That's interesting! Tell me more about that {project} - what specific challenges did you face?"
        )
    } else if let Some(tech) = mentions.technologies.first() {
        format!("Great! How did you work with {tech} in that project?")
    } else {
        "That sounds fascinating! Can you elaborate on the most challenging part of what you just described?"
            .to_string()
    }
}

/// Render a list of mentions for prompt interpolation, or "none" when empty.
fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Deterministic per-topic transition used when generation fails.
fn fallback_transition(topic: Topic) -> String {
    let question = match topic {
        Topic::Introduction => {
            "Could you tell me a bit about yourself and your background?"
        }
        Topic::TechnicalExperience => {
            "I'd like to hear more about your technical background. What technologies do you feel strongest in, and how have you used them?"
        }
        Topic::ProjectDeepDive => {
            "Let's talk about a specific project. Can you walk me through one you're particularly proud of?"
        }
        Topic::ProblemSolving => {
            "Now I'd like to hear about problem solving. Can you tell me about a challenging problem you had to work through?"
        }
        Topic::TeamCollaboration => {
            "Let's switch gears to teamwork. How do you collaborate with teammates on a typical project?"
        }
        Topic::WrapUp => {
            "Before we wrap up, is there anything else about your background you'd like to highlight?"
        }
    };
    format!("That's great experience! {question}")
}

/// Light cleanup of generated questions: trims labels the model sometimes
/// prepends and guarantees terminal punctuation.
fn tidy_question(raw: &str) -> String {
    let mut question = raw.trim();
    for prefix in ["Question:", "question:", "Q:"] {
        if let Some(stripped) = question.strip_prefix(prefix) {
            question = stripped.trim_start();
        }
    }
    let mut question = question.to_string();
    if !question.ends_with(['?', '.', '!']) {
        question.push('?');
    }
    question
}
