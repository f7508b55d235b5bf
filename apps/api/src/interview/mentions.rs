//! Mention extraction — pattern heuristics that surface what a candidate
//! actually talked about in a free-text answer.
//!
//! This is a best-effort extractor, not an NLP entity recognizer. False
//! positives and negatives are acceptable; the hard requirements are
//! determinism (same text, same lists) and that extraction never fails on
//! malformed or empty input.

use regex::Regex;

/// Everything surfaced from one answer. All lists are in first-found order;
/// duplicates are permitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMentions {
    pub technologies: Vec<String>,
    pub projects: Vec<String>,
    pub companies: Vec<String>,
    pub challenges: Vec<String>,
    pub outcomes: Vec<String>,
    pub timeframes: Vec<String>,
    pub key_details: Vec<String>,
}

/// The extraction strategy. The conversation tracker only depends on this
/// trait, so the pattern heuristics can be swapped for a proper NLP backend
/// without touching any control flow.
pub trait MentionExtractor: Send + Sync {
    fn extract(&self, text: &str) -> ExtractedMentions;
}

/// Static technology vocabulary, merged with the candidate's own skill list
/// at construction time.
const COMMON_TECH: &[&str] = &[
    "react",
    "vue",
    "angular",
    "javascript",
    "typescript",
    "python",
    "java",
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "graphql",
    "rest api",
    "microservices",
];

/// Keywords whose mere presence marks a challenge being discussed.
const CHALLENGE_KEYWORDS: &[&str] = &[
    "challenge", "problem", "difficult", "issue", "bug", "error", "struggle", "hard", "complex",
];

/// Keywords whose mere presence marks an outcome being claimed.
const OUTCOME_KEYWORDS: &[&str] = &[
    "solved",
    "fixed",
    "improved",
    "increased",
    "reduced",
    "successful",
    "achieved",
    "delivered",
];

/// Words that a company-pattern match must not reduce to.
const COMPANY_STOP_WORDS: &[&str] = &["we", "where", "i", "the"];

/// Default `MentionExtractor`: fixed regex and keyword rules over the raw
/// answer text.
pub struct PatternMentionExtractor {
    vocabulary: Vec<String>,
    project_re: Regex,
    company_re: Regex,
    timeframe_re: Regex,
}

impl PatternMentionExtractor {
    /// Builds the extractor with the candidate's resume skills merged into
    /// the static technology vocabulary.
    pub fn new(resume_skills: &[String]) -> Self {
        let mut vocabulary: Vec<String> = resume_skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        for tech in COMMON_TECH {
            vocabulary.push((*tech).to_string());
        }
        let mut seen = std::collections::HashSet::new();
        vocabulary.retain(|v| seen.insert(v.clone()));

        Self {
            vocabulary,
            project_re: Regex::new(
                r"(?i)\b(?:built|created|developed|worked on|project was)\s+(?:(?:a|an|the)\s+)?([A-Za-z][A-Za-z ]*?)(?:\s+(?:using|with|for|that)\b|[.,!?;:]|$)",
            )
            .expect("project pattern is valid"),
            company_re: Regex::new(
                r"\b(?:at|for|with)\s+((?:[A-Z][A-Za-z&.'-]*)(?:\s+[A-Z&][A-Za-z&.'-]*)*)",
            )
            .expect("company pattern is valid"),
            timeframe_re: Regex::new(r"(?i)\b\d+\s*(?:years?|months?|weeks?)\b")
                .expect("timeframe pattern is valid"),
        }
    }

    fn extract_technologies(&self, lower: &str) -> Vec<String> {
        self.vocabulary
            .iter()
            .filter(|tech| lower.contains(tech.as_str()))
            .cloned()
            .collect()
    }

    fn extract_projects(&self, text: &str) -> Vec<String> {
        self.project_re
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| p.len() > 3)
            .collect()
    }

    fn extract_companies(&self, text: &str) -> Vec<String> {
        self.company_re
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim_matches(&['.', ',', '\'', '-', '&', ' '][..]).to_string())
            .filter(|c| {
                c.len() > 2
                    && !COMPANY_STOP_WORDS
                        .iter()
                        .any(|stop| c.eq_ignore_ascii_case(stop))
            })
            .collect()
    }

    fn extract_keywords(lower: &str, keywords: &[&str]) -> Vec<String> {
        keywords
            .iter()
            .filter(|kw| lower.contains(*kw))
            .map(|kw| (*kw).to_string())
            .collect()
    }

    fn extract_timeframes(&self, text: &str) -> Vec<String> {
        self.timeframe_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract_key_details(text: &str) -> Vec<String> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| s.len() > 15)
            .take(3)
            .map(String::from)
            .collect()
    }
}

impl MentionExtractor for PatternMentionExtractor {
    fn extract(&self, text: &str) -> ExtractedMentions {
        let lower = text.to_lowercase();

        ExtractedMentions {
            technologies: self.extract_technologies(&lower),
            projects: self.extract_projects(text),
            companies: self.extract_companies(text),
            challenges: Self::extract_keywords(&lower, CHALLENGE_KEYWORDS),
            outcomes: Self::extract_keywords(&lower, OUTCOME_KEYWORDS),
            timeframes: self.extract_timeframes(text),
            key_details: Self::extract_key_details(text),
        }
    }
}
