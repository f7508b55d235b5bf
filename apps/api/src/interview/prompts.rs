// All LLM prompt constants for the interview module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::interview::tracker::{FollowUpKind, Topic};

/// System prompt for follow-up generation. The model answers as the
/// interviewer: acknowledgment first, then exactly one question about
/// something specific the candidate said.
pub const FOLLOW_UP_SYSTEM: &str = "You are an experienced interviewer who ACTIVELY \
    LISTENS and follows up on what the candidate just shared. \
    Start with a short acknowledgment such as \"That's interesting!\" or \"I see!\". \
    Then ask exactly ONE follow-up question about something SPECIFIC they mentioned, \
    using their own words. \
    Never ask a generic question that ignores their answer. \
    Never ask more than one question. \
    Respond with only the acknowledged follow-up question, no preamble or labels.";

/// Follow-up prompt template.
/// Replace: {conversation_context}, {previous_answer}, {technologies},
///          {projects}, {companies}, {challenges}, {timeframes},
///          {key_details}, {style_instruction}, {suggested_acknowledgment}
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = r#"{conversation_context}
THE CANDIDATE JUST SAID: "{previous_answer}"

SPECIFIC THINGS THEY MENTIONED:
- Technologies: {technologies}
- Projects: {projects}
- Companies: {companies}
- Challenges: {challenges}
- Timeframes: {timeframes}
- Key details: {key_details}

STYLE FOR THIS FOLLOW-UP: {style_instruction}

A natural opener you may use: "{suggested_acknowledgment}"

Pick ONE specific thing they mentioned and ask for more detail about it.
Generate the acknowledgment plus that single follow-up question."#;

/// System prompt for topic-transition generation.
pub const TRANSITION_SYSTEM: &str = "You are an experienced interviewer transitioning \
    to a new topic while maintaining natural conversation flow. \
    Acknowledge what the candidate shared, create a smooth bridge to the new topic, \
    then ask one engaging question about the new area. \
    Respond with only the transition question, no preamble or labels.";

/// Transition prompt template.
/// Replace: {conversation_context}, {previous_answer}, {role},
///          {role_description}, {next_topic}, {topic_guidance},
///          {suggested_acknowledgment}
pub const TRANSITION_PROMPT_TEMPLATE: &str = r#"{conversation_context}
CANDIDATE'S LAST RESPONSE: "{previous_answer}"

TARGET ROLE: {role} ({role_description})
NEXT TOPIC TO EXPLORE: {next_topic}
TOPIC GUIDANCE: {topic_guidance}

A natural opener you may use: "{suggested_acknowledgment}"

Create a transition that briefly acknowledges their previous response, bridges
naturally, and asks one engaging question about the new topic."#;

/// Per-kind style line injected into the follow-up prompt. This is where the
/// depth-keyed follow-up classification actually shapes the wording.
pub fn follow_up_style(kind: FollowUpKind) -> &'static str {
    match kind {
        FollowUpKind::Clarification => {
            "Ask them to clarify or expand on what they meant, in concrete terms."
        }
        FollowUpKind::Example => "Ask for a concrete example of what they described.",
        FollowUpKind::Challenge => {
            "Dig into the challenge they hinted at: what made it hard and how they approached it."
        }
        FollowUpKind::Outcome => {
            "Ask about the result: what changed, what was delivered, how success was measured."
        }
        FollowUpKind::Technical => {
            "Dig into the technical specifics: implementation, design decisions, trade-offs."
        }
    }
}

/// Per-topic guidance line injected into the transition prompt.
pub fn topic_guidance(topic: Topic) -> &'static str {
    match topic {
        Topic::Introduction => "Ask them to introduce themselves and their background.",
        Topic::TechnicalExperience => {
            "Explore their technical skills and hands-on experience relevant to the role."
        }
        Topic::ProjectDeepDive => {
            "Deep dive into a specific project they worked on; encourage storytelling."
        }
        Topic::ProblemSolving => {
            "How they approach and solve complex problems; frame it as a story they can tell."
        }
        Topic::TeamCollaboration => {
            "Working with others: collaboration, communication, leadership."
        }
        Topic::WrapUp => {
            "Anything important about their background not yet discussed; final highlights."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_follow_up_kind_has_a_style_line() {
        for kind in [
            FollowUpKind::Clarification,
            FollowUpKind::Example,
            FollowUpKind::Challenge,
            FollowUpKind::Outcome,
            FollowUpKind::Technical,
        ] {
            assert!(!follow_up_style(kind).is_empty());
        }
    }

    #[test]
    fn test_templates_carry_expected_placeholders() {
        for placeholder in [
            "{conversation_context}",
            "{previous_answer}",
            "{technologies}",
            "{projects}",
            "{style_instruction}",
            "{suggested_acknowledgment}",
        ] {
            assert!(
                FOLLOW_UP_PROMPT_TEMPLATE.contains(placeholder),
                "missing {placeholder}"
            );
        }
        for placeholder in [
            "{next_topic}",
            "{topic_guidance}",
            "{previous_answer}",
            "{role}",
            "{role_description}",
        ] {
            assert!(
                TRANSITION_PROMPT_TEMPLATE.contains(placeholder),
                "missing {placeholder}"
            );
        }
    }
}
