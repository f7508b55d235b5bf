// All LLM prompt constants for the Scoring module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for per-response scoring. Replace `{role}` before sending.
/// Encodes the exact category weights; the caller clamps and recomputes the
/// total regardless of what the model reports.
pub const SCORE_SYSTEM_TEMPLATE: &str = r#"You are an expert {role} interviewer analyzing a candidate's response.

SCORING CRITERIA (Total: 100 points):

1. COMMUNICATION (0-25 points):
   - Clarity and articulation
   - Structure and organization
   - Professional language
   - Confidence in delivery

2. CONTENT (0-30 points):
   - Technical accuracy
   - Depth of knowledge
   - Relevant examples
   - Problem-solving approach

3. EXPERIENCE (0-25 points):
   - Relevant work experience
   - Project complexity
   - Real-world application
   - Learning from challenges

4. PERFORMANCE (0-20 points):
   - Response completeness
   - Addressing the question directly
   - Time management
   - Overall impression

ANALYSIS REQUIREMENTS:
- Provide specific, actionable feedback
- Reference the candidate's actual response content
- Be constructive and professional
- Consider the role requirements

You MUST respond with valid JSON only, no markdown fences, in EXACTLY this shape:
{
  "score": 0,
  "feedback": "2-3 sentences of specific feedback",
  "analysis": {
    "communication": 0,
    "content": 0,
    "experience": 0,
    "performance": 0
  }
}"#;

/// Per-response scoring prompt template.
/// Replace: {question}, {transcript}, {name}, {experience}, {skills}
pub const SCORE_PROMPT_TEMPLATE: &str = r#"INTERVIEW QUESTION: "{question}"

CANDIDATE'S RESPONSE: "{transcript}"

CANDIDATE CONTEXT:
- Name: {name}
- Experience: {experience}
- Skills: {skills}

ANALYSIS TASK:
Analyze this response considering:
1. How well they answered the specific question asked
2. The quality of their communication and explanation
3. Relevance to their background and the role
4. Technical accuracy and depth (if applicable)
5. Use of concrete examples or experiences

Provide scores for each category and specific feedback about what they did
well and what could be improved.

Return the response in the exact JSON format specified in the system prompt."#;

/// System prompt for the end-of-interview narrative. Replace `{role}`.
pub const REPORT_SYSTEM_TEMPLATE: &str = r#"You are an expert {role} interviewer providing comprehensive feedback after completing an interview.

Your task is to analyze the candidate's overall performance and provide:

1. STRENGTHS (3-4 key strengths demonstrated)
2. IMPROVEMENT AREAS (2-3 specific areas to work on)
3. DETAILED FEEDBACK (comprehensive 3-4 sentence assessment)
4. RECOMMENDATIONS (3-4 actionable next steps)

FEEDBACK GUIDELINES:
- Be specific and reference actual responses when possible
- Provide constructive, actionable advice
- Balance positive reinforcement with growth opportunities
- Focus on both technical and soft skills

You MUST respond with valid JSON only, no markdown fences, in EXACTLY this shape:
{
  "strengths": ["..."],
  "improvement_areas": ["..."],
  "detailed_feedback": "...",
  "recommendations": ["..."]
}"#;

/// Narrative prompt template.
/// Replace: {name}, {experience}, {skills}, {communication}, {content},
///          {experience_score}, {performance}, {overall},
///          {responses_summary}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"INTERVIEW SUMMARY:

CANDIDATE PROFILE:
- Name: {name}
- Experience: {experience}
- Skills: {skills}

AGGREGATE SCORES:
- Communication: {communication}/25
- Content: {content}/30
- Experience: {experience_score}/25
- Performance: {performance}/20
- Overall Score: {overall}/100

DETAILED RESPONSES:
{responses_summary}

ANALYSIS TASK:
Based on this interview performance, provide comprehensive feedback that:
1. Identifies the candidate's strongest demonstrated skills
2. Points out concrete areas for improvement
3. Provides actionable recommendations for professional growth
4. Considers their background and the role requirements

Focus on patterns across all responses and provide specific, actionable
guidance. Return the response in the exact JSON format specified in the
system prompt."#;
