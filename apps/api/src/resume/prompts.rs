// All LLM prompt constants for the Resume module.
// The JSON-only contract comes from llm_client::prompts::JSON_ONLY_SYSTEM.

/// Parsing instructions appended to the JSON-only system fragment.
/// The resume text itself is sent as the user message.
pub const RESUME_PARSE_INSTRUCTIONS: &str = r#"You are an expert resume parser. Extract and structure the following information from the resume the user sends:
- Personal information (name, email, phone)
- Work experience (company, role, duration, responsibilities)
- Skills (technical and soft skills)
- Education (institution, degree, year)

Also analyze the resume quality and provide feedback.

Return a JSON object matching this exact structure:
{
  "personal_info": { "name": "", "email": "", "phone": "" },
  "experience": [{ "company": "", "role": "", "duration": "", "responsibilities": [] }],
  "skills": [],
  "education": [{ "institution": "", "degree": "", "year": "" }],
  "feedback": {
    "score": 0,
    "strengths": [],
    "improvements": [],
    "formatting": "",
    "content_quality": ""
  }
}

For the feedback:
- score: Rate the resume quality 0-100
- strengths: List 2-3 strong points
- improvements: List 2-3 areas to improve
- formatting: Comment on structure and readability
- content_quality: Assess the depth and relevance of content

Do NOT include the raw resume text in the output."#;
