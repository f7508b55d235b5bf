use serde::{Deserialize, Serialize};

/// Structured resume produced by the LLM parsing pass over an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    /// Original resume text, retained for downstream prompts and feedback.
    #[serde(default)]
    pub raw_text: String,
    /// Resume-quality feedback, produced alongside parsing.
    #[serde(default)]
    pub feedback: Option<ResumeFeedback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeFeedback {
    /// 0-100 resume quality score.
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub formatting: String,
    pub content_quality: String,
}

/// Compact resume summary embedded in scoring and report prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeContext {
    pub name: String,
    pub experience: String,
    pub skills: Vec<String>,
}

impl From<&ParsedResume> for ResumeContext {
    fn from(resume: &ParsedResume) -> Self {
        ResumeContext {
            name: resume.personal_info.name.clone(),
            experience: resume
                .experience
                .iter()
                .map(|exp| format!("{} at {}", exp.role, exp.company))
                .collect::<Vec<_>>()
                .join(", "),
            skills: resume.skills.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resume() -> ParsedResume {
        ParsedResume {
            personal_info: PersonalInfo {
                name: "Jordan Lee".to_string(),
                email: Some("jordan@example.com".to_string()),
                phone: None,
            },
            experience: vec![
                ExperienceEntry {
                    company: "Acme Corp".to_string(),
                    role: "Frontend Engineer".to_string(),
                    duration: "2 years".to_string(),
                    responsibilities: vec!["Built dashboards".to_string()],
                },
                ExperienceEntry {
                    company: "Initech".to_string(),
                    role: "Intern".to_string(),
                    duration: "6 months".to_string(),
                    responsibilities: vec![],
                },
            ],
            skills: vec!["React".to_string(), "Node.js".to_string()],
            education: vec![],
            raw_text: "raw".to_string(),
            feedback: None,
        }
    }

    #[test]
    fn test_resume_context_joins_experience() {
        let ctx = ResumeContext::from(&sample_resume());
        assert_eq!(ctx.name, "Jordan Lee");
        assert_eq!(
            ctx.experience,
            "Frontend Engineer at Acme Corp, Intern at Initech"
        );
        assert_eq!(ctx.skills, vec!["React", "Node.js"]);
    }

    #[test]
    fn test_parsed_resume_deserializes_without_optional_fields() {
        let json = r#"{
            "personal_info": {"name": "Sam"},
            "experience": [],
            "skills": ["Python"],
            "education": []
        }"#;
        let resume: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.name, "Sam");
        assert!(resume.raw_text.is_empty());
        assert!(resume.feedback.is_none());
    }

    #[test]
    fn test_resume_feedback_round_trips() {
        let feedback = ResumeFeedback {
            score: 85,
            strengths: vec!["Clear work history".to_string()],
            improvements: vec!["Quantify achievements".to_string()],
            formatting: "Well structured".to_string(),
            content_quality: "Good depth".to_string(),
        };
        let json = serde_json::to_string(&feedback).unwrap();
        let recovered: ResumeFeedback = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.score, 85);
        assert_eq!(recovered.strengths.len(), 1);
    }
}
