// All LLM prompt constants for the Customizer module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role line for job analysis.
pub const ANALYSIS_ROLE: &str = "You are an expert resume optimizer. \
    Extract key information from job descriptions to help tailor resumes effectively.";

/// Job analysis prompt template. Replace `{jd_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract key information for resume optimization.

Return a JSON object with this EXACT schema:
{
  "required_skills": ["skill1", "skill2"],
  "preferred_skills": ["skill1", "skill2"],
  "key_responsibilities": ["resp1", "resp2"],
  "company_values": ["value1", "value2"],
  "experience_level": "entry | mid | senior | executive",
  "industry_keywords": ["keyword1", "keyword2"],
  "role_focus": "technical | leadership | management | individual_contributor"
}

JOB DESCRIPTION:
{jd_text}"#;

/// Role line for rewriting one work entry.
pub const WORK_ROLE: &str = "You are a professional resume writer. \
    Optimize work experiences to match job requirements while keeping them truthful.";

/// Work entry prompt template.
/// Replace: {truthfulness_instruction}, {role}, {company}, {period}, {details},
///          {required_skills}, {key_responsibilities}, {role_focus}
pub const WORK_PROMPT_TEMPLATE: &str = r#"{truthfulness_instruction}

Rewrite the bullet points of this work experience to better align with the target job requirements.

Role: {role}
Company: {company}
Period: {period}
Current bullet points:
{details}

Target job requirements:
- Required skills: {required_skills}
- Key responsibilities: {key_responsibilities}
- Role focus: {role_focus}

Return a JSON object:
{
  "details": ["rewritten bullet 1", "rewritten bullet 2"],
  "suggested_tags": ["short-lowercase-tag"]
}

Return between 2 and 5 bullets. Tags are short lowercase words describing the work (e.g. "backend", "ml")."#;

/// Role line for the profile summary.
pub const SUMMARY_ROLE: &str =
    "You are a professional resume writer specializing in compelling summary statements.";

/// Summary prompt template.
/// Replace: {truthfulness_instruction}, {current_summary}, {required_skills},
///          {role_focus}, {experience_level}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"{truthfulness_instruction}

Customize this professional summary to align with the target job.

Current summary: {current_summary}

Target job focus:
- Required skills: {required_skills}
- Role focus: {role_focus}
- Experience level: {experience_level}

Write a 2-3 sentence professional summary that emphasizes relevant skills and experience.
Return a JSON object:
{
  "summary": "the new summary"
}"#;

/// Role line for skill suggestions.
pub const SKILLS_ROLE: &str = "You are a resume optimization expert. \
    Analyze skills and suggest improvements for job targeting.";

/// Skills prompt template.
/// Replace: {skills_json}, {required_skills}, {preferred_skills}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Analyze these current skills and suggest optimizations for the target job.

Current skills:
{skills_json}

Target job requirements:
- Required skills: {required_skills}
- Preferred skills: {preferred_skills}

Return a JSON object:
{
  "skills_to_emphasize": ["skill1", "skill2"],
  "missing_relevant_skills": ["skill1", "skill2"],
  "recommended_categories": [
    {
      "name": "category name",
      "items": ["skill1", "skill2"]
    }
  ]
}

Recommended categories may ONLY contain skills from the current skills list."#;
