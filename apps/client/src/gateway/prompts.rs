// Gateway prompt templates.
// All prompts for the generative-AI gateway are defined here.

pub const RECOMMEND_SYSTEM: &str = "\
You are a career advisor. You MUST respond with valid JSON only — \
no markdown fences, no explanations.";

pub const RECOMMEND_PROMPT: &str = r#"Based on these skills: {skills}.
Suggest 4 distinct career paths.
For each career, estimate a match percentage based on the provided skills vs required skills.
Return only the market salary range for [Role] in India strictly in the format: ₹XXL - ₹XXL PA
Ensure the 'description' is a single, concise, punchy sentence.

OUTPUT SCHEMA (return exactly this structure):
{
  "careers": [
    {
      "id": "snake_case_identifier_001",
      "title": "string",
      "description": "string",
      "matchPercentage": number,
      "requiredSkills": ["string"],
      "salaryRange": "string"
    }
  ]
}"#;

pub const SEARCH_BY_ROLE_PROMPT: &str = r#"A user wants to become: "{role}".
Suggest up to 4 career paths matching or closely related to that role.
Return only the market salary range for [Role] in India strictly in the format: ₹XXL - ₹XXL PA
Ensure the 'description' is a single, concise, punchy sentence.

OUTPUT SCHEMA (return exactly this structure):
{
  "careers": [
    {
      "id": "snake_case_identifier_001",
      "title": "string",
      "description": "string",
      "requiredSkills": ["string"],
      "salaryRange": "string"
    }
  ]
}"#;

pub const DETAILED_PLAN_PROMPT: &str = r#"Analyze the career path: "{career_title}" for a user with these existing skills: {user_skills}.

1. Provide 3 short, distinct, and punchy bullet points (max 15 words each) describing the key daily activities and reality of this role. Focus on action.
2. Return only the market salary range for [Role] in India strictly in the format: ₹XXL - ₹XXL PA
3. Identify critical missing skills.
4. Create a learning roadmap specifically designed as a "bridge" to teach the *missing* skills required for this role. Do not include basic steps for skills the user already possesses.
5. Provide learning resources specifically for these missing skills.

OUTPUT SCHEMA (return exactly this structure):
{
  "roleOverview": ["string"],
  "salaryRange": "string",
  "roadmap": [
    {"title": "string", "description": "string", "duration": "string"}
  ],
  "resources": [
    {"title": "string", "url": "string", "type": "Video" | "Article" | "Course", "duration": "string"}
  ]
}"#;

pub const EXTRACT_SKILLS_PROMPT: &str = r#"Analyze this resume/document. Extract a list of professional skills found.

DOCUMENT TEXT:
{document_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "skills": ["string"]
}"#;

pub const COACH_SYSTEM: &str = "\
You are a helpful, professional, and encouraging career coach. \
Keep answers concise (under 150 words) unless asked for details. \
Use markdown for lists.";
