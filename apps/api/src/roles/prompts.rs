// Role recommendation prompt templates.
// All prompts for the roles module are defined here.

pub const SUGGEST_ROLES_PROMPT: &str = r#"A candidate lists the following skills:

{skills}

Suggest the 3 job roles that best fit these skills, ordered from best to worst fit.
Score each role from 0 to 100 by how well the skills cover what the role needs.

OUTPUT SCHEMA (return exactly this structure):
[
  { "role": "string", "score": number }
]

RULES:
1. Use common industry job titles (e.g. "Backend Developer", "Data Analyst").
2. Return at most 3 roles.
3. Return ONLY the JSON array. Nothing else, no code fences."#;

pub const DESCRIBE_ROLE_PROMPT: &str = r#"Describe the job role "{role}" for someone planning their career.

OUTPUT SCHEMA (return exactly this structure):
{
  "description": "string, 2-4 sentences on what the role does day to day",
  "techStack": ["string"],
  "resumeKeywords": ["string"],
  "projectIdeas": [
    { "title": "string", "description": "string" }
  ],
  "roadmapLink": "string (https://roadmap.sh/... when one exists)" | null
}

RULES:
1. techStack: 5-10 tools, languages or platforms the role uses most.
2. resumeKeywords: 8-12 keywords recruiters search for.
3. projectIdeas: 3 portfolio projects that demonstrate the role's skills.
4. Use exactly the field names above.
5. Return ONLY the JSON object. Nothing else, no code fences."#;
