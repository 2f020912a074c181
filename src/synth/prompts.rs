//! Prompt templates for the four assisted sections.
//!
//! Each builder takes the rendered context verbatim. Shapes requested here
//! must stay in sync with the validators in `extract`.

/// Common instruction appended to every prompt.
pub const GROUNDING_INSTRUCTION: &str = "Use only facts present in the project context above. \
    Do not invent employers, metrics, dates, or technologies. \
    If the context does not support a claim, leave it out.";

pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do not wrap it in markdown code fences and do not add commentary.";

pub fn summary_prompt(context: &str) -> String {
    format!(
        "Project context:\n{context}\n\
         Write a professional resume summary (2-3 sentences, no first-person pronouns, no heading) \
         for the developer who built this project. Plain text only.\n\n{GROUNDING_INSTRUCTION}"
    )
}

pub fn skills_prompt(context: &str) -> String {
    format!(
        "Project context:\n{context}\n\
         Categorize the technical skills demonstrated by this project as a JSON object with \
         exactly these keys, each an array of strings:\n\
         {{\"technical\": [...], \"frameworks\": [...], \"tools\": [...], \"databases\": [...]}}\n\n\
         {JSON_ONLY_INSTRUCTION}\n{GROUNDING_INSTRUCTION}"
    )
}

pub fn experience_prompt(context: &str) -> String {
    format!(
        "Project context:\n{context}\n\
         Describe the developer's work on this project as a JSON array of experience entries:\n\
         [{{\"project_name\": \"...\", \"description\": \"one sentence\", \
         \"achievements\": [\"3-5 bullet points starting with an action verb\"], \
         \"technologies\": [\"...\"], \"duration\": \"...\"}}]\n\n\
         {JSON_ONLY_INSTRUCTION}\n{GROUNDING_INSTRUCTION}"
    )
}

pub fn projects_prompt(context: &str) -> String {
    format!(
        "Project context:\n{context}\n\
         Describe this project for the projects section of a resume as a JSON array:\n\
         [{{\"name\": \"...\", \"description\": \"one or two sentences\", \
         \"technologies\": [\"...\"], \"highlights\": [\"3-4 short highlights\"], \
         \"link\": \"repository URL or null\"}}]\n\n\
         {JSON_ONLY_INSTRUCTION}\n{GROUNDING_INSTRUCTION}"
    )
}
