//! Prompt construction for tag generation.

/// System context for the tag-generation model.
pub const TAG_SYSTEM_PROMPT: &str = "You are an AI assistant that generates concise and \
meaningful tags for articles based on their summary and URL.";

/// Build the user prompt asking for 2–3 broadly applicable subject tags.
///
/// Tags are steered toward academic subjects / university courses so they
/// cluster across a user's library instead of being one-off keywords.
pub fn tag_prompt(summary: &str, url: &str) -> String {
    format!(
        "Generate 2-3 tags that are broadly applicable across multiple articles based on \
the primary academic subject or university course the article would be relevant to.\n\n\
For example:\n\
- If the article discusses **nutrition**, it may align with a **Health & Wellness** course.\n\
- If it covers **protein synthesis**, it could be relevant to **Biochemistry** or **Molecular Biology**.\n\
- If it explores **AI in medicine**, it might fit under **Biomedical Engineering** or **Data Science**.\n\n\
**Summary:** {summary}\n\
**URL:** {url}\n\n\
Return a comma separated list of strings"
    )
}
