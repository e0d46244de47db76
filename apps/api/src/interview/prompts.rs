// Prompt templates for interview question generation.

/// Question generation prompt. Replace `{tech_stack}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = "Generate 3-5 concise technical interview questions \
    for assessing proficiency in: {tech_stack}. No explanations, just the questions.";

/// Builds the generation prompt for a candidate's declared stack.
pub fn build_question_prompt(tech_stack: &str) -> String {
    QUESTION_PROMPT_TEMPLATE.replace("{tech_stack}", tech_stack)
}
