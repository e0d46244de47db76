// Interview question generation.
// All LLM calls go through llm_client, never the Gemini endpoint directly.

pub mod prompts;
pub mod questions;
