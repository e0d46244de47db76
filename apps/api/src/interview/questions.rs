//! Turns the model's free-text reply into a numbered question list.
//!
//! The model is asked for one question per line but does not always comply:
//! it may number the lines itself, use bullets, or leave blank lines between
//! questions. The reply is re-parsed rather than trusted.

use serde::Serialize;
use tracing::{info, warn};

use crate::interview::prompts::build_question_prompt;
use crate::llm_client::QuestionGenerator;

/// Result of the generation step as shown to the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionsOutcome {
    Generated { questions: Vec<String> },
    /// The service answered but nothing usable came back.
    Empty,
    Failed { error: String },
}

/// Calls the generator exactly once for the candidate's stack.
pub async fn generate_questions(
    generator: &dyn QuestionGenerator,
    tech_stack: &str,
) -> QuestionsOutcome {
    let prompt = build_question_prompt(tech_stack);

    match generator.generate(&prompt).await {
        Ok(text) => {
            let questions = parse_questions(&text);
            if questions.is_empty() {
                warn!("Generation reply contained no usable lines");
                QuestionsOutcome::Empty
            } else {
                info!("Generated {} interview questions", questions.len());
                QuestionsOutcome::Generated { questions }
            }
        }
        Err(e) => {
            warn!("Question generation failed: {e}");
            QuestionsOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// One question per non-blank line, with any leading list marker and
/// surrounding markdown emphasis removed.
pub fn parse_questions(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(|line| {
            let line = strip_emphasis(line);
            strip_emphasis(strip_list_marker(line))
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims whitespace and runs of `*` on both ends: `**1. Q?**` → `1. Q?`.
fn strip_emphasis(line: &str) -> &str {
    line.trim().trim_matches('*').trim()
}

/// Strips `1.`, `1)`, `-`, `*` or `•` from the start of a line.
fn strip_list_marker(line: &str) -> &str {
    for bullet in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest;
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            // "3.5 GHz ..." is content, not a marker.
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                return after;
            }
        }
    }
    line
}
