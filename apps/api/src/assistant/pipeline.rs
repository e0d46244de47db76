//! Runs the two outbound steps for a validated submission.
//!
//! Flow: generate_questions → acknowledge. Strictly sequential; a failure in
//! one step is recorded in its outcome and never stops the other.

use serde::Serialize;
use tracing::info;

use crate::candidate::models::CandidateSubmission;
use crate::interview::questions::{generate_questions, QuestionsOutcome};
use crate::llm_client::QuestionGenerator;
use crate::translation::{acknowledge, AcknowledgementOutcome, Translator};

/// Everything shown to the candidate after a valid submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReport {
    pub candidate_name: String,
    pub questions: QuestionsOutcome,
    pub acknowledgement: AcknowledgementOutcome,
}

pub async fn run(
    generator: &dyn QuestionGenerator,
    translator: &dyn Translator,
    submission: &CandidateSubmission,
) -> AssistantReport {
    info!(
        "Running assistant for submission (language={}, years={})",
        submission.language, submission.years_of_experience
    );

    let questions = generate_questions(generator, &submission.tech_stack).await;
    let acknowledgement = acknowledge(translator, submission.language).await;

    AssistantReport {
        candidate_name: submission.name.clone(),
        questions,
        acknowledgement,
    }
}
