//! Askama page model for the single-page form.

use askama::Template;

use crate::assistant::pipeline::AssistantReport;
use crate::candidate::models::{CandidateForm, Language};
use crate::candidate::validation::{MAX_YEARS, MIN_YEARS};
use crate::interview::questions::QuestionsOutcome;
use crate::translation::AcknowledgementOutcome;

pub const THANK_YOU: &str = "Thank you for providing your information!";
pub const QUESTIONS_HEADER: &str = "Based on your tech stack, here are some technical questions:";
pub const NO_QUESTIONS: &str =
    "Could not generate questions. Please make sure your tech stack is clearly specified.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub languages: Vec<LanguageOption>,
    pub form: CandidateForm,
    pub min_years: i64,
    pub max_years: i64,
    pub error: Option<String>,
    pub report: Option<ReportView>,
}

pub struct LanguageOption {
    pub name: &'static str,
    pub selected: bool,
}

/// Flattened `AssistantReport`, one optional line per message the page can show.
pub struct ReportView {
    pub thank_you: &'static str,
    pub questions_header: Option<&'static str>,
    pub questions: Vec<String>,
    pub questions_notice: Option<String>,
    pub acknowledgement: Option<String>,
    pub acknowledgement_error: Option<String>,
}

impl IndexPage {
    pub fn new(form: CandidateForm) -> Self {
        let selected = form.language.parse::<Language>().unwrap_or_default();
        Self {
            languages: Language::ALL
                .into_iter()
                .map(|l| LanguageOption {
                    name: l.name(),
                    selected: l == selected,
                })
                .collect(),
            form,
            min_years: MIN_YEARS,
            max_years: MAX_YEARS,
            error: None,
            report: None,
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_report(mut self, report: &AssistantReport) -> Self {
        self.report = Some(ReportView::from(report));
        self
    }
}

impl From<&AssistantReport> for ReportView {
    fn from(report: &AssistantReport) -> Self {
        let (questions_header, questions, questions_notice) = match &report.questions {
            QuestionsOutcome::Generated { questions } => {
                (Some(QUESTIONS_HEADER), questions.clone(), None)
            }
            QuestionsOutcome::Empty => (None, Vec::new(), Some(NO_QUESTIONS.to_string())),
            QuestionsOutcome::Failed { error } => {
                (None, Vec::new(), Some(format!("An error occurred: {error}")))
            }
        };

        let (acknowledgement, acknowledgement_error) = match &report.acknowledgement {
            AcknowledgementOutcome::Original { text } => (Some(text.clone()), None),
            AcknowledgementOutcome::Translated { text, .. } => {
                (Some(format!("Translated message: {text}")), None)
            }
            AcknowledgementOutcome::Failed { error } => {
                (None, Some(format!("Error in translation: {error}")))
            }
        };

        ReportView {
            thank_you: THANK_YOU,
            questions_header,
            questions,
            questions_notice,
            acknowledgement,
            acknowledgement_error,
        }
    }
}
