use thiserror::Error;

use crate::candidate::models::{CandidateForm, CandidateSubmission, Language};

pub const MIN_YEARS: i64 = 0;
pub const MAX_YEARS: i64 = 50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequired(Vec<&'static str>),

    #[error("Years of experience must be a whole number between 0 and 50 (got '{0}').")]
    YearsOutOfRange(String),

    #[error("Unsupported language '{0}'. Choose English, Spanish, French, German or Italian.")]
    UnknownLanguage(String),
}

impl ValidationError {
    /// Field names missing from the submission, if that is the failure.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingRequired(fields) => fields,
            _ => &[],
        }
    }
}

/// Checks the raw form and builds an immutable submission.
///
/// Required: name, email, phone, tech_stack (non-empty after trimming).
/// Missing fields are reported before any other problem.
pub fn validate(form: &CandidateForm) -> Result<CandidateSubmission, ValidationError> {
    let required = [
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("tech_stack", &form.tech_stack),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequired(missing));
    }

    let years_of_experience = parse_years(&form.years_of_experience)?;

    let language = if form.language.trim().is_empty() {
        Language::default()
    } else {
        form.language
            .parse::<Language>()
            .map_err(ValidationError::UnknownLanguage)?
    };

    Ok(CandidateSubmission {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        years_of_experience,
        desired_position: form.desired_position.trim().to_string(),
        location: form.location.trim().to_string(),
        tech_stack: form.tech_stack.trim().to_string(),
        language,
    })
}

/// Empty means the input's default of 0.
fn parse_years(raw: &str) -> Result<u8, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i64>()
        .ok()
        .filter(|years| (MIN_YEARS..=MAX_YEARS).contains(years))
        .and_then(|years| u8::try_from(years).ok())
        .ok_or_else(|| ValidationError::YearsOutOfRange(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CandidateForm {
        CandidateForm {
            language: "English".to_string(),
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            years_of_experience: "12".to_string(),
            desired_position: "Backend Engineer".to_string(),
            location: "London".to_string(),
            tech_stack: "Python, SQL".to_string(),
        }
    }

    #[test]
    fn test_complete_form_is_accepted_and_trimmed() {
        let submission = validate(&complete_form()).unwrap();
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.years_of_experience, 12);
        assert_eq!(submission.language, Language::English);
        assert_eq!(submission.tech_stack, "Python, SQL");
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let blankers: [(&str, fn(&mut CandidateForm)); 4] = [
            ("name", |f| f.name.clear()),
            ("email", |f| f.email = "   ".to_string()),
            ("phone", |f| f.phone.clear()),
            ("tech_stack", |f| f.tech_stack = "\n".to_string()),
        ];
        for (field, blank) in blankers {
            let mut form = complete_form();
            blank(&mut form);
            let err = validate(&form).unwrap_err();
            assert_eq!(err.missing_fields(), &[field]);
            assert_eq!(err.to_string(), "Please fill in all required fields.");
        }
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut form = complete_form();
        form.desired_position.clear();
        form.location.clear();
        form.years_of_experience.clear();
        form.language.clear();
        let submission = validate(&form).unwrap();
        assert_eq!(submission.years_of_experience, 0);
        assert_eq!(submission.language, Language::English);
    }

    #[test]
    fn test_years_bounds() {
        for ok in ["0", "50", " 7 "] {
            let mut form = complete_form();
            form.years_of_experience = ok.to_string();
            assert!(validate(&form).is_ok(), "{ok} should be accepted");
        }
        for bad in ["-1", "51", "3.5", "ten", "300"] {
            let mut form = complete_form();
            form.years_of_experience = bad.to_string();
            assert!(
                matches!(validate(&form), Err(ValidationError::YearsOutOfRange(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let mut form = complete_form();
        form.language = "Klingon".to_string();
        assert_eq!(
            validate(&form),
            Err(ValidationError::UnknownLanguage("Klingon".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_reported_before_bad_years() {
        let mut form = complete_form();
        form.name.clear();
        form.years_of_experience = "99".to_string();
        assert!(matches!(
            validate(&form),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
