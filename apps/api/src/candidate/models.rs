use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Languages the acknowledgement can be delivered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
        }
    }

    /// ISO 639-1 code sent to the translation service.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts the display name (any case) or the ISO code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(needle) || l.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| needle.to_string())
    }
}

/// Raw values exactly as posted by the form or the JSON API.
///
/// Everything is text so that invalid input can be echoed back into the form.
/// A JSON `null` reads as empty, so validation reports it like a blank field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateForm {
    #[serde(deserialize_with = "deserialize_nullable")]
    pub language: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub phone: String,
    #[serde(deserialize_with = "deserialize_years")]
    pub years_of_experience: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub desired_position: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub location: String,
    #[serde(deserialize_with = "deserialize_nullable")]
    pub tech_stack: String,
}

fn deserialize_nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// JSON clients send a number or null, the HTML form sends text.
fn deserialize_years<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYears {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<RawYears>::deserialize(deserializer)? {
        Some(RawYears::Int(n)) => n.to_string(),
        Some(RawYears::Float(f)) => f.to_string(),
        Some(RawYears::Text(s)) => s,
        None => String::new(),
    })
}

/// A validated candidate profile. Immutable once built; lives only as long as
/// the session that submitted it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: u8,
    pub desired_position: String,
    pub location: String,
    pub tech_stack: String,
    pub language: Language,
}

impl From<&CandidateSubmission> for CandidateForm {
    fn from(s: &CandidateSubmission) -> Self {
        CandidateForm {
            language: s.language.name().to_string(),
            name: s.name.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            years_of_experience: s.years_of_experience.to_string(),
            desired_position: s.desired_position.clone(),
            location: s.location.clone(),
            tech_stack: s.tech_stack.clone(),
        }
    }
}
