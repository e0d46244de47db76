// Candidate profile: raw form input, validated submission, and the rules between them.

pub mod models;
pub mod validation;
