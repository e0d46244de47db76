// Submission flow: validate → store in session → generate questions → acknowledge.
// Served both as the HTML form page and as a JSON API.

pub mod handlers;
pub mod pipeline;
pub mod views;
