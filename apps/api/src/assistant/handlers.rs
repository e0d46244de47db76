//! Axum route handlers for the form page and the JSON submission API.

use anyhow::Context;
use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::info;

use crate::assistant::pipeline;
use crate::assistant::views::IndexPage;
use crate::candidate::models::{CandidateForm, CandidateSubmission};
use crate::candidate::validation::validate;
use crate::errors::AppError;
use crate::session::{
    expired_session_cookie, session_cookie, session_id_from_headers, SessionHandle,
};
use crate::state::AppState;

/// GET /
///
/// Renders the form, pre-filled with this session's last submission if any.
pub async fn handle_index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers).await;
    let form = state
        .sessions
        .candidate(session.id)
        .await
        .map(|c| CandidateForm::from(&c))
        .unwrap_or_default();

    let html = IndexPage::new(form).render()?;
    with_session_cookie(Html(html).into_response(), session)
}

/// POST /submit
///
/// Invalid input re-renders the form with the message and makes no outbound
/// calls. Valid input is stored in the session, then questions and the
/// acknowledgement are rendered below the form.
pub async fn handle_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CandidateForm>,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers).await;

    let submission = match validate(&form) {
        Ok(submission) => submission,
        Err(e) => {
            info!("Rejected form submission: {e}");
            let html = IndexPage::new(form).with_error(e.to_string()).render()?;
            return with_session_cookie(
                (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response(),
                session,
            );
        }
    };

    state
        .sessions
        .store_candidate(session.id, submission.clone())
        .await;

    let report = pipeline::run(
        state.generator.as_ref(),
        state.translator.as_ref(),
        &submission,
    )
    .await;

    let html = IndexPage::new(CandidateForm::from(&submission))
        .with_report(&report)
        .render()?;
    with_session_cookie(Html(html).into_response(), session)
}

/// POST /api/v1/submissions
///
/// JSON twin of the form flow. Returns the full `AssistantReport`.
pub async fn handle_create_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<CandidateForm>,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers).await;
    let submission = validate(&form)?;

    state
        .sessions
        .store_candidate(session.id, submission.clone())
        .await;

    let report = pipeline::run(
        state.generator.as_ref(),
        state.translator.as_ref(),
        &submission,
    )
    .await;

    with_session_cookie(Json(report).into_response(), session)
}

/// GET /api/v1/session
pub async fn handle_get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CandidateSubmission>, AppError> {
    let id = session_id_from_headers(&headers)
        .ok_or_else(|| AppError::NotFound("No active session".to_string()))?;

    state
        .sessions
        .candidate(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No submission in this session".to_string()))
}

/// DELETE /api/v1/session
///
/// Ends the session and discards the stored submission.
pub async fn handle_end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(id) = session_id_from_headers(&headers) {
        if state.sessions.end(id).await {
            info!("Session {id} ended by client");
        }
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&expired_session_cookie()).context("Invalid session cookie")?,
    );
    Ok(response)
}

fn with_session_cookie(mut response: Response, session: SessionHandle) -> Result<Response, AppError> {
    if session.is_new {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&session_cookie(session.id)).context("Invalid session cookie")?,
        );
    }
    Ok(response)
}
