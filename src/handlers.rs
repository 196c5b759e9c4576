use crate::archive::{group_by_day, paginate};
use crate::render;
use crate::slug::find_by_slug;
use crate::state::AppState;
use crate::summarize::{prepare_input, run_summary, SummarizeRequest, SummarizeResponse};
use crate::types::ArchiveError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn archive_root(State(state): State<AppState>) -> Response {
    archive(&state, 1).await
}

pub async fn archive_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Response {
    match page.parse::<usize>() {
        Ok(page) => archive(&state, page).await,
        Err(_) => not_found(),
    }
}

async fn archive(state: &AppState, page: usize) -> Response {
    let issues = match state.issues().await {
        Ok(issues) => issues,
        Err(e) => return feed_error(&e),
    };

    match paginate(&issues, page, state.config.page_size) {
        Ok(archive_page) => {
            let groups = group_by_day(&archive_page.issues);
            Html(render::archive_page(&archive_page, &groups)).into_response()
        }
        Err(ArchiveError::NotFound) => not_found(),
        Err(e) => feed_error(&e),
    }
}

pub async fn issue_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let issues = match state.issues().await {
        Ok(issues) => issues,
        Err(e) => return feed_error(&e),
    };

    match find_by_slug(&issues, &slug) {
        Some(issue) => Html(render::issue_page(issue)).into_response(),
        None => not_found(),
    }
}

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(_) => return error_json(StatusCode::BAD_REQUEST, "Invalid JSON body."),
    };

    let input = match prepare_input(request, state.config.summary.max_content_chars) {
        Ok(input) => input,
        Err(e) => return error_json(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match run_summary(
        state.summarizer.as_ref(),
        &input,
        state.config.summary.timeout,
    )
    .await
    {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(e) => summary_error(e),
    }
}

fn summary_error(error: ArchiveError) -> Response {
    match error {
        ArchiveError::SummaryTimeout => {
            warn!("Summarization timed out");
            error_json(StatusCode::GATEWAY_TIMEOUT, &error.to_string())
        }
        ArchiveError::EmptySummary => {
            error_json(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
        }
        ArchiveError::SummaryUpstream { status, message } => {
            let status = status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error!("Summarization upstream failure ({}): {}", status, message);
            error_json(status, &message)
        }
        other => error_json(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page())).into_response()
}

fn feed_error(error: &ArchiveError) -> Response {
    error!("Feed pipeline failure: {}", error);
    (
        StatusCode::BAD_GATEWAY,
        Html(render::feed_error_page(&error.to_string())),
    )
        .into_response()
}
