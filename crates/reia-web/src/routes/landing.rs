//! Landing page and submission flow.
//!
//! The submission state machine: idle → loading → navigated-away on success,
//! back to idle on failure. An empty link never leaves idle, and the
//! single-flight gate stands in for the disabled controls while a request is
//! out. Whatever happens, the typed link is preserved so the user can edit
//! and retry.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

use reia_core::error::validate_link;

use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    link: String,
    warning: String,
    error: String,
}

#[derive(Deserialize)]
pub struct AnalyzeForm {
    pub link: String,
}

/// GET / - the listing input form.
pub async fn index() -> Response {
    render_index("", "", "")
}

/// POST /analyze - submit a listing for analysis.
pub async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Response {
    if validate_link(&form.link).is_err() {
        return render_index(
            &form.link,
            "Please enter a listing URL before analyzing.",
            "",
        );
    }

    let Some(_guard) = state.try_begin_analysis() else {
        return render_index(
            &form.link,
            "An analysis is already running. Wait for it to finish before submitting another.",
            "",
        );
    };

    // The link goes out exactly as typed; trimming was validation-only.
    match state.client.analyze(&form.link).await {
        Ok(body) => {
            state.snapshots.store(body);
            info!("Analysis complete, snapshot stored");
            Redirect::to("/report").into_response()
        }
        Err(err) => {
            error!(error = %err, "Analysis request failed");
            render_index(&form.link, "", &format!("Analysis failed: {}", err))
        }
    }
}

fn render_index(link: &str, warning: &str, error: &str) -> Response {
    let template = IndexTemplate {
        link: link.to_string(),
        warning: warning.to_string(),
        error: error.to_string(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}
