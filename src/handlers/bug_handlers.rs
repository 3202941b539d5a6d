//! HTTP handlers for listing, registering and viewing bugs.
//! Each handler reads or writes through `BugStore` and renders a page
//! through `TemplateService`.

use crate::{
    errors::AppError,
    forms::bug_form::{BugForm, BugFormContext},
    state::AppState,
};
use axum::{
    Form,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

/// `GET /` — every bug, oldest first.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let bugs = state.store.all().await?;
    Ok(Html(state.templates.render_index(&bugs)?))
}

/// `GET /register_bug/` — an empty form.
pub async fn register_bug_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state.templates.render_register(&BugFormContext::empty())?;
    Ok(Html(html))
}

/// `POST /register_bug/`
///
/// Stores the bug and redirects to the list on success. Invalid input is
/// not a failure of the request: the form comes back with the submitted
/// values and a message under each offending field.
pub async fn register_bug_submit(
    State(state): State<AppState>,
    Form(form): Form<BugForm>,
) -> Result<Response, AppError> {
    match form.validate() {
        Ok(new_bug) => {
            let bug = state.store.create(&new_bug).await?;
            tracing::info!(bug_id = bug.id, "registered bug");
            Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
        }
        Err(errors) => {
            let fields: Vec<_> = errors.fields().collect();
            tracing::debug!(?fields, "rejected bug form");
            let html = state
                .templates
                .render_register(&BugFormContext::bound(form, errors))?;
            Ok(Html(html).into_response())
        }
    }
}

/// `GET /bug/{id}/`
///
/// A segment that is not an integer never names a bug, so it is a 404 like
/// an unknown id.
pub async fn view_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found(format!("bug {} not found", id)))?;
    let bug = state.store.get(id).await?;
    Ok(Html(state.templates.render_detail(&bug)?))
}
