use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::handlers::{forms::SeedForm, AppState};
use crate::models::STATUS_AVAILABLE;
use crate::views;

/// Every successful mutation lands on the report page.
fn redirect_to_report() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/report")]).into_response()
}

/// Turns a validation failure into the form page again, answered with 400.
/// Any other error is passed through unchanged.
fn rerender_on_invalid(
    err: ServiceError,
    render: impl FnOnce(&str) -> Html<String>,
) -> Result<Response, ServiceError> {
    match err {
        ServiceError::ValidationError(msg) => {
            debug!(reason = %msg, "Rejected seed form");
            Ok((StatusCode::BAD_REQUEST, render(&msg)).into_response())
        }
        other => Err(other),
    }
}

/// GET /
pub async fn home() -> Html<String> {
    views::home()
}

/// GET /add
pub async fn add_form_page() -> Html<String> {
    let form = SeedForm {
        status: STATUS_AVAILABLE.to_string(),
        ..Default::default()
    };
    views::add_form(&form, None)
}

/// POST /add
pub async fn create_seed(
    State(state): State<AppState>,
    Form(form): Form<SeedForm>,
) -> Result<Response, ServiceError> {
    let outcome = match form.to_new_seed() {
        Ok(new_seed) => state.seeds.create(new_seed).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(seed) => {
            info!(display_id = %seed.display_id, "Seed added from form");
            Ok(redirect_to_report())
        }
        Err(err) => rerender_on_invalid(err, |msg| views::add_form(&form, Some(msg))),
    }
}

/// GET /update/:id
pub async fn update_form_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, ServiceError> {
    let seed = state.seeds.get(id).await?;
    Ok(views::update_form(&seed, &SeedForm::from(&seed), None))
}

/// POST /update/:id
pub async fn update_seed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<SeedForm>,
) -> Result<Response, ServiceError> {
    let outcome = match form.to_changes() {
        Ok(changes) => state.seeds.update(id, changes).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(seed) => {
            info!(display_id = %seed.display_id, "Seed updated from form");
            Ok(redirect_to_report())
        }
        Err(err @ ServiceError::ValidationError(_)) => {
            // The page header needs the stored seed; a missing one is a 404.
            let seed = state.seeds.get(id).await?;
            rerender_on_invalid(err, |msg| views::update_form(&seed, &form, Some(msg)))
        }
        Err(err) => Err(err),
    }
}

/// GET /delete/:id
///
/// Shows a confirmation page unless `confirm_deletes` is off, in which case
/// the seed is removed right away.
pub async fn delete_seed_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if !state.config.confirm_deletes {
        state.seeds.delete(id).await?;
        return Ok(redirect_to_report());
    }

    let seed = state.seeds.get(id).await?;
    Ok(views::confirm_delete(&seed).into_response())
}

/// POST /delete/:id
pub async fn delete_seed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.seeds.delete(id).await?;
    Ok(redirect_to_report())
}

/// GET /report
pub async fn report(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let seeds = state.seeds.list_all().await?;
    Ok(views::report(&seeds))
}

/// GET /status
pub async fn status_overview(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let summary = state.seeds.status_summary().await?;
    Ok(views::status(&summary))
}

/// Page routes for the seed inventory.
pub fn seed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/add", get(add_form_page).post(create_seed))
        .route("/update/:id", get(update_form_page).post(update_seed))
        .route("/delete/:id", get(delete_seed_page).post(delete_seed))
        .route("/report", get(report))
        .route("/status", get(status_overview))
}
