use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info, instrument};

use crate::{
    error::AppError,
    extract::PathId,
    meals::{
        dto::{CreateMealRequest, MealEnvelope, MealList, UpdateMealRequest},
        metrics::MealMetrics,
        repo_types::{Meal, MealChanges, NewMeal},
    },
    session::SessionId,
    state::AppState,
};

// Static segments win over `:id`, so `list`/`metrics` never reach the id parser.
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/list", get(list_meals))
        .route("/meals/list/", get(list_meals))
        .route("/meals/metrics", get(meal_metrics))
        .route("/meals/metrics/", get(meal_metrics))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

// --- handlers ---

#[instrument(skip(state, session))]
pub async fn list_meals(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<MealList>, AppError> {
    let meals = state.storage.list_meals(session.0).await?;
    Ok(Json(MealList { meals }))
}

#[instrument(skip(state, session))]
pub async fn get_meal(
    State(state): State<AppState>,
    session: SessionId,
    PathId(id): PathId,
) -> Result<Json<MealEnvelope>, AppError> {
    let meal = state.storage.find_meal(session.0, id).await?;
    if meal.is_none() {
        debug!(meal_id = %id, "meal not in session");
    }
    Ok(Json(MealEnvelope { meal }))
}

#[instrument(skip(state, session))]
pub async fn meal_metrics(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<MealMetrics>, AppError> {
    let meals = state.storage.list_meals(session.0).await?;
    Ok(Json(MealMetrics::from_meals(&meals)))
}

#[instrument(skip(state, session, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    session: SessionId,
    WithRejection(Json(payload), _): WithRejection<Json<CreateMealRequest>, AppError>,
) -> Result<StatusCode, AppError> {
    let meal = Meal::new(session.0, NewMeal::try_from(payload)?);
    state.storage.insert_meal(&meal).await?;
    info!(meal_id = %meal.id, on_diet = meal.on_diet, "meal created");
    Ok(StatusCode::CREATED)
}

/// Only fields present in the body change; a foreign or missing id is a no-op.
#[instrument(skip(state, session, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    session: SessionId,
    PathId(id): PathId,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateMealRequest>, AppError>,
) -> Result<StatusCode, AppError> {
    let changes = MealChanges::try_from(payload)?;
    if changes.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }
    let touched = state.storage.update_meal(session.0, id, changes).await?;
    info!(meal_id = %id, touched, "meal updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, session))]
pub async fn delete_meal(
    State(state): State<AppState>,
    session: SessionId,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    let removed = state.storage.delete_meal(session.0, id).await?;
    info!(meal_id = %id, removed, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
