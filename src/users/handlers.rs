use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    extract::PathId,
    session::{resolve_or_mint, SessionId},
    state::AppState,
    users::{
        dto::{RegisterRequest, UserEnvelope, UserList},
        repo_types::{NewUser, User},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register))
        .route("/users/:id", get(get_user))
}

/// Unscoped on purpose: lists every registered user.
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, AppError> {
    let users = state.storage.list_users().await?;
    Ok(Json(UserList { users }))
}

#[instrument(skip(state, session))]
pub async fn get_user(
    State(state): State<AppState>,
    session: SessionId,
    PathId(id): PathId,
) -> Result<Json<UserEnvelope>, AppError> {
    let user = state.storage.find_user(session.0, id).await?;
    Ok(Json(UserEnvelope { user }))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, CookieJar), AppError> {
    let cmd = NewUser::try_from(payload)?;
    let (session_id, jar) = resolve_or_mint(jar, &state.config.session);

    let user = User::new(session_id, cmd);
    state.storage.insert_user(&user).await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, jar))
}
