use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::users::repository::NewUser;

/// POST /api/v1/users/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.register(req).await?;
    tracing::info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}
