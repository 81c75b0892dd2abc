//! Global lookup data for assignee and tag pickers.

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::{Tag, User};
use crate::state::AppState;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.boards.list_users().await?))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>> {
    Ok(Json(state.boards.list_tags().await?))
}
