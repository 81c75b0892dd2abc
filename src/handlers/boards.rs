use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::{optional_text, required_title};
use crate::error::Result;
use crate::models::{BoardDetails, BoardSummary, CreateBoard, Created};
use crate::state::AppState;

const MAX_BOARD_DESCRIPTION_LEN: usize = 500;

pub async fn create_board(
    State(state): State<AppState>,
    Json(input): Json<CreateBoard>,
) -> Result<Json<Created>> {
    let title = required_title("Board title", &input.title)?;
    let description = optional_text(
        "Board description",
        input.description,
        MAX_BOARD_DESCRIPTION_LEN,
    )?;

    let board_id = state
        .boards
        .create_board(&title, description.as_deref())
        .await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(Created { id: board_id, board }))
}

pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<BoardSummary>>> {
    let boards = state.boards.get_all_boards().await?;
    Ok(Json(boards))
}

pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<BoardDetails>> {
    let board = state.boards.get_board_details(board_id).await?;
    Ok(Json(board))
}
