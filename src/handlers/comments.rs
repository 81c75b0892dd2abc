use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateComment, Created};
use crate::state::AppState;

/// Add a comment to a card
pub async fn create_comment(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CreateComment>,
) -> Result<Json<Created>> {
    let text = input.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Comment text is required".to_string()));
    }

    let comment_id = state
        .cards
        .create_comment(card_id, input.user_id, text)
        .await?;

    let board_id = state.cards.board_id_for_card(card_id).await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(Created {
        id: comment_id,
        board,
    }))
}
