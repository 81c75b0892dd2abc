use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::{optional_text, required_title};
use crate::error::Result;
use crate::models::{BoardDetails, CardInput, Created, MoveCard, ReorderCards};
use crate::state::AppState;

const MAX_CARD_DESCRIPTION_LEN: usize = 2000;

fn validate_card(input: CardInput) -> Result<CardInput> {
    Ok(CardInput {
        title: required_title("Card title", &input.title)?,
        description: optional_text(
            "Card description",
            input.description,
            MAX_CARD_DESCRIPTION_LEN,
        )?,
        assignee_id: input.assignee_id,
        tag_ids: input.tag_ids,
    })
}

pub async fn create_card(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(input): Json<CardInput>,
) -> Result<Json<Created>> {
    let input = validate_card(input)?;

    let card_id = state.cards.create_card(board_id, &input).await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(Created { id: card_id, board }))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CardInput>,
) -> Result<Json<BoardDetails>> {
    let input = validate_card(input)?;

    state.cards.update_card(card_id, &input).await?;
    let board_id = state.cards.board_id_for_card(card_id).await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(board))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<BoardDetails>> {
    // Resolve the board first; the card is gone afterwards.
    let board_id = state.cards.board_id_for_card(card_id).await?;

    state.cards.delete_card(card_id).await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(board))
}

pub async fn move_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(input): Json<MoveCard>,
) -> Result<Json<BoardDetails>> {
    state
        .cards
        .move_card(
            card_id,
            input.source_list_id,
            input.target_list_id,
            input.target_index,
        )
        .await?;

    let board_id = state.cards.board_id_for_card(card_id).await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(board))
}

pub async fn reorder_cards(
    State(state): State<AppState>,
    Path(board_id): Path<Uuid>,
    Json(input): Json<ReorderCards>,
) -> Result<Json<BoardDetails>> {
    state
        .cards
        .reorder_cards_in_list(board_id, &input.card_ids)
        .await?;
    let board = state.boards.get_board_details(board_id).await?;

    Ok(Json(board))
}
