use std::collections::HashSet;

use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::CardInput;
use crate::repo;
use crate::services::positions;

#[derive(Clone)]
pub struct CardService {
    store: Store,
}

impl CardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append a new card to the board's intake list ("Todo" / "To Do").
    pub async fn create_card(&self, board_id: Uuid, input: &CardInput) -> Result<Uuid> {
        let result: Result<Uuid> = async {
            let mut tx = self.store.write().await?;

            repo::board::get_by_id(&mut tx, board_id).await?;
            let intake = repo::list::list_by_board(&mut tx, board_id)
                .await?
                .into_iter()
                .find(|list| list.is_intake())
                .ok_or_else(|| {
                    AppError::Precondition(format!("board {} has no Todo list", board_id))
                })?;

            if let Some(assignee_id) = input.assignee_id {
                repo::user::get_by_id(&mut tx, assignee_id).await?;
            }

            let position = positions::next_position(&mut tx, intake.id).await?;
            let card = repo::card::insert(
                &mut tx,
                intake.id,
                &input.title,
                input.description.as_deref(),
                input.assignee_id,
                position,
            )
            .await?;
            attach_tags(&mut tx, card.id, &input.tag_ids).await?;

            tx.commit().await?;
            info!(card_id = %card.id, list_id = %intake.id, position, "card created");
            Ok(card.id)
        }
        .await;

        result.map_err(|e| e.context(format!("create card on board {}", board_id)))
    }

    /// Replace a card's fields and, wholesale, its tag associations.
    pub async fn update_card(&self, card_id: Uuid, input: &CardInput) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.store.write().await?;

            if let Some(assignee_id) = input.assignee_id {
                repo::user::get_by_id(&mut tx, assignee_id).await?;
            }

            repo::card::update_fields(
                &mut tx,
                card_id,
                &input.title,
                input.description.as_deref(),
                input.assignee_id,
            )
            .await?;
            repo::tag::clear_for_card(&mut tx, card_id).await?;
            attach_tags(&mut tx, card_id, &input.tag_ids).await?;

            tx.commit().await?;
            info!(%card_id, "card updated");
            Ok(())
        }
        .await;

        result.map_err(|e| e.context(format!("update card {}", card_id)))
    }

    /// Delete a card with its comments and tags, closing its slot in the list.
    pub async fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.store.write().await?;

            let card = repo::card::get_by_id(&mut tx, card_id).await?;
            repo::tag::clear_for_card(&mut tx, card_id).await?;
            repo::comment::delete_for_card(&mut tx, card_id).await?;
            positions::remove(&mut tx, &card).await?;

            tx.commit().await?;
            info!(%card_id, list_id = %card.list_id, "card deleted");
            Ok(())
        }
        .await;

        result.map_err(|e| e.context(format!("delete card {}", card_id)))
    }

    pub async fn create_comment(&self, card_id: Uuid, user_id: Uuid, text: &str) -> Result<Uuid> {
        let result: Result<Uuid> = async {
            let mut tx = self.store.write().await?;

            repo::card::get_by_id(&mut tx, card_id).await?;
            repo::user::get_by_id(&mut tx, user_id).await?;
            let comment = repo::comment::insert(&mut tx, card_id, user_id, text).await?;

            tx.commit().await?;
            info!(comment_id = %comment.id, %card_id, "comment added");
            Ok(comment.id)
        }
        .await;

        result.map_err(|e| e.context(format!("comment on card {}", card_id)))
    }

    /// Rewrite positions of one list's cards to match `card_ids`. The list
    /// must belong to `board_id`.
    pub async fn reorder_cards_in_list(&self, board_id: Uuid, card_ids: &[Uuid]) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.store.write().await?;

            repo::board::get_by_id(&mut tx, board_id).await?;
            if let Some(first) = card_ids.first() {
                let owner = repo::card::board_id_for_card(&mut tx, *first).await?;
                if owner != board_id {
                    return Err(AppError::Precondition(format!(
                        "card {} is not on board {}",
                        first, board_id
                    )));
                }
            }

            positions::reorder(&mut tx, card_ids).await?;
            tx.commit().await?;
            info!(%board_id, cards = card_ids.len(), "cards reordered");
            Ok(())
        }
        .await;

        result.map_err(|e| e.context(format!("reorder cards on board {}", board_id)))
    }

    /// Move a card to `target_index` (0-based) of `target_list_id`.
    ///
    /// Both lists are re-sequenced in the same transaction; a failure at any
    /// step leaves every card where it was.
    pub async fn move_card(
        &self,
        card_id: Uuid,
        source_list_id: Uuid,
        target_list_id: Uuid,
        target_index: usize,
    ) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.store.write().await?;

            let card = repo::card::get_by_id(&mut tx, card_id).await?;
            if card.list_id != source_list_id {
                return Err(AppError::Precondition(format!(
                    "card {} is not in list {}",
                    card_id, source_list_id
                )));
            }

            let source = repo::list::get_by_id(&mut tx, source_list_id).await?;
            let target = repo::list::find_by_id(&mut tx, target_list_id)
                .await?
                .ok_or_else(|| {
                    AppError::Precondition(format!("target list {} does not exist", target_list_id))
                })?;
            if target.board_id != source.board_id {
                return Err(AppError::Precondition(
                    "cannot move a card to a different board".to_string(),
                ));
            }

            let moved = positions::move_card(&mut tx, &card, &target, target_index).await?;

            tx.commit().await?;
            info!(
                %card_id,
                from = %source_list_id,
                to = %target_list_id,
                position = moved.position,
                completed = moved.completed,
                "card moved"
            );
            Ok(())
        }
        .await;

        result.map_err(|e| e.context(format!("move card {}", card_id)))
    }

    /// Board that currently owns the card.
    pub async fn board_id_for_card(&self, card_id: Uuid) -> Result<Uuid> {
        let mut tx = self.store.read().await?;
        let board_id = repo::card::board_id_for_card(&mut tx, card_id).await?;
        tx.commit().await?;
        Ok(board_id)
    }
}

/// Associate each distinct tag with the card. Any unknown tag fails the whole
/// mutation.
async fn attach_tags(conn: &mut SqliteConnection, card_id: Uuid, tag_ids: &[Uuid]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    for tag_id in tag_ids.iter().filter(|id| seen.insert(**id)) {
        repo::tag::get_by_id(conn, *tag_id).await?;
        repo::tag::add_to_card(conn, card_id, *tag_id).await?;
    }
    Ok(())
}
