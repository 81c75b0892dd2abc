//! Card ordering within lists.
//!
//! Stored positions are 1-based and, once a transaction commits, form the
//! sequence `1..=N` for a list of `N` cards. Callers address slots with
//! 0-based indices. Every function here must run inside the caller's write
//! transaction; intermediate states between statements are allowed to break
//! contiguity.

use std::collections::{HashMap, HashSet};

use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Card, List};
use crate::repo;

/// Position for a card appended to the end of `list_id`.
pub async fn next_position(conn: &mut SqliteConnection, list_id: Uuid) -> Result<i64> {
    Ok(repo::card::max_position(conn, list_id).await? + 1)
}

/// Overwrite positions so the cards appear in the given order.
///
/// The card at index `i` gets position `i + 1`. All ids must belong to one
/// list; cards of that list left out of `card_ids` keep their old positions.
pub async fn reorder(conn: &mut SqliteConnection, card_ids: &[Uuid]) -> Result<()> {
    let Some(first) = card_ids.first() else {
        return Ok(());
    };

    let mut seen = HashSet::with_capacity(card_ids.len());
    if let Some(dup) = card_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::Precondition(format!(
            "card {} appears more than once in the requested order",
            dup
        )));
    }

    let list_of: HashMap<Uuid, Uuid> = repo::card::list_by_ids(conn, card_ids)
        .await?
        .into_iter()
        .map(|card| (card.id, card.list_id))
        .collect();
    let list_id = *list_of
        .get(first)
        .ok_or(AppError::not_found("Card", *first))?;

    for card_id in card_ids {
        let card_list = list_of
            .get(card_id)
            .ok_or(AppError::not_found("Card", *card_id))?;
        if *card_list != list_id {
            return Err(AppError::Precondition(format!(
                "card {} is not in list {}",
                card_id, list_id
            )));
        }
    }

    for (index, card_id) in card_ids.iter().enumerate() {
        repo::card::set_position(conn, *card_id, index as i64 + 1).await?;
    }

    Ok(())
}

/// Relocate `card` to slot `target_index` of `target`, re-sequencing both
/// lists, and derive `completed` from the target list's role.
///
/// `target_index` is clamped to the target list's size (not counting the
/// moving card), so any index past the end appends. Source and target may be
/// the same list.
pub async fn move_card(
    conn: &mut SqliteConnection,
    card: &Card,
    target: &List,
    target_index: usize,
) -> Result<Card> {
    // Close the gap the card leaves behind in its current list.
    repo::card::close_gap(conn, card.list_id, card.position, card.id).await?;

    let size = repo::card::count_in_list(conn, target.id, card.id).await?;
    let position = clamp_index(target_index, size) + 1;

    // Open a slot at the destination.
    repo::card::open_slot(conn, target.id, position, card.id).await?;

    repo::card::place(
        conn,
        card.id,
        target.id,
        position,
        target.role.marks_completed(),
    )
    .await
}

/// Clamp a 0-based insertion index into `0..=size`.
pub fn clamp_index(target_index: usize, size: i64) -> i64 {
    let size = size.max(0);
    i64::try_from(target_index).map_or(size, |index| index.min(size))
}

/// Remove a card and close the gap it leaves in its list.
pub async fn remove(conn: &mut SqliteConnection, card: &Card) -> Result<()> {
    repo::card::delete(conn, card.id).await?;
    repo::card::close_gap(conn, card.list_id, card.position, card.id).await?;
    Ok(())
}
