use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Card;

pub async fn insert(
    conn: &mut SqliteConnection,
    list_id: Uuid,
    title: &str,
    description: Option<&str>,
    assignee_id: Option<Uuid>,
    position: i64,
) -> Result<Card> {
    let id = Uuid::new_v4();

    let card = sqlx::query_as::<_, Card>(
        r#"
        INSERT INTO cards (id, list_id, title, description, assignee_id, position, completed, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 0, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(list_id)
    .bind(title)
    .bind(description)
    .bind(assignee_id)
    .bind(position)
    .fetch_one(&mut *conn)
    .await?;

    Ok(card)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Card>> {
    let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(card)
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Card> {
    find_by_id(conn, id)
        .await?
        .ok_or(AppError::not_found("Card", id))
}

/// All cards in any of `list_ids`, ordered by position.
pub async fn list_by_lists(conn: &mut SqliteConnection, list_ids: &[Uuid]) -> Result<Vec<Card>> {
    if list_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM cards WHERE list_id IN (");
    let mut ids = query.separated(", ");
    for id in list_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY position ASC, created_at ASC");

    let cards = query.build_query_as::<Card>().fetch_all(&mut *conn).await?;

    Ok(cards)
}

/// Cards with any of `ids`, in no particular order. Unknown ids are skipped.
pub async fn list_by_ids(conn: &mut SqliteConnection, ids: &[Uuid]) -> Result<Vec<Card>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM cards WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let cards = query.build_query_as::<Card>().fetch_all(&mut *conn).await?;

    Ok(cards)
}

/// Highest position in the list, or 0 when the list is empty.
pub async fn max_position(conn: &mut SqliteConnection, list_id: Uuid) -> Result<i64> {
    let max_pos = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(position) FROM cards WHERE list_id = $1",
    )
    .bind(list_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(max_pos.unwrap_or(0))
}

/// Number of cards in the list, not counting `exclude`.
pub async fn count_in_list(
    conn: &mut SqliteConnection,
    list_id: Uuid,
    exclude: Uuid,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM cards WHERE list_id = $1 AND id != $2",
    )
    .bind(list_id)
    .bind(exclude)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}

pub async fn update_fields(
    conn: &mut SqliteConnection,
    id: Uuid,
    title: &str,
    description: Option<&str>,
    assignee_id: Option<Uuid>,
) -> Result<Card> {
    sqlx::query_as::<_, Card>(
        r#"
        UPDATE cards
        SET title = $2,
            description = $3,
            assignee_id = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(assignee_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::not_found("Card", id))
}

pub async fn delete(conn: &mut SqliteConnection, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM cards WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Card", id));
    }

    Ok(())
}

pub async fn set_position(conn: &mut SqliteConnection, id: Uuid, position: i64) -> Result<()> {
    let result = sqlx::query("UPDATE cards SET position = $2 WHERE id = $1")
        .bind(id)
        .bind(position)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Card", id));
    }

    Ok(())
}

/// Shift every card after `position` up by one slot (position - 1).
pub async fn close_gap(
    conn: &mut SqliteConnection,
    list_id: Uuid,
    position: i64,
    exclude: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE cards
        SET position = position - 1
        WHERE list_id = $1 AND position > $2 AND id != $3
        "#,
    )
    .bind(list_id)
    .bind(position)
    .bind(exclude)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Shift every card at or after `position` down by one slot (position + 1).
pub async fn open_slot(
    conn: &mut SqliteConnection,
    list_id: Uuid,
    position: i64,
    exclude: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE cards
        SET position = position + 1
        WHERE list_id = $1 AND position >= $2 AND id != $3
        "#,
    )
    .bind(list_id)
    .bind(position)
    .bind(exclude)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Put a card at `position` in `list_id` and record its completion state.
pub async fn place(
    conn: &mut SqliteConnection,
    id: Uuid,
    list_id: Uuid,
    position: i64,
    completed: bool,
) -> Result<Card> {
    sqlx::query_as::<_, Card>(
        r#"
        UPDATE cards
        SET list_id = $2, position = $3, completed = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(list_id)
    .bind(position)
    .bind(completed)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::not_found("Card", id))
}

pub async fn board_id_for_card(conn: &mut SqliteConnection, card_id: Uuid) -> Result<Uuid> {
    let board_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT l.board_id FROM cards c
        INNER JOIN lists l ON c.list_id = l.id
        WHERE c.id = $1
        "#,
    )
    .bind(card_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::not_found("Card", card_id))?;

    Ok(board_id)
}
