use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CardTag, Tag};

pub async fn insert(conn: &mut SqliteConnection, name: &str, color: &str) -> Result<Tag> {
    let id = Uuid::new_v4();

    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (id, name, color, created_at)
        VALUES ($1, $2, $3, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(color)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(tag)
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Tag> {
    find_by_id(conn, id)
        .await?
        .ok_or(AppError::not_found("Tag", id))
}

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
        .fetch_all(&mut *conn)
        .await?;

    Ok(tags)
}

/// Associate a tag with a card. Re-adding an existing pair is a no-op.
pub async fn add_to_card(conn: &mut SqliteConnection, card_id: Uuid, tag_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO card_tags (card_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT(card_id, tag_id) DO NOTHING
        "#,
    )
    .bind(card_id)
    .bind(tag_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn clear_for_card(conn: &mut SqliteConnection, card_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM card_tags WHERE card_id = $1")
        .bind(card_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_for_cards(
    conn: &mut SqliteConnection,
    card_ids: &[Uuid],
) -> Result<Vec<CardTag>> {
    if card_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT card_id, tag_id FROM card_tags WHERE card_id IN (");
    let mut ids = query.separated(", ");
    for id in card_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY rowid ASC");

    let card_tags = query
        .build_query_as::<CardTag>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(card_tags)
}
