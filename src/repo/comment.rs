use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Comment;

/// Create a new comment on a card
pub async fn insert(
    conn: &mut SqliteConnection,
    card_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<Comment> {
    let id = Uuid::new_v4();

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, card_id, user_id, text, created_at)
        VALUES ($1, $2, $3, $4, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(card_id)
    .bind(user_id)
    .bind(text)
    .fetch_one(&mut *conn)
    .await?;

    Ok(comment)
}

/// Comments for the given cards, oldest first
pub async fn list_for_cards(
    conn: &mut SqliteConnection,
    card_ids: &[Uuid],
) -> Result<Vec<Comment>> {
    if card_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM comments WHERE card_id IN (");
    let mut ids = query.separated(", ");
    for id in card_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY created_at ASC, rowid ASC");

    let comments = query
        .build_query_as::<Comment>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(comments)
}

pub async fn delete_for_card(conn: &mut SqliteConnection, card_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM comments WHERE card_id = $1")
        .bind(card_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
