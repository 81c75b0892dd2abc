use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{List, ListRole};

pub async fn insert(
    conn: &mut SqliteConnection,
    board_id: Uuid,
    title: &str,
    position: i64,
    role: ListRole,
) -> Result<List> {
    let id = Uuid::new_v4();

    let list = sqlx::query_as::<_, List>(
        r#"
        INSERT INTO lists (id, board_id, title, position, role, created_at)
        VALUES ($1, $2, $3, $4, $5, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(board_id)
    .bind(title)
    .bind(position)
    .bind(role)
    .fetch_one(&mut *conn)
    .await?;

    Ok(list)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<List>> {
    let list = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(list)
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<List> {
    find_by_id(conn, id)
        .await?
        .ok_or(AppError::not_found("List", id))
}

pub async fn list_by_board(conn: &mut SqliteConnection, board_id: Uuid) -> Result<Vec<List>> {
    let lists = sqlx::query_as::<_, List>(
        "SELECT * FROM lists WHERE board_id = $1 ORDER BY position ASC",
    )
    .bind(board_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(lists)
}
