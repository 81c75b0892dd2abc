use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Board, BoardSummary};

pub async fn insert(
    conn: &mut SqliteConnection,
    title: &str,
    description: Option<&str>,
) -> Result<Board> {
    let id = Uuid::new_v4();

    let board = sqlx::query_as::<_, Board>(
        r#"
        INSERT INTO boards (id, title, description, created_at)
        VALUES ($1, $2, $3, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .fetch_one(&mut *conn)
    .await?;

    Ok(board)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Board>> {
    let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(board)
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Board> {
    find_by_id(conn, id)
        .await?
        .ok_or(AppError::not_found("Board", id))
}

pub async fn list_summaries(conn: &mut SqliteConnection) -> Result<Vec<BoardSummary>> {
    let boards = sqlx::query_as::<_, BoardSummary>(
        "SELECT id, title, description, created_at FROM boards ORDER BY created_at ASC, rowid ASC",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(boards)
}
