use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::User;

pub async fn insert(conn: &mut SqliteConnection, id: Uuid, name: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, created_at)
        VALUES ($1, $2, datetime('now'))
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<User> {
    find_by_id(conn, id)
        .await?
        .ok_or(AppError::not_found("User", id))
}

pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name ASC")
        .fetch_all(&mut *conn)
        .await?;

    Ok(users)
}
