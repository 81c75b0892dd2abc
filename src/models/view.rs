//! Nested read model handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{ListRole, Tag, User};

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub lists: Vec<ListView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub id: Uuid,
    pub title: String,
    pub position: i64,
    pub role: ListRole,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub assignee_name: Option<String>,
    pub position: i64,
    pub completed: bool,
    pub tags: Vec<TagView>,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagView {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color: tag.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    /// `None` when the author no longer resolves to a user.
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything a board page needs: the nested board plus the pickers' data.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetails {
    pub board: BoardView,
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
}

/// Response for mutations that create a row: the new id plus the re-read board.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Uuid,
    pub board: BoardDetails,
}
