use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub id: Uuid,
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub position: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Editable card fields, shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardInput {
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCard {
    pub source_list_id: Uuid,
    pub target_list_id: Uuid,
    /// 0-based insertion index in the target list.
    pub target_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReorderCards {
    pub card_ids: Vec<Uuid>,
}
