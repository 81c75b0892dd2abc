use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lists created alongside every new board, in position order.
pub const DEFAULT_LISTS: [(&str, ListRole); 4] = [
    ("Todo", ListRole::None),
    ("In-Progress", ListRole::None),
    ("QA", ListRole::None),
    ("Done", ListRole::Done),
];

/// Titles accepted for the list that receives newly created cards.
pub const INTAKE_LIST_TITLES: [&str; 2] = ["Todo", "To Do"];

/// What a list means to the cards in it, independent of its display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListRole {
    #[default]
    None,
    Done,
}

impl ListRole {
    /// Cards sitting in a list with this role count as completed.
    pub fn marks_completed(self) -> bool {
        matches!(self, ListRole::Done)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub position: i64,
    pub role: ListRole,
    pub created_at: DateTime<Utc>,
}

impl List {
    pub fn is_intake(&self) -> bool {
        INTAKE_LIST_TITLES.contains(&self.title.as_str())
    }
}
