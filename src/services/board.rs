use tracing::{debug, info};
use uuid::Uuid;

use crate::db::Store;
use crate::error::Result;
use crate::models::{BoardDetails, BoardSummary, Tag, User, DEFAULT_LISTS};
use crate::repo;
use crate::services::aggregate::{build_board_view, BoardRows};

#[derive(Clone)]
pub struct BoardService {
    store: Store,
}

impl BoardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a board together with its default lists at positions 1..=4.
    pub async fn create_board(&self, title: &str, description: Option<&str>) -> Result<Uuid> {
        let result: Result<Uuid> = async {
            let mut tx = self.store.write().await?;

            let board = repo::board::insert(&mut tx, title, description).await?;
            for (index, (list_title, role)) in DEFAULT_LISTS.iter().enumerate() {
                repo::list::insert(&mut tx, board.id, list_title, index as i64 + 1, *role).await?;
            }

            tx.commit().await?;
            info!(board_id = %board.id, "board created");
            Ok(board.id)
        }
        .await;

        result.map_err(|e| e.context("create board"))
    }

    pub async fn get_all_boards(&self) -> Result<Vec<BoardSummary>> {
        let result: Result<Vec<BoardSummary>> = async {
            let mut tx = self.store.read().await?;
            let boards = repo::board::list_summaries(&mut tx).await?;
            tx.commit().await?;
            Ok(boards)
        }
        .await;

        result.map_err(|e| e.context("list boards"))
    }

    /// Read the whole board from one snapshot and nest it for rendering.
    pub async fn get_board_details(&self, board_id: Uuid) -> Result<BoardDetails> {
        let result: Result<BoardDetails> = async {
            let mut tx = self.store.read().await?;

            let board = repo::board::get_by_id(&mut tx, board_id).await?;
            let lists = repo::list::list_by_board(&mut tx, board_id).await?;
            let users = repo::user::list_all(&mut tx).await?;
            let tags = repo::tag::list_all(&mut tx).await?;

            let list_ids: Vec<Uuid> = lists.iter().map(|l| l.id).collect();
            let cards = repo::card::list_by_lists(&mut tx, &list_ids).await?;

            let card_ids: Vec<Uuid> = cards.iter().map(|c| c.id).collect();
            let (card_tags, comments) = if card_ids.is_empty() {
                (Vec::new(), Vec::new())
            } else {
                (
                    repo::tag::list_for_cards(&mut tx, &card_ids).await?,
                    repo::comment::list_for_cards(&mut tx, &card_ids).await?,
                )
            };

            tx.commit().await?;

            debug!(
                %board_id,
                lists = lists.len(),
                cards = cards.len(),
                "aggregating board"
            );

            let rows = BoardRows {
                lists,
                cards,
                card_tags,
                comments,
                users,
                tags,
            };
            let view = build_board_view(board, &rows);

            Ok(BoardDetails {
                board: view,
                users: rows.users,
                tags: rows.tags,
            })
        }
        .await;

        result.map_err(|e| e.context(format!("get board {}", board_id)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let result: Result<Vec<User>> = async {
            let mut tx = self.store.read().await?;
            let users = repo::user::list_all(&mut tx).await?;
            tx.commit().await?;
            Ok(users)
        }
        .await;

        result.map_err(|e| e.context("list users"))
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let result: Result<Vec<Tag>> = async {
            let mut tx = self.store.read().await?;
            let tags = repo::tag::list_all(&mut tx).await?;
            tx.commit().await?;
            Ok(tags)
        }
        .await;

        result.map_err(|e| e.context("list tags"))
    }
}
