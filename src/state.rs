use crate::db::Store;
use crate::services::{BoardService, CardService};

#[derive(Clone)]
pub struct AppState {
    pub boards: BoardService,
    pub cards: CardService,
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            boards: BoardService::new(store.clone()),
            cards: CardService::new(store.clone()),
            store,
        }
    }
}
