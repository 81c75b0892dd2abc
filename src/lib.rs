pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod services;
pub mod state;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Board routes
        .route("/boards", post(handlers::boards::create_board))
        .route("/boards", get(handlers::boards::list_boards))
        .route("/boards/{board_id}", get(handlers::boards::get_board))
        // Card routes
        .route(
            "/boards/{board_id}/cards",
            post(handlers::cards::create_card),
        )
        .route(
            "/boards/{board_id}/cards/reorder",
            post(handlers::cards::reorder_cards),
        )
        .route(
            "/cards/{card_id}",
            put(handlers::cards::update_card).delete(handlers::cards::delete_card),
        )
        .route("/cards/{card_id}/move", patch(handlers::cards::move_card))
        // Comment routes
        .route(
            "/cards/{card_id}/comments",
            post(handlers::comments::create_comment),
        )
        // Reference data
        .route("/users", get(handlers::reference::list_users))
        .route("/tags", get(handlers::reference::list_tags));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use crate::db::Store;
    use crate::repo;
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    pub async fn create_test_pool() -> SqlitePool {
        // One connection that never recycles: each in-memory connection is
        // its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(Store::new(pool))
    }

    pub async fn create_test_user(state: &AppState, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut conn = state.store.pool().acquire().await.unwrap();
        repo::user::insert(&mut conn, id, name).await.unwrap();
        id
    }

    pub async fn create_test_tag(state: &AppState, name: &str, color: &str) -> Uuid {
        let mut conn = state.store.pool().acquire().await.unwrap();
        repo::tag::insert(&mut conn, name, color).await.unwrap().id
    }
}
