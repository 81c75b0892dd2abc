use axum_test::TestServer;
use kanban_board::{create_router, state::AppState, test_utils};
use serde_json::{json, Value};

const ALICE_ID: &str = "0b3e7a1c-5d2f-4e8a-9c1b-2d3e4f5a6b70";
const BUG_TAG_ID: &str = "7c9d2e4f-1a3b-4c5d-8e6f-7a8b9c0d1e20";

async fn setup_server() -> TestServer {
    let state = test_utils::create_test_state().await;
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[allow(dead_code)]
async fn setup_server_with_state() -> (TestServer, AppState) {
    let state = test_utils::create_test_state().await;
    let app = create_router(state.clone());
    (TestServer::new(app).unwrap(), state)
}

/// Returns (board id, created board payload).
async fn create_board(server: &TestServer, title: &str) -> (String, Value) {
    let response = server
        .post("/api/boards")
        .json(&json!({ "title": title }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    (body["id"].as_str().unwrap().to_string(), body)
}

async fn create_card(server: &TestServer, board_id: &str, title: &str) -> String {
    let response = server
        .post(&format!("/api/boards/{}/cards", board_id))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

fn list_by_title<'a>(details: &'a Value, title: &str) -> &'a Value {
    details["board"]["lists"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["title"] == title)
        .unwrap()
}

fn list_id(details: &Value, title: &str) -> String {
    list_by_title(details, title)["id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn card_titles(list: &Value) -> Vec<String> {
    list["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Board Tests
// ============================================================================

mod board_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_board() {
        let server = setup_server().await;

        let response = server
            .post("/api/boards")
            .json(&json!({
                "title": "Sprint 1",
                "description": "First sprint"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["id"].is_string());
        assert_eq!(body["board"]["board"]["title"], "Sprint 1");
        assert_eq!(body["board"]["board"]["description"], "First sprint");

        let lists = body["board"]["board"]["lists"].as_array().unwrap();
        let titles: Vec<_> = lists.iter().map(|l| l["title"].as_str().unwrap()).collect();
        assert_eq!(titles, ["Todo", "In-Progress", "QA", "Done"]);
        assert_eq!(lists[3]["role"], "done");
        assert_eq!(lists[0]["role"], "none");
    }

    #[tokio::test]
    async fn test_create_board_blank_description_is_dropped() {
        let server = setup_server().await;

        let response = server
            .post("/api/boards")
            .json(&json!({ "title": "  Sprint 1  ", "description": "   " }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["board"]["board"]["title"], "Sprint 1");
        assert!(body["board"]["board"]["description"].is_null());
    }

    #[tokio::test]
    async fn test_create_board_empty_title() {
        let server = setup_server().await;

        let response = server
            .post("/api/boards")
            .json(&json!({ "title": "   " }))
            .await;

        response.assert_status_unprocessable_entity();
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("Board title"));
    }

    #[tokio::test]
    async fn test_create_board_description_too_long() {
        let server = setup_server().await;

        let response = server
            .post("/api/boards")
            .json(&json!({ "title": "Sprint 1", "description": "x".repeat(501) }))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_list_boards() {
        let server = setup_server().await;
        create_board(&server, "Alpha").await;
        create_board(&server, "Beta").await;

        let response = server.get("/api/boards").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let titles: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_get_board() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;

        let response = server.get(&format!("/api/boards/{}", board_id)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["board"]["id"], board_id.as_str());
        assert!(body["users"]
            .as_array()
            .unwrap()
            .iter()
            .any(|u| u["name"] == "Alice Johnson"));
        assert_eq!(body["tags"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_board_not_found() {
        let server = setup_server().await;

        let response = server
            .get(&format!("/api/boards/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status_not_found();
    }
}

// ============================================================================
// Card Tests
// ============================================================================

mod card_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_card() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;

        let response = server
            .post(&format!("/api/boards/{}/cards", board_id))
            .json(&json!({
                "title": "Fix bug",
                "description": "Crash on save",
                "assignee_id": ALICE_ID,
                "tag_ids": [BUG_TAG_ID]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let todo = list_by_title(&body["board"], "Todo");
        let card = &todo["cards"][0];
        assert_eq!(card["id"], body["id"]);
        assert_eq!(card["title"], "Fix bug");
        assert_eq!(card["position"], 1);
        assert_eq!(card["completed"], false);
        assert_eq!(card["assignee_name"], "Alice Johnson");
        assert_eq!(card["tags"][0]["name"], "Bug");
    }

    #[tokio::test]
    async fn test_create_card_empty_title() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;

        let response = server
            .post(&format!("/api/boards/{}/cards", board_id))
            .json(&json!({ "title": "" }))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_create_card_unknown_tag() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;

        let response = server
            .post(&format!("/api/boards/{}/cards", board_id))
            .json(&json!({
                "title": "Fix bug",
                "tag_ids": [uuid::Uuid::new_v4()]
            }))
            .await;
        response.assert_status_not_found();

        let details: Value = server
            .get(&format!("/api/boards/{}", board_id))
            .await
            .json();
        assert!(list_by_title(&details, "Todo")["cards"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_card_board_not_found() {
        let server = setup_server().await;

        let response = server
            .post(&format!("/api/boards/{}/cards", uuid::Uuid::new_v4()))
            .json(&json!({ "title": "Orphan" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_card() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        let card_id = create_card(&server, &board_id, "Fix bug").await;

        let response = server
            .put(&format!("/api/cards/{}", card_id))
            .json(&json!({
                "title": "Fix login bug",
                "description": "Only on Safari"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let card = &list_by_title(&body, "Todo")["cards"][0];
        assert_eq!(card["title"], "Fix login bug");
        assert_eq!(card["description"], "Only on Safari");
    }

    #[tokio::test]
    async fn test_update_card_not_found() {
        let server = setup_server().await;

        let response = server
            .put(&format!("/api/cards/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "title": "Ghost" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_card() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        create_card(&server, &board_id, "A").await;
        let b = create_card(&server, &board_id, "B").await;
        create_card(&server, &board_id, "C").await;

        let response = server.delete(&format!("/api/cards/{}", b)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let todo = list_by_title(&body, "Todo");
        assert_eq!(card_titles(todo), ["A", "C"]);
        assert_eq!(todo["cards"][1]["position"], 2);

        let response = server.delete(&format!("/api/cards/{}", b)).await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_move_card_to_done() {
        let server = setup_server().await;
        let (board_id, created) = create_board(&server, "Sprint 1").await;
        let fix = create_card(&server, &board_id, "Fix bug").await;
        create_card(&server, &board_id, "Write docs").await;

        let response = server
            .patch(&format!("/api/cards/{}/move", fix))
            .json(&json!({
                "source_list_id": list_id(&created["board"], "Todo"),
                "target_list_id": list_id(&created["board"], "Done"),
                "target_index": 0
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let todo = list_by_title(&body, "Todo");
        let done = list_by_title(&body, "Done");
        assert_eq!(card_titles(todo), ["Write docs"]);
        assert_eq!(todo["cards"][0]["position"], 1);
        assert_eq!(card_titles(done), ["Fix bug"]);
        assert_eq!(done["cards"][0]["position"], 1);
        assert_eq!(done["cards"][0]["completed"], true);
    }

    #[tokio::test]
    async fn test_move_card_within_list() {
        let server = setup_server().await;
        let (board_id, created) = create_board(&server, "Sprint 1").await;
        let a = create_card(&server, &board_id, "A").await;
        create_card(&server, &board_id, "B").await;
        create_card(&server, &board_id, "C").await;
        let todo_id = list_id(&created["board"], "Todo");

        let response = server
            .patch(&format!("/api/cards/{}/move", a))
            .json(&json!({
                "source_list_id": todo_id,
                "target_list_id": todo_id,
                "target_index": 2
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(card_titles(list_by_title(&body, "Todo")), ["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_move_card_wrong_source_list() {
        let server = setup_server().await;
        let (board_id, created) = create_board(&server, "Sprint 1").await;
        let card_id = create_card(&server, &board_id, "Fix bug").await;

        let response = server
            .patch(&format!("/api/cards/{}/move", card_id))
            .json(&json!({
                "source_list_id": list_id(&created["board"], "QA"),
                "target_list_id": list_id(&created["board"], "Done"),
                "target_index": 0
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_move_card_to_other_board() {
        let server = setup_server().await;
        let (board_id, created) = create_board(&server, "Sprint 1").await;
        let (_, other) = create_board(&server, "Sprint 2").await;
        let card_id = create_card(&server, &board_id, "Fix bug").await;

        let response = server
            .patch(&format!("/api/cards/{}/move", card_id))
            .json(&json!({
                "source_list_id": list_id(&created["board"], "Todo"),
                "target_list_id": list_id(&other["board"], "Todo"),
                "target_index": 0
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_reorder_cards() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        let a = create_card(&server, &board_id, "A").await;
        let b = create_card(&server, &board_id, "B").await;

        let response = server
            .post(&format!("/api/boards/{}/cards/reorder", board_id))
            .json(&json!({ "card_ids": [b, a] }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let todo = list_by_title(&body, "Todo");
        assert_eq!(card_titles(todo), ["B", "A"]);
        assert_eq!(todo["cards"][0]["position"], 1);
        assert_eq!(todo["cards"][1]["position"], 2);
    }
    #[tokio::test]
    async fn test_reorder_cards_through_other_board() {
        let server = setup_server().await;
        let (board_one, _) = create_board(&server, "Sprint 1").await;
        let (board_two, _) = create_board(&server, "Sprint 2").await;
        let a = create_card(&server, &board_two, "A").await;
        let b = create_card(&server, &board_two, "B").await;

        let response = server
            .post(&format!("/api/boards/{}/cards/reorder", board_one))
            .json(&json!({ "card_ids": [b, a] }))
            .await;
        response.assert_status(axum::http::StatusCode::CONFLICT);

        let details: Value = server
            .get(&format!("/api/boards/{}", board_two))
            .await
            .json();
        assert_eq!(card_titles(list_by_title(&details, "Todo")), ["A", "B"]);
    }

    #[tokio::test]
    async fn test_reorder_cards_board_not_found() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        let a = create_card(&server, &board_id, "A").await;
        let b = create_card(&server, &board_id, "B").await;

        let response = server
            .post(&format!(
                "/api/boards/{}/cards/reorder",
                uuid::Uuid::new_v4()
            ))
            .json(&json!({ "card_ids": [b, a] }))
            .await;
        response.assert_status_not_found();

        let details: Value = server
            .get(&format!("/api/boards/{}", board_id))
            .await
            .json();
        assert_eq!(card_titles(list_by_title(&details, "Todo")), ["A", "B"]);
    }
}

// ============================================================================
// Comment Tests
// ============================================================================

mod comment_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_comment() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        let card_id = create_card(&server, &board_id, "Fix bug").await;

        let response = server
            .post(&format!("/api/cards/{}/comments", card_id))
            .json(&json!({
                "user_id": ALICE_ID,
                "text": "  Reproduced on main  "
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let comment = &list_by_title(&body["board"], "Todo")["cards"][0]["comments"][0];
        assert_eq!(comment["id"], body["id"]);
        assert_eq!(comment["text"], "Reproduced on main");
        assert_eq!(comment["user_name"], "Alice Johnson");
    }

    #[tokio::test]
    async fn test_create_comment_empty_text() {
        let server = setup_server().await;
        let (board_id, _) = create_board(&server, "Sprint 1").await;
        let card_id = create_card(&server, &board_id, "Fix bug").await;

        let response = server
            .post(&format!("/api/cards/{}/comments", card_id))
            .json(&json!({ "user_id": ALICE_ID, "text": "   " }))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_create_comment_card_not_found() {
        let server = setup_server().await;

        let response = server
            .post(&format!("/api/cards/{}/comments", uuid::Uuid::new_v4()))
            .json(&json!({ "user_id": ALICE_ID, "text": "Hello" }))
            .await;

        response.assert_status_not_found();
    }
}

// ============================================================================
// Reference Data Tests
// ============================================================================

mod reference_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_users() {
        let (server, state) = setup_server_with_state().await;
        test_utils::create_test_user(&state, "Dana").await;

        let response = server.get("/api/users").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Alice Johnson"));
        assert!(names.contains(&"Dana"));
    }

    #[tokio::test]
    async fn test_list_tags() {
        let server = setup_server().await;

        let response = server.get("/api/tags").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Bug", "Documentation", "Enhancement", "Feature"]);
    }
}
