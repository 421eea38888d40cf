pub mod games;
pub mod health;
pub mod users;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/rankings", get(users::rankings))
        .route("/users/{name}/games", get(users::user_games))
        .route("/users/{name}/scores", get(users::user_scores))
        .route("/games", post(games::new_game))
        .route(
            "/games/{game_id}",
            get(games::get_game)
                .put(games::make_move)
                .delete(games::cancel_game),
        )
        .route("/games/{game_id}/history", get(games::game_history))
        .route("/scores", get(users::all_scores))
        .route("/scores/{score_id}", get(users::get_score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, db::MemoryStore, game::GameView};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(AppState {
            config: Config::default(),
            store: Arc::new(MemoryStore::new()),
        });
        create_routes().with_state(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_players(app: &Router) {
        for name in ["alice", "bob"] {
            let (status, body) = send(app, "POST", "/api/users", Some(json!({ "name": name }))).await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["message"], format!("User {} created!", name));
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_duplicate_user_conflict() {
        let app = app();
        create_players(&app).await;
        let (status, body) = send(&app, "POST", "/api/users", Some(json!({ "name": "alice" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "A User with that name already exists!");
    }

    #[tokio::test]
    async fn test_game_flow() {
        let app = app();
        create_players(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/games",
            Some(json!({ "first_user": "alice", "second_user": "bob" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let view: GameView = serde_json::from_value(body).unwrap();
        assert_eq!(view.next_move, "alice");
        assert_eq!(view.unmatched_pairs, 8);
        let uri = format!("/api/games/{}", view.game_id);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Time to make a move!");
        assert_eq!(body["outcome"], "in_progress");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "name": "bob", "row": 0, "column": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "It's not your turn!");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "name": "alice", "row": 0, "column": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "One more guess to make");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "name": "alice", "row": 0, "column": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Card has already been flipped");

        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({ "name": "alice", "row": -1, "column": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Requested move is out of grid board boundary");

        let (status, body) = send(&app, "GET", &format!("{}/history", uri), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, body) = send(&app, "GET", "/api/users/bob/games", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Game not found!");
    }

    #[tokio::test]
    async fn test_unknown_user_and_game() {
        let app = app();
        create_players(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/games",
            Some(json!({ "first_user": "alice", "second_user": "nobody" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/users/nobody/scores", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/games/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_rankings_and_scores() {
        let app = app();
        create_players(&app).await;

        let (status, body) = send(&app, "GET", "/api/users/rankings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(&app, "GET", "/api/scores", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let uri = format!("/api/scores/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Score not found!");
    }
}
