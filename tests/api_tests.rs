//! HTTP-level tests for the review-assignment API.
//!
//! Runs the full actix app over the in-memory store, exercising route
//! wiring, JSON shapes, and error-code mapping.

use std::sync::Arc;

use actix_web::{App, test, web};
use serde_json::{Value, json};

use pr_review_lib::api;
use pr_review_lib::services::ReviewService;
use pr_review_lib::store::memory::MemoryStore;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(MemoryStore::new());
    let service = ReviewService::new(store.clone(), store.clone(), store);

    App::new()
        .app_data(web::Data::new(service))
        .configure(api::configure_health_routes)
        .configure(api::configure_team_routes)
        .configure(api::configure_user_routes)
        .configure(api::configure_pull_request_routes)
        .configure(api::configure_stats_routes)
}

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    path: &str,
    body: Value,
) -> (actix_web::http::StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri(path)
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    path: &str,
) -> (actix_web::http::StatusCode, Value) {
    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn team_payload(team_name: &str, members: &[(&str, &str, bool)]) -> Value {
    json!({
        "team_name": team_name,
        "members": members
            .iter()
            .map(|(id, name, active)| {
                json!({"user_id": id, "username": name, "is_active": active})
            })
            .collect::<Vec<_>>(),
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(test_app()).await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_ready_endpoint() {
    let app = test::init_service(test_app()).await;

    let (status, body) = get_json(&app, "/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["storage"], "connected");
}

#[actix_web::test]
async fn test_team_add_and_get() {
    let app = test::init_service(test_app()).await;

    let (status, body) = post_json(
        &app,
        "/team/add",
        team_payload(
            "payments",
            &[("u2", "bob", true), ("u1", "alice", true)],
        ),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["team"]["team_name"], "payments");
    // Roster comes back in ascending user_id order regardless of input order
    assert_eq!(body["team"]["members"][0]["user_id"], "u1");
    assert_eq!(body["team"]["members"][1]["user_id"], "u2");

    let (status, body) = get_json(&app, "/team/get?team_name=payments").await;
    assert_eq!(status, 200);
    assert_eq!(body["team_name"], "payments");
    assert_eq!(body["members"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_team_add_duplicate_returns_conflict() {
    let app = test::init_service(test_app()).await;

    let (status, _) = post_json(&app, "/team/add", team_payload("core", &[])).await;
    assert_eq!(status, 201);

    let (status, body) = post_json(&app, "/team/add", team_payload("core", &[])).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "TEAM_EXISTS");
}

#[actix_web::test]
async fn test_team_get_unknown_returns_not_found() {
    let app = test::init_service(test_app()).await;

    let (status, body) = get_json(&app, "/team/get?team_name=ghosts").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_team_add_empty_name_rejected() {
    let app = test::init_service(test_app()).await;

    let (status, body) = post_json(&app, "/team/add", team_payload("", &[])).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_web::test]
async fn test_user_add_and_toggle_active() {
    let app = test::init_service(test_app()).await;

    let (status, body) = post_json(
        &app,
        "/users/add",
        json!({"user_id": "u7", "username": "grace", "team_name": null, "is_active": true}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["user"]["user_id"], "u7");

    let (status, body) = post_json(
        &app,
        "/users/setIsActive",
        json!({"user_id": "u7", "is_active": false}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["is_active"], false);
}

#[actix_web::test]
async fn test_set_is_active_unknown_user_returns_not_found() {
    let app = test::init_service(test_app()).await;

    let (status, body) = post_json(
        &app,
        "/users/setIsActive",
        json!({"user_id": "nobody", "is_active": true}),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_pull_request_create_assigns_reviewers() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload(
            "backend",
            &[
                ("u1", "alice", true),
                ("u2", "bob", true),
                ("u3", "carol", true),
            ],
        ),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-1",
            "pull_request_name": "Add rate limiter",
            "author_id": "u2",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["pr"]["status"], "OPEN");
    assert_eq!(body["pr"]["merged_at"], Value::Null);
    // Two reviewers in roster order, author excluded
    assert_eq!(body["pr"]["assigned_reviewers"], json!(["u1", "u3"]));
}

#[actix_web::test]
async fn test_pull_request_create_duplicate_returns_conflict() {
    let app = test::init_service(test_app()).await;

    post_json(&app, "/team/add", team_payload("t", &[("u1", "alice", true)])).await;

    let pr = json!({
        "pull_request_id": "pr-dup",
        "pull_request_name": "First",
        "author_id": "u1",
    });
    let (status, _) = post_json(&app, "/pullRequest/create", pr.clone()).await;
    assert_eq!(status, 201);

    let (status, body) = post_json(&app, "/pullRequest/create", pr).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "PR_EXISTS");
}

#[actix_web::test]
async fn test_pull_request_create_unknown_author_returns_not_found() {
    let app = test::init_service(test_app()).await;

    let (status, body) = post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-x",
            "pull_request_name": "Orphan",
            "author_id": "nobody",
        }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_pull_request_merge_is_idempotent() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-m",
            "pull_request_name": "Mergeable",
            "author_id": "u1",
        }),
    )
    .await;

    let (status, first) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-m"})).await;
    assert_eq!(status, 200);
    assert_eq!(first["pr"]["status"], "MERGED");
    assert!(first["pr"]["merged_at"].is_string());

    // Second merge returns the stored record with the original timestamp
    let (status, second) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-m"})).await;
    assert_eq!(status, 200);
    assert_eq!(second["pr"]["merged_at"], first["pr"]["merged_at"]);
}

#[actix_web::test]
async fn test_pull_request_merge_unknown_returns_not_found() {
    let app = test::init_service(test_app()).await;

    let (status, body) =
        post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "nope"})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_reassign_replaces_reviewer() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload(
            "t",
            &[
                ("u1", "alice", true),
                ("u2", "bob", true),
                ("u3", "carol", true),
                ("u4", "dave", true),
            ],
        ),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-r",
            "pull_request_name": "Reassignable",
            "author_id": "u1",
        }),
    )
    .await;

    // Initial reviewers are u2 and u3; u4 is the only eligible replacement
    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-r", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["replaced_by"], "u4");
    assert_eq!(body["pr"]["assigned_reviewers"], json!(["u3", "u4"]));
}

#[actix_web::test]
async fn test_reassign_merged_pr_rejected() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-done",
            "pull_request_name": "Done",
            "author_id": "u1",
        }),
    )
    .await;
    post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-done"})).await;

    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-done", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "PR_MERGED");
}

#[actix_web::test]
async fn test_reassign_not_assigned_rejected() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-n",
            "pull_request_name": "Narrow",
            "author_id": "u1",
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-n", "old_user_id": "u1"}),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "NOT_ASSIGNED");
}

#[actix_web::test]
async fn test_reassign_without_candidate_rejected() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-s",
            "pull_request_name": "Stuck",
            "author_id": "u1",
        }),
    )
    .await;

    // u2 is the only possible reviewer, so no replacement exists
    let (status, body) = post_json(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-s", "old_user_id": "u2"}),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "NO_CANDIDATE");
}

#[actix_web::test]
async fn test_get_review_lists_assignments() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-a",
            "pull_request_name": "Assigned to bob",
            "author_id": "u1",
        }),
    )
    .await;

    let (status, body) = get_json(&app, "/users/getReview?user_id=u2").await;
    assert_eq!(status, 200);
    assert_eq!(body["user_id"], "u2");
    assert_eq!(body["pull_requests"][0]["pull_request_id"], "pr-a");

    // A user with no assignments gets an empty list, not an error
    let (status, body) = get_json(&app, "/users/getReview?user_id=u1").await;
    assert_eq!(status, 200);
    assert_eq!(body["pull_requests"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_deactivate_team_stops_new_assignments() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload("t", &[("u1", "alice", true), ("u2", "bob", true)]),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/users/deactivateTeam",
        json!({"team_name": "t"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "team deactivated");

    // Creation still succeeds, with nobody eligible to review
    let (status, body) = post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-q",
            "pull_request_name": "Quiet",
            "author_id": "u1",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["pr"]["assigned_reviewers"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_stats_endpoint() {
    let app = test::init_service(test_app()).await;

    post_json(
        &app,
        "/team/add",
        team_payload(
            "t",
            &[
                ("u1", "alice", true),
                ("u2", "bob", true),
                ("u3", "carol", false),
            ],
        ),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-1",
            "pull_request_name": "One",
            "author_id": "u1",
        }),
    )
    .await;
    post_json(
        &app,
        "/pullRequest/create",
        json!({
            "pull_request_id": "pr-2",
            "pull_request_name": "Two",
            "author_id": "u2",
        }),
    )
    .await;
    post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-2"})).await;

    let (status, body) = get_json(&app, "/stats").await;
    assert_eq!(status, 200);
    assert_eq!(body["stats"]["total_prs"], 2);
    assert_eq!(body["stats"]["open_prs"], 1);
    assert_eq!(body["stats"]["merged_prs"], 1);
    assert_eq!(body["stats"]["total_users"], 3);
    assert_eq!(body["stats"]["active_users"], 2);
    assert_eq!(body["stats"]["average_reviewers"], 1.0);
}
