//! End-to-end coverage for the score endpoints.
//!
//! Runs the real command service over the in-memory adapters behind the full
//! Actix stack, driving authorization through the session cookie exactly as a
//! client would.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::*;
use crate::domain::ScoreCommandService;
use crate::inbound::http::test_utils::test_session_middleware;
use crate::inbound::http::users::login;
use crate::outbound::persistence::{InMemoryScoreRepository, InMemoryUserDirectory};

// Seeded accounts: admin/password (id 1, admin), ada/wonderland (id 2).
fn seeded_state() -> HttpState {
    let directory = Arc::new(InMemoryUserDirectory::seeded());
    let scores = Arc::new(InMemoryScoreRepository::new());
    let service = Arc::new(ScoreCommandService::new(scores, Arc::clone(&directory)));
    HttpState::new(service, directory)
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(create_score)
                .service(update_score)
                .service(delete_score),
        )
}

async fn session_for<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login must succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn create_for_ada<S, B>(app: &S, admin: &Cookie<'static>) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin.clone())
            .set_json(json!({ "value": 100, "userId": 2, "recordedAt": "2024-03-01 12:00:00" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("numeric id")
}

#[actix_web::test]
async fn create_requires_authentication() {
    let app = test::init_service(test_app(seeded_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .set_json(json!({ "value": 1, "userId": 2, "recordedAt": "2024-03-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn create_is_admin_only() {
    let app = test::init_service(test_app(seeded_state())).await;
    let ada = session_for(&app, "ada", "wonderland").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(ada)
            .set_json(json!({ "value": 1, "userId": 2, "recordedAt": "2024-03-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_creates_a_score_with_location_header() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .set_json(json!({ "value": 100, "userId": 2, "recordedAt": "2024-03-01 12:00:00" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get("Location")
        .expect("location header")
        .to_str()
        .expect("ascii header");
    assert_eq!(location, "/api/v1/scores/1");

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["value"], 100);
    assert_eq!(body["userId"], 2);
    assert_eq!(body["recordedAt"], "2024-03-01T12:00:00+00:00");
}

#[actix_web::test]
async fn create_reports_every_missing_field() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .set_json(json!({ "value": 100 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    let missing = body["details"]["missing"].as_array().expect("missing list");
    assert!(missing.contains(&json!("userId")));
    assert!(missing.contains(&json!("recordedAt")));
    assert!(!missing.contains(&json!("value")));
}

#[actix_web::test]
async fn create_rejects_an_unknown_owner() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .set_json(json!({ "value": 100, "userId": 42, "recordedAt": "2024-03-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "unknown_user");
}

#[actix_web::test]
async fn create_rejects_an_unparsable_timestamp() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .set_json(json!({ "value": 100, "userId": 2, "recordedAt": "next tuesday" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_timestamp");
}

#[actix_web::test]
async fn update_of_a_missing_score_is_not_found_even_for_a_non_owner() {
    let app = test::init_service(test_app(seeded_state())).await;
    let ada = session_for(&app, "ada", "wonderland").await;

    // Nothing was created: a non-owner probing id 1 sees 404, not 403.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/scores/1")
            .cookie(ada)
            .set_json(json!({ "value": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn a_non_owner_cannot_update_an_existing_score() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let ada = session_for(&app, "ada", "wonderland").await;

    // Owned by the admin account, not ada.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .set_json(json!({ "value": 100, "userId": 1, "recordedAt": "2024-03-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/scores/1")
            .cookie(ada)
            .set_json(json!({ "value": 999 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn the_owner_updates_only_the_fields_sent() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let ada = session_for(&app, "ada", "wonderland").await;
    let id = create_for_ada(&app, &admin).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(ada)
            .set_json(json!({ "value": 250 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["value"], 250);
    assert_eq!(body["userId"], 2);
    assert_eq!(body["recordedAt"], "2024-03-01T12:00:00+00:00");
}

#[actix_web::test]
async fn an_admin_updates_a_score_they_do_not_own() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let id = create_for_ada(&app, &admin).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(admin)
            .set_json(json!({ "recordedAt": "2024-06-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["recordedAt"], "2024-06-01T00:00:00+00:00");
    assert_eq!(body["value"], 100);
}

#[actix_web::test]
async fn a_failed_update_leaves_the_score_untouched() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let ada = session_for(&app, "ada", "wonderland").await;
    let id = create_for_ada(&app, &admin).await;

    // The unknown owner reference fails the whole update, including the
    // otherwise valid value change.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(ada)
            .set_json(json!({ "value": 999, "userId": 42 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(admin)
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["value"], 100);
    assert_eq!(body["userId"], 2);
}

#[actix_web::test]
async fn delete_is_admin_only_even_for_the_owner() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let ada = session_for(&app, "ada", "wonderland").await;
    let id = create_for_ada(&app, &admin).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(ada)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn an_admin_deletes_and_a_repeat_is_not_found() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;
    let id = create_for_ada(&app, &admin).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/scores/{id}"))
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn structurally_malformed_json_is_a_bad_request() {
    let app = test::init_service(test_app(seeded_state())).await;
    let admin = session_for(&app, "admin", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/scores")
            .cookie(admin)
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
