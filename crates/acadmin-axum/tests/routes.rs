//! End-to-end behaviour of the resource routes over an in-memory database.

mod common;

use axum::Router;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{IT_ADMIN, create, delete, get, post, put, send, test_app};

async fn seed_teacher(app: &Router) -> i64 {
    let role_id = create(app, "/api/v1/roles", json!({ "name": "Teacher" })).await;
    create(
        app,
        "/api/v1/users",
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@uni.edu",
            "document_number": "CC-1001",
            "role_id": role_id,
        }),
    )
    .await
}

async fn seed_space(app: &Router) -> i64 {
    let campus_id = create(
        app,
        "/api/v1/campuses",
        json!({ "name": "North", "address": "1 College Rd", "city": "Bogota" }),
    )
    .await;
    create(
        app,
        "/api/v1/spaces",
        json!({
            "campus_id": campus_id,
            "name": "Room 101",
            "space_type": "classroom",
            "capacity": 30,
        }),
    )
    .await
}

async fn seed_schedule(app: &Router) -> i64 {
    create(
        app,
        "/api/v1/schedules",
        json!({ "day_of_week": "monday", "start_time": "08:00:00", "end_time": "10:00:00" }),
    )
    .await
}

#[tokio::test]
async fn test_role_lifecycle() {
    let app = test_app().await;

    let (status, role) = post(
        &app,
        "/api/v1/roles",
        json!({ "name": "Registrar", "description": "Keeps records" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(role["name"], "Registrar");
    assert_eq!(role["status"], true);
    let id = role["id"].as_i64().unwrap();

    let (status, body) = post(&app, "/api/v1/roles", json!({ "name": "registrar" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, fetched) = get(&app, &format!("/api/v1/roles/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["description"], "Keeps records");

    let (status, updated) = put(
        &app,
        &format!("/api/v1/roles/{id}"),
        json!({ "description": "Keeps academic records" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Registrar");
    assert_eq!(updated["description"], "Keeps academic records");

    let (status, found) = get(&app, "/api/v1/roles/search?q=regis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, deleted) = delete(&app, &format!("/api/v1/roles/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "id": id, "deleted": true }));

    let (status, _) = get(&app, &format!("/api/v1/roles/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, &format!("/api/v1/roles/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = get(&app, "/api/v1/roles").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_deleted_name_can_be_reused() {
    let app = test_app().await;
    let id = create(&app, "/api/v1/roles", json!({ "name": "Dean" })).await;
    delete(&app, &format!("/api/v1/roles/{id}")).await;

    let (status, _) = post(&app, "/api/v1/roles", json!({ "name": "Dean" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_empty_search_is_400() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api/v1/roles/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("search"));
}

#[tokio::test]
async fn test_pagination_bounds() {
    let app = test_app().await;
    for name in ["A", "B", "C"] {
        create(&app, "/api/v1/roles", json!({ "name": name })).await;
    }

    let (status, page) = get(&app, "/api/v1/roles?skip=1&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.as_array().unwrap().len(), 1);

    let (status, _) = get(&app, "/api/v1/roles?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/roles?limit=501").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(IT_ADMIN),
        Some(json!({ "description": "missing name" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_user_with_unknown_role_is_400() {
    let app = test_app().await;
    let (status, body) = post(
        &app,
        "/api/v1/users",
        json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@uni.edu",
            "document_number": "CC-2002",
            "role_id": 999,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("role_id"));
}

#[tokio::test]
async fn test_duplicate_user_email_is_409() {
    let app = test_app().await;
    let teacher = seed_teacher(&app).await;
    let (_, user) = get(&app, &format!("/api/v1/users/{teacher}")).await;

    let (status, _) = post(
        &app,
        "/api/v1/users",
        json!({
            "first_name": "Other",
            "last_name": "Person",
            "email": "ADA@uni.edu",
            "document_number": "CC-9999",
            "role_id": user["role_id"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_campus_lists_its_spaces() {
    let app = test_app().await;
    let space_id = seed_space(&app).await;
    let (_, space) = get(&app, &format!("/api/v1/spaces/{space_id}")).await;
    let campus_id = space["campus_id"].as_i64().unwrap();

    let (status, spaces) = get(&app, &format!("/api/v1/campuses/{campus_id}/spaces")).await;
    assert_eq!(status, StatusCode::OK);
    let spaces = spaces.as_array().unwrap();
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0]["space_type"], "classroom");

    let (status, _) = get(&app, "/api/v1/campuses/404/spaces").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schedule_with_inverted_range_is_400() {
    let app = test_app().await;
    let (status, _) = post(
        &app,
        "/api/v1/schedules",
        json!({ "day_of_week": "friday", "start_time": "12:00:00", "end_time": "09:00:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_class_booking_and_evaluations() {
    let app = test_app().await;
    let teacher_id = seed_teacher(&app).await;
    let space_id = seed_space(&app).await;
    let schedule_id = seed_schedule(&app).await;

    let class_id = create(
        &app,
        "/api/v1/classes",
        json!({
            "name": "Algebra",
            "teacher_id": teacher_id,
            "space_id": space_id,
            "schedule_id": schedule_id,
        }),
    )
    .await;

    let (status, _) = post(
        &app,
        "/api/v1/classes",
        json!({
            "name": "Geometry",
            "teacher_id": teacher_id,
            "space_id": space_id,
            "schedule_id": schedule_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, classes) = get(&app, &format!("/api/v1/users/{teacher_id}/classes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classes[0]["name"], "Algebra");

    for (name, date) in [("Final", "2026-06-20"), ("Midterm", "2026-04-10")] {
        create(
            &app,
            "/api/v1/evaluations",
            json!({
                "class_id": class_id,
                "name": name,
                "evaluation_date": date,
                "weight": 40.0,
            }),
        )
        .await;
    }

    let (status, evaluations) =
        get(&app, &format!("/api/v1/classes/{class_id}/evaluations")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = evaluations
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Midterm", "Final"]);

    let (status, _) = post(
        &app,
        "/api/v1/evaluations",
        json!({
            "class_id": class_id,
            "name": "Quiz",
            "evaluation_date": "2026-05-01",
            "weight": 0.0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app().await;
    let (status, _) = get(&app, "/api/v1/buildings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_stays_editable_after_role_is_deleted() {
    let app = test_app().await;
    let user_id = seed_teacher(&app).await;
    let (_, user) = get(&app, &format!("/api/v1/users/{user_id}")).await;
    let role_id = user["role_id"].as_i64().unwrap();

    let (status, _) = delete(&app, &format!("/api/v1/roles/{role_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = put(
        &app,
        &format!("/api/v1/users/{user_id}"),
        json!({ "phone": "555" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["phone"], "555");
    assert_eq!(updated["role_id"], role_id);

    let other_role = create(&app, "/api/v1/roles", json!({ "name": "Staff" })).await;
    delete(&app, &format!("/api/v1/roles/{other_role}")).await;
    let (status, body) = put(
        &app,
        &format!("/api/v1/users/{user_id}"),
        json!({ "role_id": other_role }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("role_id"));
}

#[tokio::test]
async fn test_class_stays_editable_after_space_is_deleted() {
    let app = test_app().await;
    let teacher_id = seed_teacher(&app).await;
    let space_id = seed_space(&app).await;
    let schedule_id = seed_schedule(&app).await;
    let class_id = create(
        &app,
        "/api/v1/classes",
        json!({
            "name": "Algebra",
            "teacher_id": teacher_id,
            "space_id": space_id,
            "schedule_id": schedule_id,
        }),
    )
    .await;

    delete(&app, &format!("/api/v1/spaces/{space_id}")).await;
    let (status, updated) = put(
        &app,
        &format!("/api/v1/classes/{class_id}"),
        json!({ "description": "Moved online" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["description"], "Moved online");
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_body() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api/v1/roles/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_query_uses_error_body() {
    let app = test_app().await;
    for uri in ["/api/v1/roles?limit=abc", "/api/v1/roles/search?q=x&skip=-1"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["status"], 400, "{uri}");
    }
}
