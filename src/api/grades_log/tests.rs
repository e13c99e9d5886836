use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::test_support::{self, TestContext};

async fn get(
    ctx: &TestContext,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, uri, token, None))
        .await
        .expect("response");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

#[tokio::test]
#[ignore = "requires the test database"]
async fn grade_log_by_user_and_activity() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();
    let teacher = test_support::insert_user(db, "luis@school.edu", "Luis", "Gómez", 2).await;
    let ana = test_support::insert_user(db, "ana@school.edu", "Ana", "Pérez", 3).await;
    let beto = test_support::insert_user(db, "beto@school.edu", "Beto", "Soto", 3).await;
    let assignment = test_support::insert_assignment(db, teacher.user_id, "Historia").await;
    let essay = test_support::insert_activity(db, assignment, "Ensayo", 30.0).await;
    test_support::insert_grade(db, essay, ana.user_id, 15.5).await;
    test_support::insert_grade(db, essay, beto.user_id, 12.0).await;
    let token = test_support::bearer_token(ana.user_id, ctx.state.settings());

    let (status, body) =
        get(&ctx, &format!("/api/grades-log/user/{}", ana.user_id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    let grades = body["grades"].as_array().expect("grades");
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0]["activity_id"], essay);
    assert_eq!(grades[0]["score"], 15.5);
    assert_eq!(grades[0]["subject_name"], "Historia");
    assert_eq!(grades[0]["teacher_name"], "Luis Gómez");
    assert_eq!(grades[0]["title"], "Ensayo");

    let (status, body) =
        get(&ctx, &format!("/api/grades-log/activity/{essay}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["grades"].as_array().map(Vec::len), Some(2));

    let (status, body) =
        get(&ctx, &format!("/api/activities/activity/{essay}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["activity"]["weight_percentage"], 30.0);
    assert_eq!(body["activity"]["subject_name"], "Historia");
}

#[tokio::test]
#[ignore = "requires the test database"]
async fn grade_log_follows_report_visibility() {
    let ctx = test_support::setup_test_context().await;
    let db = ctx.state.db();
    let teacher = test_support::insert_user(db, "luis@school.edu", "Luis", "Gómez", 2).await;
    let ana = test_support::insert_user(db, "ana@school.edu", "Ana", "Pérez", 3).await;
    let beto = test_support::insert_user(db, "beto@school.edu", "Beto", "Soto", 3).await;
    let assignment = test_support::insert_assignment(db, teacher.user_id, "Historia").await;
    let essay = test_support::insert_activity(db, assignment, "Ensayo", 30.0).await;
    test_support::insert_grade(db, essay, ana.user_id, 15.5).await;
    let uri = format!("/api/grades-log/user/{}", ana.user_id);

    let (status, _) = get(&ctx, &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let classmate = test_support::bearer_token(beto.user_id, ctx.state.settings());
    let (status, body) = get(&ctx, &uri, Some(&classmate)).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "response: {body}");
    assert!(body.get("grades").is_none());

    let staff = test_support::bearer_token(teacher.user_id, ctx.state.settings());
    let (status, body) = get(&ctx, &uri, Some(&staff)).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["grades"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "requires the test database"]
async fn user_without_grades_gets_empty_list() {
    let ctx = test_support::setup_test_context().await;
    let ana = test_support::insert_user(ctx.state.db(), "ana@school.edu", "Ana", "Pérez", 3).await;
    let token = test_support::bearer_token(ana.user_id, ctx.state.settings());

    let (status, body) =
        get(&ctx, &format!("/api/grades-log/user/{}", ana.user_id), Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grades"], serde_json::json!([]));
}

#[tokio::test]
#[ignore = "requires the test database"]
async fn unknown_or_malformed_ids() {
    let ctx = test_support::setup_test_context().await;
    let admin =
        test_support::insert_user(ctx.state.db(), "dir@school.edu", "Dora", "Ruiz", 1).await;
    let token = test_support::bearer_token(admin.user_id, ctx.state.settings());

    for (uri, expected, detail) in [
        ("/api/grades-log/user/404", StatusCode::NOT_FOUND, "User not found"),
        ("/api/grades-log/activity/404", StatusCode::NOT_FOUND, "Activity not found"),
        ("/api/activities/activity/404", StatusCode::NOT_FOUND, "Activity not found"),
        ("/api/grades-log/user/1.5", StatusCode::BAD_REQUEST, "Invalid user id"),
        ("/api/grades-log/activity/x", StatusCode::BAD_REQUEST, "Invalid activity id"),
        ("/api/activities/activity/0", StatusCode::BAD_REQUEST, "Invalid activity id"),
    ] {
        let (status, body) = get(&ctx, uri, Some(&token)).await;
        assert_eq!(status, expected, "{uri}");
        assert_eq!(body["detail"], detail, "{uri}");
    }
}
