//! HTTP-level integration tests for quiz submission and progress.

mod common;

use std::collections::HashMap;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_json, post_json_auth, seed_catalog, signed_in};
use learnpath_db::repositories::{QuestionRepo, TopicRepo};
use sqlx::PgPool;

/// The "JavaScript Basics" topic id and its `(question_id, correct letter)` pairs.
async fn basics_key(pool: &PgPool) -> (i64, Vec<(i64, &'static str)>) {
    let topic = TopicRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.title == "JavaScript Basics")
        .expect("seeded topic");
    let key = QuestionRepo::list_by_topic(pool, topic.id)
        .await
        .unwrap()
        .iter()
        .map(|q| (q.id, q.correct_option.as_str()))
        .collect();
    (topic.id, key)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_grades_against_stored_key(pool: PgPool) {
    seed_catalog(&pool).await;
    let (_user_id, token) = signed_in(&pool, "Quinn", "quinn@example.com").await;
    let (topic_id, key) = basics_key(&pool).await;

    // First answer right (upper-case), second wrong.
    let mut answers: HashMap<String, String> = HashMap::new();
    answers.insert(key[0].0.to_string(), key[0].1.to_uppercase());
    answers.insert(key[1].0.to_string(), "b".to_string());

    let body = serde_json::json!({ "topic_id": topic_id, "answers": answers });
    let response = post_json_auth(build_test_app(pool), "/api/quiz/attempt", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["score"], 1);
    assert_eq!(json["total_questions"], 2);
    assert_eq!(json["percentage"], 50.0);
    assert_eq!(json["message"], "Quiz completed successfully");
    assert!(json["attempt_id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_requires_authentication(pool: PgPool) {
    let body = serde_json::json!({ "topic_id": 1, "answers": {} });
    let response = post_json(build_test_app(pool), "/api/quiz/attempt", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_for_unknown_topic_is_404(pool: PgPool) {
    let (_user_id, token) = signed_in(&pool, "Quinn", "quinn@example.com").await;

    let body = serde_json::json!({ "topic_id": 4242, "answers": {} });
    let response = post_json_auth(build_test_app(pool), "/api/quiz/attempt", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_for_topic_without_questions_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/topics/seed",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let (_user_id, token) = signed_in(&pool, "Quinn", "quinn@example.com").await;
    let (topic_id, key) = basics_key(&pool).await;
    assert!(key.is_empty());

    let body = serde_json::json!({ "topic_id": topic_id, "answers": {} });
    let response = post_json_auth(build_test_app(pool), "/api/quiz/attempt", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_lists_attempts_newest_first(pool: PgPool) {
    seed_catalog(&pool).await;
    let (user_id, token) = signed_in(&pool, "Quinn", "quinn@example.com").await;
    let (topic_id, key) = basics_key(&pool).await;

    let all_right: HashMap<String, &str> =
        key.iter().map(|(id, letter)| (id.to_string(), *letter)).collect();
    for answers in [serde_json::json!({}), serde_json::json!(all_right)] {
        let body = serde_json::json!({ "topic_id": topic_id, "answers": answers });
        let response =
            post_json_auth(build_test_app(pool.clone()), "/api/quiz/attempt", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/quiz/progress/{user_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let attempts = json["data"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["percentage"], 100.0);
    assert_eq!(attempts[0]["topic_name"], "JavaScript Basics");
    assert_eq!(attempts[1]["percentage"], 0.0);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/quiz/progress/{user_id}?limit=1&offset=1"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["percentage"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_of_another_learner_is_forbidden(pool: PgPool) {
    let (other_id, _) = signed_in(&pool, "Other", "other@example.com").await;
    let (_user_id, token) = signed_in(&pool, "Quinn", "quinn@example.com").await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/quiz/progress/{other_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seeding_questions_is_idempotent(pool: PgPool) {
    seed_catalog(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/quiz/seed-questions",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["inserted"], 0);
    assert_eq!(json["message"], "Questions seeded successfully");
}
