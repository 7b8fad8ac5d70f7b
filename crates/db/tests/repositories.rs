//! Integration tests for the repository layer.
//!
//! Exercises every repository against a real database:
//! - User creation, lookup and the unique email constraint
//! - Catalog ordering and idempotent seeding
//! - Attempt history ordering and pagination
//! - Transactional recommendation recording

use learnpath_core::catalog::{SEED_QUESTIONS, SEED_TOPICS};
use learnpath_core::levels::{Difficulty, DifficultyAdjustment, Level, OptionLetter};
use learnpath_db::models::attempt::CreateAttempt;
use learnpath_db::models::question::CreateQuestion;
use learnpath_db::models::recommendation::CreateRecommendation;
use learnpath_db::models::topic::{CreateTopic, Topic};
use learnpath_db::models::user::{CreateUser, User};
use learnpath_db::repositories::{
    AttemptRepo, QuestionRepo, RecommendationRepo, TopicRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test Learner".to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

async fn new_topic(pool: &PgPool, title: &str, difficulty: Difficulty) -> Topic {
    TopicRepo::create(
        pool,
        &CreateTopic {
            title: title.to_string(),
            description: None,
            difficulty_level: difficulty,
        },
    )
    .await
    .expect("topic creation should succeed")
}

fn attempt(user_id: i64, topic: &Topic, score: i32, total: i32) -> CreateAttempt {
    CreateAttempt {
        user_id,
        topic_id: topic.id,
        score,
        total_questions: total,
        percentage: f64::from(score) / f64::from(total) * 100.0,
        difficulty_level: topic.difficulty_level,
    }
}

fn recommendation(user_id: i64, topic: &str, level: Level) -> CreateRecommendation {
    CreateRecommendation {
        user_id,
        recommended_topic: topic.to_string(),
        difficulty_adjustment: DifficultyAdjustment::Maintain,
        current_level: level,
        reasoning: "Steady progress - maintaining current difficulty level".to_string(),
        recommendation_reason: Some("Starting with easy topics".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_user_starts_as_beginner(pool: PgPool) {
    let user = new_user(&pool, "ada@example.com").await;
    assert_eq!(user.current_level, Level::Beginner);

    let found = UserRepo::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .expect("user should be found by email");
    assert_eq!(found.id, user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "dup@example.com").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Other".to_string(),
            email: "dup@example.com".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .expect_err("duplicate email must fail");

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_topics_list_in_tier_order(pool: PgPool) {
    new_topic(&pool, "Hard One", Difficulty::Hard).await;
    new_topic(&pool, "Easy One", Difficulty::Easy).await;
    new_topic(&pool, "Medium One", Difficulty::Medium).await;
    new_topic(&pool, "Easy Two", Difficulty::Easy).await;

    let titles: Vec<String> = TopicRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["Easy One", "Easy Two", "Medium One", "Hard One"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeding_is_idempotent(pool: PgPool) {
    let first = TopicRepo::seed(&pool, SEED_TOPICS).await.unwrap();
    let second = TopicRepo::seed(&pool, SEED_TOPICS).await.unwrap();
    assert_eq!(first, SEED_TOPICS.len() as u64);
    assert_eq!(second, 0);

    let q_first = QuestionRepo::seed(&pool, SEED_QUESTIONS).await.unwrap();
    let q_second = QuestionRepo::seed(&pool, SEED_QUESTIONS).await.unwrap();
    assert_eq!(q_first, SEED_QUESTIONS.len() as u64);
    assert_eq!(q_second, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_question_seeding_skips_missing_topics(pool: PgPool) {
    let inserted = QuestionRepo::seed(&pool, SEED_QUESTIONS).await.unwrap();
    assert_eq!(inserted, 0, "no topics exist yet");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_questions_decode_answer_key(pool: PgPool) {
    let topic = new_topic(&pool, "Rust", Difficulty::Medium).await;
    QuestionRepo::create(
        &pool,
        &CreateQuestion {
            topic_id: topic.id,
            question_text: "Which keyword declares an immutable binding?".to_string(),
            option_a: "mut".to_string(),
            option_b: "let".to_string(),
            option_c: "var".to_string(),
            option_d: "const fn".to_string(),
            correct_option: OptionLetter::B,
            difficulty_level: Difficulty::Medium,
        },
    )
    .await
    .unwrap();

    let questions = QuestionRepo::list_by_topic(&pool, topic.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answer_key().correct_option, OptionLetter::B);
}

// ---------------------------------------------------------------------------
// Attempts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attempt_history_is_newest_first_and_paginated(pool: PgPool) {
    let user = new_user(&pool, "hist@example.com").await;
    let easy = new_topic(&pool, "Easy", Difficulty::Easy).await;
    let hard = new_topic(&pool, "Hard", Difficulty::Hard).await;

    AttemptRepo::create(&pool, &attempt(user.id, &easy, 1, 4)).await.unwrap();
    AttemptRepo::create(&pool, &attempt(user.id, &hard, 2, 4)).await.unwrap();
    let newest = AttemptRepo::create(&pool, &attempt(user.id, &easy, 4, 4))
        .await
        .unwrap();

    let all = AttemptRepo::list_for_user(&pool, user.id, 10, 0).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, newest.id);
    assert_eq!(all[0].topic_name, "Easy");
    assert_eq!(all[0].percentage, 100.0);
    assert_eq!(all[1].topic_difficulty, Difficulty::Hard);

    let recent = AttemptRepo::recent_for_user(&pool, user.id, 2).await.unwrap();
    assert_eq!(recent.len(), 2);

    let page = AttemptRepo::list_for_user(&pool, user.id, 10, 2).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].percentage, 25.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attempt_requires_existing_user(pool: PgPool) {
    let topic = new_topic(&pool, "Orphan", Difficulty::Easy).await;
    let result = AttemptRepo::create(&pool, &attempt(424_242, &topic, 1, 1)).await;
    assert!(result.is_err(), "foreign key must reject unknown user");
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_updates_level_and_appends(pool: PgPool) {
    let user = new_user(&pool, "rec@example.com").await;

    RecommendationRepo::record(&pool, &recommendation(user.id, "First", Level::Beginner))
        .await
        .unwrap();
    let second = RecommendationRepo::record(
        &pool,
        &recommendation(user.id, "Second", Level::Intermediate),
    )
    .await
    .unwrap();
    assert_eq!(second.current_level, Level::Intermediate);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.current_level, Level::Intermediate);

    let history = RecommendationRepo::list_for_user(&pool, user.id, 10, 0)
        .await
        .unwrap();
    let topics: Vec<&str> = history.iter().map(|r| r.recommended_topic.as_str()).collect();
    assert_eq!(topics, ["Second", "First"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_for_unknown_user_writes_nothing(pool: PgPool) {
    let err = RecommendationRepo::record(&pool, &recommendation(31_337, "Ghost", Level::Advanced))
        .await
        .expect_err("unknown user must fail");
    assert!(matches!(err, sqlx::Error::RowNotFound));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_insert_rolls_back_level_change(pool: PgPool) {
    let user = new_user(&pool, "rollback@example.com").await;

    // PostgreSQL rejects NUL bytes in TEXT, so the insert fails after the level update.
    RecommendationRepo::record(&pool, &recommendation(user.id, "Bad\0Topic", Level::Advanced))
        .await
        .expect_err("insert with a NUL byte must fail");

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.current_level, Level::Beginner);
}
