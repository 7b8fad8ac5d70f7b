//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod attempt_repo;
pub mod question_repo;
pub mod recommendation_repo;
pub mod topic_repo;
pub mod user_repo;

pub use attempt_repo::AttemptRepo;
pub use question_repo::QuestionRepo;
pub use recommendation_repo::RecommendationRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
