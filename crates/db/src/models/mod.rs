//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//!
//! Enumerated TEXT columns decode straight into the `learnpath_core::levels`
//! enums via `#[sqlx(try_from = "String")]`.

pub mod attempt;
pub mod question;
pub mod recommendation;
pub mod topic;
pub mod user;
