//! Domain types and pure logic for the learnpath platform.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it for grading, recommendation and validation.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod grading;
pub mod levels;
pub mod pagination;
pub mod recommendation;
pub mod types;
