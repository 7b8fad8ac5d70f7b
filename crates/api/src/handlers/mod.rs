pub mod auth;
pub mod quiz;
pub mod recommendations;
pub mod topics;
