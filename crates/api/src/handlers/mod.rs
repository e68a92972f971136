//! Request handlers.
//!
//! Public reads delegate to the degrading `Directory` service in
//! `tooldir_db`; writes call the repositories directly and map errors via
//! [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod bookmarks;
pub mod news;
pub mod newsletter;
pub mod outbound;
pub mod tools;
