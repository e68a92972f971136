//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs where the API accepts input for that table
//! - Hydrated view types that combine a row with its relations

pub mod bookmark;
pub mod category;
pub mod click_event;
pub mod dashboard;
pub mod news;
pub mod newsletter;
pub mod tag;
pub mod tool;
pub mod user;
