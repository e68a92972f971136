//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return `sqlx::Error` unchanged.

pub mod bookmark_repo;
pub mod category_repo;
pub mod click_event_repo;
pub mod news_repo;
pub mod newsletter_repo;
pub mod tag_repo;
pub mod tool_repo;
pub mod user_repo;
pub mod vote_repo;

pub use bookmark_repo::BookmarkRepo;
pub use category_repo::CategoryRepo;
pub use click_event_repo::ClickEventRepo;
pub use news_repo::NewsRepo;
pub use newsletter_repo::NewsletterRepo;
pub use tag_repo::TagRepo;
pub use tool_repo::ToolRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
