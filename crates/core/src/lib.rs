//! Domain logic for the tool directory.
//!
//! Everything here is free of database and HTTP concerns. The only I/O seam
//! is [`hydration::RelationSource`], implemented by `tooldir-db` over the
//! join tables and by in-memory spies in tests.

pub mod admin_form;
pub mod compliance;
pub mod error;
pub mod hydration;
pub mod json_fields;
pub mod newsletter;
pub mod outbound;
pub mod relations;
pub mod roles;
pub mod slug;
pub mod tool_filter;
pub mod types;
pub mod votes;
