//! Authors: people who write posts, unique by email.

pub mod create_author_command;
pub mod delete_author_command;
pub mod model;
pub mod query_manager;
pub mod update_author_command;
