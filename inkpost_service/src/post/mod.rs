//! Post management. Posts belong to an author and are addressed by a unique
//! slug derived from their title.

pub mod create_post_command;
pub mod delete_post_command;
pub mod model;
pub mod publish_post_command;
pub mod query_manager;
pub mod update_post_command;
