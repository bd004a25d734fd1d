pub mod author;
pub mod config;
pub mod entity;
pub mod error;
pub mod guard;
pub mod post;
pub mod repository;
pub mod search;
pub mod tracing;

use std::sync::Arc;

use inkpost_common::id::worker::WorkerIdGenerator;
use tokio::sync::Mutex;

use crate::{
    author::{
        create_author_command::CreateAuthorCommand, delete_author_command::DeleteAuthorCommand,
        model::Author, query_manager::AuthorQueryManager,
        update_author_command::UpdateAuthorCommand,
    },
    config::AppConfig,
    error::AppResult,
    post::{
        create_post_command::CreatePostCommand,
        delete_post_command::DeletePostCommand,
        model::Post,
        publish_post_command::{PublishPostCommand, UnpublishPostCommand},
        query_manager::PostQueryManager,
        update_post_command::UpdatePostCommand,
    },
    repository::{EntityRepositoryArc, memory::MemoryRepository},
};

/// Every author and post use case, wired over shared repositories.
#[derive(Debug, Clone)]
pub struct ContentService {
    pub author_query_manager: AuthorQueryManager,
    pub create_author_command: CreateAuthorCommand,
    pub update_author_command: UpdateAuthorCommand,
    pub delete_author_command: DeleteAuthorCommand,
    pub post_query_manager: PostQueryManager,
    pub create_post_command: CreatePostCommand,
    pub update_post_command: UpdatePostCommand,
    pub delete_post_command: DeletePostCommand,
    pub publish_post_command: PublishPostCommand,
    pub unpublish_post_command: UnpublishPostCommand,
}

impl ContentService {
    /// # Errors
    ///
    /// Returns an error if a search engine rejects its entity schema.
    pub fn new(
        id_generator: WorkerIdGenerator,
        author_repository: EntityRepositoryArc<Author>,
        post_repository: EntityRepositoryArc<Post>,
    ) -> AppResult<Self> {
        let id_generator = Arc::new(Mutex::new(id_generator));

        Ok(Self {
            author_query_manager: AuthorQueryManager::new(author_repository.clone())?,
            create_author_command: CreateAuthorCommand::new(
                id_generator.clone(),
                author_repository.clone(),
            ),
            update_author_command: UpdateAuthorCommand::new(author_repository.clone()),
            delete_author_command: DeleteAuthorCommand::new(author_repository.clone()),
            post_query_manager: PostQueryManager::new(post_repository.clone())?,
            create_post_command: CreatePostCommand::new(
                id_generator,
                author_repository,
                post_repository.clone(),
            ),
            update_post_command: UpdatePostCommand::new(post_repository.clone()),
            delete_post_command: DeletePostCommand::new(post_repository.clone()),
            publish_post_command: PublishPostCommand::new(post_repository.clone()),
            unpublish_post_command: UnpublishPostCommand::new(post_repository),
        })
    }

    /// In-memory service for the node described by `config`.
    ///
    /// # Errors
    ///
    /// See [`ContentService::new`].
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        create_content_service(config.node.worker_number)
    }
}

/// In-memory service with ids minted for `worker_number`.
///
/// # Errors
///
/// See [`ContentService::new`].
pub fn create_content_service(worker_number: u16) -> AppResult<ContentService> {
    ContentService::new(
        WorkerIdGenerator::new(worker_number),
        Arc::new(MemoryRepository::<Author>::new()),
        Arc::new(MemoryRepository::<Post>::new()),
    )
}
