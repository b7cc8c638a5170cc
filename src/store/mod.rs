pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Task, UpdateTask};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for task records. Listing returns tasks in creation
/// order; update returns `None` when no record matches the id; delete
/// reports whether a record was actually removed.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn create(&self, title: String) -> Result<Task, StoreError>;

    async fn update(&self, id: Uuid, patch: UpdateTask) -> Result<Option<Task>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
