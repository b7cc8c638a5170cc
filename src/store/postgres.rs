use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, TaskStore};
use crate::model::{Task, UpdateTask};

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, completed FROM tasks ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn create(&self, title: String) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title) VALUES ($1, $2) RETURNING id, title, completed",
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: Uuid, patch: UpdateTask) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks \
             SET title = COALESCE($2, title), completed = COALESCE($3, completed) \
             WHERE id = $1 \
             RETURNING id, title, completed",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
