use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::{StoreError, TaskStore};
use crate::model::{Task, UpdateTask};

/// In-memory store keeping tasks in insertion order, so a listing matches
/// what the database-backed store would return. Backs the test suite.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().unwrap().clone())
    }

    async fn create(&self, title: String) -> Result<Task, StoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            title,
            completed: false,
        };
        self.tasks.write().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, patch: UpdateTask) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().unwrap();
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        Ok(tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_completed(completed: bool) -> UpdateTask {
        UpdateTask {
            title: None,
            completed: Some(completed),
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_defaults() {
        let store = MemoryTaskStore::new();

        let first = store.create("Buy milk".to_string()).await.unwrap();
        let second = store.create("Walk the dog".to_string()).await.unwrap();

        assert_eq!(first.title, "Buy milk");
        assert!(!first.completed);
        assert_ne!(first.id, second.id);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn update_patches_only_the_given_fields() {
        let store = MemoryTaskStore::new();
        let task = store.create("Buy milk".to_string()).await.unwrap();

        let toggled = store
            .update(task.id, patch_completed(true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(toggled.title, "Buy milk");
        assert!(toggled.completed);

        let retitled = store
            .update(
                task.id,
                UpdateTask {
                    title: Some("Buy oat milk".to_string()),
                    completed: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retitled.title, "Buy oat milk");
        assert!(retitled.completed);
    }

    #[tokio::test]
    async fn update_of_missing_id_returns_none() {
        let store = MemoryTaskStore::new();
        let result = store.update(Uuid::new_v4(), patch_completed(true)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn double_toggle_restores_the_original_value() {
        let store = MemoryTaskStore::new();
        let task = store.create("Buy milk".to_string()).await.unwrap();

        store.update(task.id, patch_completed(true)).await.unwrap();
        let back = store
            .update(task.id, patch_completed(false))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(back.completed, task.completed);
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_leaves_other_records_alone() {
        let store = MemoryTaskStore::new();
        let keep = store.create("Keep me".to_string()).await.unwrap();
        let gone = store.create("Delete me".to_string()).await.unwrap();

        assert!(store.delete(gone.id).await.unwrap());
        assert!(!store.delete(gone.id).await.unwrap());
        assert!(!store.delete(Uuid::new_v4()).await.unwrap());

        assert_eq!(store.list().await.unwrap(), vec![keep]);
    }
}
