use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task record as it travels over the wire and sits in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

/// Body of `POST /api/tasks`. A missing title must reach the handler and
/// come back as a 400, never as a body-decode rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
}

/// Partial patch for `PUT /api/tasks/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_to_the_wire_shape() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            completed: false,
        };

        let value = serde_json::to_value(&task).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert!(object["id"].is_string());
        assert_eq!(object["title"], "Buy milk");
        assert_eq!(object["completed"], false);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = UpdateTask::default();
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn patch_deserializes_missing_fields_as_none() {
        let patch: UpdateTask = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn create_body_tolerates_missing_title() {
        let body: CreateTask = serde_json::from_str("{}").unwrap();
        assert_eq!(body.title, None);
    }
}
