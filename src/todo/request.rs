//! Request bodies for the create and update endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::model::{NewTodo, Todo};

/// Body of `POST /todos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl CreateTodoRequest {
    /// Build the record to insert, stamping both timestamps with `now`.
    ///
    /// Returns `None` when the title is missing or empty.
    pub fn into_new_todo(self, now: DateTime<Utc>) -> Option<NewTodo> {
        let title = self.title.filter(|t| !t.is_empty())?;

        Some(NewTodo {
            title,
            description: self.description.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Body of `PUT /todos/:id`.
///
/// A field is `Some` only when the key is present in the JSON object, so
/// `{"completed": false}` still applies. An explicit `null` is a decode
/// error rather than a silent no-op.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TodoPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TodoPatch {
    /// True when no field would change (only `updatedAt` advances)
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Apply the present fields to `todo` and advance `updatedAt`
    pub fn apply(&self, todo: &mut Todo, updated_at: DateTime<Utc>) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        todo.updated_at = updated_at;
    }
}
