use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::coerce;

/// A single todo record, serialized with camelCase keys.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Create input. Unknown keys (including a client-sent `id`) are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    #[serde(default, deserialize_with = "coerce::text")]
    pub title: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: String,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Partial update. `None` means the field was omitted and keeps its value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(default, deserialize_with = "coerce::present_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::present_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::present_flag")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Current time at the precision the records are persisted with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Todo {
    /// Build a record from create input: text trimmed, both timestamps equal.
    pub fn create(id: String, input: NewTodo, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            completed: input.completed,
            created_at: at,
            updated_at: at,
        }
    }

    /// Apply the present fields of `patch` and stamp `updated_at`, even when
    /// nothing else changed.
    pub fn apply(&mut self, patch: TodoPatch, at: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = at;
    }
}

/// ISO 8601 in UTC with millisecond precision, e.g. `2025-08-30T06:33:04.500Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_trims_and_stamps_once() {
        let at = now();
        let todo = Todo::create("x".into(), NewTodo::new(" Buy milk ").description("  2L "), at);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2L");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn serializes_camel_case_with_millis() {
        let at = DateTime::parse_from_rfc3339("2025-08-30T06:33:04.500Z").unwrap().with_timezone(&Utc);
        let todo = Todo::create("0j6c5eol".into(), NewTodo::new("Buy grocery").description("Tomato"), at);
        let v = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            v,
            json!({
                "id": "0j6c5eol",
                "title": "Buy grocery",
                "description": "Tomato",
                "completed": false,
                "createdAt": "2025-08-30T06:33:04.500Z",
                "updatedAt": "2025-08-30T06:33:04.500Z"
            })
        );
        let back: Todo = serde_json::from_value(v).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn new_todo_decodes_leniently() {
        let input: NewTodo = serde_json::from_value(json!({
            "id": "client-chosen",
            "title": 7,
            "description": null,
            "completed": "yes"
        }))
        .unwrap();
        assert_eq!(input, NewTodo::new("7").completed(true));

        let empty: NewTodo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, NewTodo::default());

        let falsy: NewTodo =
            serde_json::from_value(json!({"title": false, "description": 0})).unwrap();
        assert_eq!(falsy, NewTodo::default());
    }

    #[test]
    fn patch_tells_missing_from_null() {
        let patch: TodoPatch = serde_json::from_value(json!({"title": null, "completed": 0})).unwrap();
        assert_eq!(patch.title.as_deref(), Some(""));
        assert_eq!(patch.description, None);
        assert_eq!(patch.completed, Some(false));

        let falsy: TodoPatch = serde_json::from_value(json!({"title": false})).unwrap();
        assert_eq!(falsy.title.as_deref(), Some(""));

        let none: TodoPatch = serde_json::from_value(json!({})).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn apply_keeps_omitted_fields() {
        let t0 = DateTime::parse_from_rfc3339("2024-01-01T00:00:00.000Z").unwrap().with_timezone(&Utc);
        let mut todo = Todo::create("a".into(), NewTodo::new("keep").description("me"), t0);
        let t1 = now();
        todo.apply(TodoPatch { completed: Some(true), ..TodoPatch::default() }, t1);
        assert_eq!(todo.title, "keep");
        assert_eq!(todo.description, "me");
        assert!(todo.completed);
        assert_eq!(todo.created_at, t0);
        assert_eq!(todo.updated_at, t1);
    }
}
