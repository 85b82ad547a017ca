//! Splynx response bodies.
//!
//! Endpoints answer either with the payload itself or wrapped as
//! `{"data": ...}`. Both shapes decode to the same value.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Strip a top-level `{"data": ...}` wrapper if present.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode a response body into `T`, accepting both envelope shapes.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    serde_json::from_value(unwrap_data(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use splynx_core::{Comment, Location, Project, Task};

    #[test]
    fn bare_list() {
        let comments: Vec<Comment> = decode(
            r#"[{"id": 1, "task_id": 42, "created_at": "2024-03-05 09:00:00",
                 "admin_name": "Ana", "comment": "ok"}]"#,
        )
        .unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].task_id, 42);
        assert_eq!(comments[0].body(), "ok");
    }

    #[test]
    fn wrapped_list() {
        let projects: Vec<Project> =
            decode(r#"{"data": [{"id": "1", "title": "Fibra"}, {"id": 2}]}"#).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title.as_deref(), Some("Fibra"));
        assert_eq!(projects[1].title, None);
    }

    #[test]
    fn wrapped_and_bare_single_task() {
        let body = r#"{"id": 42, "title": "Instalación Fibra", "closed": "1"}"#;
        let bare: Task = decode(body).unwrap();
        let wrapped: Task = decode(&format!(r#"{{"data": {body}}}"#)).unwrap();
        assert_eq!(bare, wrapped);
        assert!(bare.closed);
    }

    #[test]
    fn realistic_task_payload() {
        let task: Task = decode(
            r#"{
                "id": "1187",
                "project_id": "4",
                "location_id": "0",
                "title": "Sin señal - revisar ONU",
                "description": "<p>cliente sin servicio</p>",
                "address": "Belgrano 1450",
                "assignee": null,
                "is_scheduled": "1",
                "scheduled_from": "2024-03-05 14:00:00",
                "closed": "0",
                "customer": {"id": 5021, "name": "Gómez, Laura"}
            }"#,
        )
        .unwrap();
        assert_eq!(task.id, 1187);
        assert_eq!(task.location_id, Some(0));
        assert_eq!(task.assignee, None);
        assert!(task.is_scheduled);
        assert!(!task.closed);
        assert_eq!(task.customer.and_then(|c| c.name).as_deref(), Some("Gómez, Laura"));
    }

    #[test]
    fn locations_without_name() {
        let locations: Vec<Location> = decode(r#"[{"id": 3}]"#).unwrap();
        assert_eq!(locations[0].name, None);
    }

    #[test]
    fn one_malformed_reference_does_not_reject_the_listing() {
        let tasks: Vec<Task> = decode(
            r#"{"data": [
                {"id": "1", "title": "Instalación", "project_id": "3", "assignee": "29"},
                {"id": "2", "title": "Reparación", "project_id": "N/A", "assignee": "29"},
                {"id": "3", "title": "Retiro", "location_id": {"bogus": true}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].project_id, Some(3));
        assert_eq!(tasks[1].project_id, None);
        assert_eq!(tasks[1].assignee, Some(29));
        assert_eq!(tasks[2].location_id, None);
    }

    #[test]
    fn malformed_task_id_still_rejects_the_listing() {
        let err = decode::<Vec<Task>>(r#"{"data": [{"id": "1"}, {"id": "N/A"}]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid identifier"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(decode::<Vec<Task>>("<html>502 Bad Gateway</html>").is_err());
    }
}
