use chrono::{NaiveDate, TimeZone, Utc};
use tasklist_core::{Category, NewTask, Priority, Task, TaskId, TaskStore};

#[test]
fn snapshot_uses_camel_case_wire_fields() {
    let mut store = TaskStore::new();
    let id = store.allocate_id().unwrap();
    let created = Utc.with_ymd_and_hms(2024, 2, 1, 10, 30, 0).unwrap();
    let task = Task::create(
        id,
        NewTask::new("pick up parcel", Category::Shopping, Priority::Medium)
            .with_due_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()),
        created,
    )
    .unwrap();
    store.add(task);

    let json: serde_json::Value = serde_json::from_slice(&store.serialize().unwrap()).unwrap();
    assert_eq!(json["nextId"], 2);
    let todo = &json["todos"][0];
    assert_eq!(todo["id"], 1);
    assert_eq!(todo["category"], "shopping");
    assert_eq!(todo["priority"], "medium");
    assert_eq!(todo["dueDate"], "2024-02-03");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["createdAt"], "2024-02-01T10:30:00Z");
    assert!(todo["completedAt"].is_null());

    let restored = TaskStore::deserialize(&store.serialize().unwrap());
    assert_eq!(restored, store);
}

#[test]
fn lagging_next_id_is_raised_past_stored_ids() {
    let bytes = br#"{"todos":[
        {"id":7,"text":"old","category":"work","priority":"low","dueDate":null,
         "completed":true,"createdAt":"2024-01-01T00:00:00.000Z",
         "completedAt":"2024-01-02T00:00:00.000Z"}
    ],"nextId":3}"#;

    let store = TaskStore::deserialize(bytes);
    assert_eq!(store.len(), 1);
    assert_eq!(store.next_id(), Some(TaskId(8)));
}

#[test]
fn unknown_category_falls_back_to_empty_store() {
    let bytes = br#"{"todos":[{"id":1,"text":"x","category":"hobby","priority":"low",
        "completed":false,"createdAt":"2024-01-01T00:00:00Z"}],"nextId":2}"#;

    let store = TaskStore::deserialize(bytes);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), Some(TaskId::FIRST));
}
