//! Integration tests for the file-backed task store: persistence across
//! store instances, degradation on bad files, and write discipline.

use taskd::store::{Task, TaskStore};
use tempfile::TempDir;

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        ..Task::default()
    }
}

#[tokio::test]
async fn absent_file_is_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.json"));

    assert!(store.list().await.is_empty());
    assert_eq!(store.get("1").await, None);
    // Listing must not create the file.
    assert!(!dir.path().join("tasks.json").exists());
}

#[tokio::test]
async fn tasks_survive_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::open(&path);
    store.create(task("1", "persisted")).await.unwrap();
    drop(store);

    let reopened = TaskStore::open(&path);
    assert_eq!(reopened.list().await, vec![task("1", "persisted")]);
}

#[tokio::test]
async fn create_then_get_then_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.json"));

    store
        .create(Task {
            id: "1".to_string(),
            title: "Buy milk".to_string(),
            description: "two litres".to_string(),
            assignee: "me".to_string(),
            date: "2020-01-01".to_string(),
            status: "open".to_string(),
        })
        .await
        .unwrap();

    let listed = store.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Buy milk");

    let fetched = store.get("1").await.unwrap();
    assert_eq!(fetched.description, "two litres");

    assert!(store.delete("1").await.unwrap());
    assert_eq!(store.get("1").await, None);
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_and_recovers_on_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "}}} definitely not json").unwrap();

    let store = TaskStore::open(&path);
    assert!(store.list().await.is_empty());

    store.create(task("1", "fresh start")).await.unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&contents).unwrap();
    assert_eq!(decoded, vec![task("1", "fresh start")]);
}

#[tokio::test]
async fn missed_delete_and_replace_write_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::open(&path);
    store.create(task("1", "only")).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    assert!(!store.delete("missing").await.unwrap());
    assert!(!store.replace("missing", task("missing", "ghost")).await.unwrap());

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn writes_leave_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::open(&path);
    store.create(task("1", "one")).await.unwrap();
    store.replace("1", task("1", "two")).await.unwrap();
    store.delete("1").await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["tasks.json".to_string()]);
}

#[tokio::test]
async fn file_holds_a_plain_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::open(&path);
    store.create(task("1", "one")).await.unwrap();
    store.create(task("2", "two")).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id"], "1");
    assert_eq!(array[1]["title"], "two");
    // Every field is present as a string, even when empty.
    assert_eq!(array[0]["assignee"], "");
}
