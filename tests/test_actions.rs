//! Tests for the entry points used by the console layer

mod common;

use common::{columns, csv_files, filled_collection, temp_store};
use splitcsv::pipeline::{
    create_config, delete_config, feed_line, list_configs, run_session, select_config,
    ConfigCollection, SessionEvent,
};
use splitcsv::SplitError;
use tempfile::TempDir;

#[test]
fn test_create_list_select_delete_cycle() {
    let (_dir, store) = temp_store();
    let empty = ConfigCollection::new();

    let one = create_config(&store, &empty, "orders", "\n", "\t", columns(&["id", "qty"])).unwrap();
    let two = create_config(&store, &one, "events", ";", "|", columns(&["ts"])).unwrap();

    let listed: Vec<&str> = list_configs(&two).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(listed, vec!["orders", "events"]);

    let picked = select_config(&two, 2).unwrap();
    assert_eq!(picked.name, "events");
    assert_eq!(picked.num_columns, 1);

    let after = delete_config(&store, &two, "orders").unwrap();
    assert_eq!(store.load().unwrap(), after);
    assert_eq!(after.names(), vec!["events"]);
}

#[test]
fn test_create_rejects_invalid_fields_without_saving() {
    let (_dir, store) = temp_store();
    let empty = ConfigCollection::new();

    let err = create_config(&store, &empty, "bad", "", ",", columns(&["a"])).unwrap_err();
    assert!(matches!(err, SplitError::InvalidConfig(_)));

    let err = create_config(&store, &empty, "a/b", "\n", ",", columns(&["a"])).unwrap_err();
    assert!(matches!(err, SplitError::InvalidConfig(_)));

    assert!(!store.path().exists());
}

#[test]
fn test_create_on_full_collection() {
    let (_dir, store) = temp_store();
    let full = filled_collection(4);

    let err = create_config(&store, &full, "extra", "\n", ",", columns(&["a"])).unwrap_err();
    assert!(matches!(err, SplitError::CapacityExceeded { .. }));
}

#[test]
fn test_select_out_of_range() {
    let collection = filled_collection(2);

    assert!(matches!(
        select_config(&collection, 0),
        Err(SplitError::InvalidSelection { index: 0, available: 2 })
    ));
    assert!(matches!(
        select_config(&collection, 3),
        Err(SplitError::InvalidSelection { index: 3, available: 2 })
    ));
    assert_eq!(select_config(&collection, 1).unwrap().name, "config_1");
}

#[test]
fn test_delete_missing_is_not_found() {
    let (_dir, store) = temp_store();
    let collection = filled_collection(1);

    assert!(matches!(
        delete_config(&store, &collection, "nope"),
        Err(SplitError::NotFound(_))
    ));
    assert!(!store.path().exists());
}

#[test]
fn test_run_session_and_feed_lines() {
    let temp_dir = TempDir::new().unwrap();
    let collection = filled_collection(1);
    let config = select_config(&collection, 1).unwrap();

    let mut session = run_session(config, temp_dir.path());
    for line in ["10,20", "30,40"] {
        assert!(matches!(feed_line(&mut session, line), SessionEvent::Continue));
    }
    assert!(matches!(feed_line(&mut session, ""), SessionEvent::Continue));
    assert!(matches!(feed_line(&mut session, ""), SessionEvent::Exported(_)));
    assert!(matches!(feed_line(&mut session, "quit"), SessionEvent::Terminated));

    let files = csv_files(temp_dir.path());
    assert_eq!(files.len(), 1);
    common::assert_export_name(&files[0], "config_1");
}

#[test]
fn test_session_with_blank_headers_from_older_document() {
    let (dir, store) = temp_store();
    std::fs::write(
        store.path(),
        r#"{"old": {"name": "old", "row_delimiter": "\n", "col_delimiter": ",", "num_columns": 2, "column_names": ["", ""]}}"#,
    )
    .unwrap();
    let collection = store.load().unwrap();
    let output_dir = dir.path().join("out");

    let mut session = run_session(select_config(&collection, 1).unwrap(), &output_dir);
    feed_line(&mut session, "1,");
    feed_line(&mut session, "");
    assert!(matches!(feed_line(&mut session, ""), SessionEvent::Exported(_)));

    let files = csv_files(&output_dir);
    assert_eq!(files.len(), 1);
    assert_eq!(common::read_text(&files[0]), ",\n1,\n");
}
