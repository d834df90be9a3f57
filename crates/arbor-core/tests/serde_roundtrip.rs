#![cfg(feature = "serde")]

use arbor_core::TaskStatus;

#[test]
fn task_status_json_roundtrip() {
    let statuses = vec![TaskStatus::Success, TaskStatus::Failure, TaskStatus::Running];

    let json = serde_json::to_string(&statuses).expect("serialize");
    assert_eq!(json, r#"["Success","Failure","Running"]"#);

    let roundtrip: Vec<TaskStatus> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, statuses);
}
