use arbor_core::{BbKey, Blackboard, BlackboardError};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let k_u32 = BbKey::<u32>::new(1);
    let k_str = BbKey::<String>::new(2);

    let mut bb = Blackboard::new();
    assert!(!bb.contains(k_u32));
    assert!(bb.is_empty());

    bb.set(k_u32, 123);
    bb.set(k_str, "hello".to_string());
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.get(k_u32).copied(), Some(123));
    assert_eq!(bb.get(k_str).map(|s| s.as_str()), Some("hello"));

    assert_eq!(bb.remove(k_u32), Some(123));
    assert_eq!(bb.get(k_u32), None);
}

#[test]
fn get_or_insert_with_keeps_existing_value() {
    const ELAPSED: BbKey<f32> = BbKey::new(7);

    let mut bb = Blackboard::new();
    *bb.get_or_insert_with(ELAPSED, || 0.0) += 0.5;
    *bb.get_or_insert_with(ELAPSED, || 100.0) += 0.25;

    assert_eq!(bb.get(ELAPSED).copied(), Some(0.75));
}

#[test]
fn try_get_reports_type_mismatch() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(1), 1u32);

    assert_eq!(bb.try_get(BbKey::<u32>::new(1)), Ok(Some(&1u32)));
    assert_eq!(bb.try_get(BbKey::<u32>::new(2)), Ok(None));
    assert!(matches!(
        bb.try_get(BbKey::<i32>::new(1)),
        Err(BlackboardError::TypeMismatch { id: 1, .. })
    ));
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new(1), 1u32);
    let _ = bb.get(BbKey::<i32>::new(1));
}
