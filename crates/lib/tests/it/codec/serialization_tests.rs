use fluentarray::{Container, Key, Value, container::ContainerError};

use crate::helpers::*;

fn round_trip(container: &Container) -> Container {
    let text = container.serialize().unwrap();
    Container::deserialize(&text).unwrap()
}

fn container_error(err: fluentarray::Error) -> ContainerError {
    match err {
        fluentarray::Error::Container(err) => err,
        other => panic!("expected a container error, got {other:?}"),
    }
}

#[test]
fn test_round_trip_preserves_order_and_nesting() {
    let original = setup_mixed_container();
    let decoded = round_trip(&original);

    assert_eq!(decoded, original);
    assert_keys(
        &decoded,
        &[name("title"), Key::Index(0), name("child"), Key::Index(1), name("flag")],
    );
    assert!(decoded.get("child").unwrap().is_container());
}

#[test]
fn test_round_trip_keeps_key_kinds() {
    let mut original = Container::new();
    original.set("0", "named zero").set(0, "index zero").set(-3, "negative");

    let decoded = round_trip(&original);
    assert_eq!(decoded.get("0"), Some(&Value::from("named zero")));
    assert_eq!(decoded.get(0), Some(&Value::from("index zero")));
    assert_eq!(decoded.get(-3), Some(&Value::from("negative")));
}

#[test]
fn test_round_trip_keeps_value_kinds() {
    let mut original = Container::new();
    original
        .push(Value::Null)
        .push(true)
        .push(1)
        .push(1.0)
        .push("1")
        .push(Container::new())
        .push(f64::INFINITY)
        .push(f64::NEG_INFINITY)
        .push(-0.5)
        .set("nan", f64::NAN);

    let mut decoded = round_trip(&original);
    let nan = decoded.remove("nan").unwrap();
    assert!(nan.as_float().is_some_and(f64::is_nan), "expected NaN, got {nan:?}");
    assert_values(
        &decoded,
        &[
            Value::Null,
            Value::Bool(true),
            Value::Int(1),
            Value::Float(1.0),
            Value::from("1"),
            Value::Container(Container::new()),
            Value::Float(f64::INFINITY),
            Value::Float(f64::NEG_INFINITY),
            Value::Float(-0.5),
        ],
    );
}

#[test]
fn test_float_markers_are_not_text() {
    let text = r#"{"_v":1,"entries":[["t",{"Text":"inf"}],["f",{"Float":"inf"}]]}"#;
    let decoded = Container::deserialize(text).unwrap();
    assert_eq!(decoded.get("t"), Some(&Value::from("inf")));
    assert_eq!(decoded.get("f"), Some(&Value::Float(f64::INFINITY)));

    let bad = r#"{"_v":1,"entries":[["f",{"Float":"infinity"}]]}"#;
    assert!(Container::deserialize(bad).unwrap_err().is_serialization_error());
}

#[test]
fn test_round_trip_deep_nesting() {
    let depth = 200;
    let mut nested = Container::new().with("leaf", true);
    for _ in 0..depth {
        nested = Container::new().with("n", nested);
    }

    let decoded = round_trip(&nested);
    assert_eq!(decoded, nested);

    let mut level = &decoded;
    for _ in 0..depth {
        level = level.get_container("n").unwrap();
    }
    assert_eq!(level.get("leaf"), Some(&Value::Bool(true)));
}

#[test]
fn test_round_trip_keeps_empty_map_shape() {
    let data = serde_json::json!({"map": {}, "list": [], "both": [{}, []]});
    let original = Container::from_structured(data.clone()).unwrap();

    let decoded = round_trip(&original);
    assert_eq!(decoded.to_structured(), data);

    let emptied = Container::new().with("a", 1).filter_by(|_, _| false);
    assert_eq!(round_trip(&emptied).to_structured(), serde_json::json!({}));
}

#[test]
fn test_decoded_container_keeps_push_index() {
    let original = Container::new().with_pushed("a").with_pushed("b");
    let mut decoded = round_trip(&original);
    decoded.push("c");
    assert_eq!(decoded.get(2), Some(&Value::from("c")));
}

#[test]
fn test_serialized_form_is_stable() {
    let original = setup_records();
    let first = original.serialize().unwrap();
    let second = round_trip(&original).serialize().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_container() {
    let text = Container::new().serialize().unwrap();
    assert_eq!(text, r#"{"_v":1,"entries":[]}"#);
    assert!(Container::deserialize(&text).unwrap().is_empty());

    let decoded = Container::deserialize(r#"{"_v":1,"entries":{}}"#).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.to_structured(), serde_json::json!({}));
}

#[test]
fn test_truncated_input_is_rejected() {
    let text = setup_mixed_container().serialize().unwrap();
    for cut in [1, text.len() / 2, text.len() - 1] {
        let err = Container::deserialize(&text[..cut]).unwrap_err();
        assert!(
            matches!(container_error(err), ContainerError::DeserializationFailed { .. }),
            "cut at {cut} should fail to decode"
        );
    }
}

#[test]
fn test_garbage_is_rejected() {
    for text in ["", "null", "[]", "not json", r#"{"entries":[]}"#, r#"{"_v":1}"#] {
        let err = Container::deserialize(text).unwrap_err();
        assert!(err.is_serialization_error(), "input {text:?} should be rejected");
    }
}

#[test]
fn test_unsupported_version() {
    let err = Container::deserialize(r#"{"_v":2,"entries":"from the future"}"#).unwrap_err();
    assert!(matches!(
        container_error(err),
        ContainerError::UnsupportedVersion { found: 2, supported: 1 }
    ));
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let text = r#"{"_v":1,"entries":[["a",{"Int":1}],["a",{"Int":2}]]}"#;
    let err = Container::deserialize(text).unwrap_err();
    assert!(matches!(
        container_error(err),
        ContainerError::DuplicateKey { ref key } if key == "a"
    ));
}

#[test]
fn test_index_and_name_keys_do_not_collide() {
    let text = r#"{"_v":1,"entries":[["1",{"Int":1}],[1,{"Int":2}]]}"#;
    let decoded = Container::deserialize(text).unwrap();
    assert_eq!(decoded.len(), 2);
}

#[test]
fn test_decoded_container_has_no_configuration() {
    use fluentarray::Configurable;

    let decoded = round_trip(&Container::new().with("a", 1));
    assert!(decoded.instance_config().is_none());
}
