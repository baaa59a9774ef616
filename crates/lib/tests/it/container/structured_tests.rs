use fluentarray::{Container, Key, Value};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_structured_round_trip_isomorphism() {
    let samples = [
        json!([]),
        json!([1, "two", 3.5, true, null]),
        json!({"name": "Ann", "tags": ["a", "b"], "meta": {"depth": {"level": 2}}}),
        json!({"z": 1, "a": 2, "m": 3}),
        json!([[1, 2], {"k": [3, {"deep": []}]}]),
        json!({"empty": {}, "list": [{}]}),
    ];

    for sample in samples {
        let container = Container::from_structured(sample.clone()).unwrap();
        assert_eq!(container.to_structured(), sample);
    }
}

#[test]
fn test_empty_object_exports_as_empty_object() {
    let container = Container::from_structured(json!({})).unwrap();
    assert!(container.is_empty());
    assert_eq!(container.to_structured(), json!({}));

    let nested = json!({"a": {}, "b": [], "c": [{}, []]});
    let container = Container::from_structured(nested.clone()).unwrap();
    assert_eq!(container.to_structured(), nested);
}

#[test]
fn test_empty_shapes_compare_equal() {
    // Equality looks at entries only
    let object = Container::from_structured(json!({})).unwrap();
    let list = Container::from_structured(json!([])).unwrap();
    assert_eq!(object, list);
}

#[test]
fn test_import_keys() {
    let list = Container::from_structured(json!(["a", "b"])).unwrap();
    assert_keys(&list, &[Key::Index(0), Key::Index(1)]);

    let object = Container::from_structured(json!({"b": 1, "a": 2})).unwrap();
    assert_keys(&object, &[name("b"), name("a")]);
}

#[test]
fn test_export_mixed_keys_as_object() {
    let container = setup_mixed_container();
    assert_eq!(
        container.to_structured(),
        json!({
            "title": "mixed",
            "0": "first",
            "child": {"depth": 1},
            "1": 2.5,
            "flag": false
        })
    );
}

#[test]
fn test_export_after_unset_is_object() {
    let mut container: Container = ["a", "b", "c"].into_iter().map(Value::from).collect();
    container.unset(1);
    assert_eq!(container.to_structured(), json!({"0": "a", "2": "c"}));
}

#[test]
fn test_scalar_import_is_rejected() {
    for scalar in [json!(null), json!(1), json!("text"), json!(false)] {
        let err = Container::from_structured(scalar).unwrap_err();
        assert!(err.is_type_error());
    }
}

#[test]
fn test_vec_literal_becomes_child() {
    let container = Container::new().with("list", vec![1, 2, 3]);
    assert_eq!(container.to_structured(), json!({"list": [1, 2, 3]}));
}
