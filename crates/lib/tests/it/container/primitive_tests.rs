use fluentarray::{Condition, Configurable, Container, Key, Value};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_set_then_get() {
    let mut container = Container::new();
    container.set("name", "Alice").set("age", 30).set("ratio", 0.5);

    assert_eq!(container.get("name"), Some(&Value::from("Alice")));
    assert_eq!(container.get("age"), Some(&Value::Int(30)));
    assert_eq!(container.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(container.len(), 3);
}

#[test]
fn test_absent_key_reads_none() {
    let container = Container::new();
    assert!(!container.has("missing"));
    assert_eq!(container.get("missing"), None);
    assert_eq!(container.get(0), None);
}

#[test]
fn test_null_value_is_present() {
    let container = Container::new().with("nothing", Value::Null);
    assert!(container.has("nothing"));
    assert_eq!(container.get("nothing"), Some(&Value::Null));
}

#[test]
fn test_set_converts_structured_values() {
    let mut container = Container::new();
    container.set("profile", json!({"name": "Ann", "roles": ["admin", "ops"]}));

    let profile = container.get_container("profile").unwrap();
    assert_eq!(profile.get("name"), Some(&Value::from("Ann")));

    let roles = profile.get_container("roles").unwrap();
    assert_values(roles, &[Value::from("admin"), Value::from("ops")]);
}

#[test]
fn test_push_ignores_named_keys() {
    let mut container = Container::new();
    container.set("key", "value").push("a").push("b");

    assert_keys(&container, &[name("key"), Key::Index(0), Key::Index(1)]);
}

#[test]
fn test_push_continues_after_explicit_index() {
    let mut container = Container::new();
    container.set(10, "ten").push("eleven");
    assert_eq!(container.get(11), Some(&Value::from("eleven")));
}

#[test]
fn test_overwrite_keeps_position() {
    let mut container = setup_mixed_container();
    container.set("title", "renamed");

    assert_eq!(container.keys().next(), Some(&name("title")));
    assert_eq!(container.first(), Some(&Value::from("renamed")));
}

#[test]
fn test_unset_and_clean() {
    let mut container = setup_mixed_container();
    container.unset("title").unset("missing");
    assert!(!container.has("title"));
    assert_eq!(container.len(), 4);

    container.clean();
    assert!(container.is_empty());
    container.push("again");
    assert_eq!(container.get(0), Some(&Value::from("again")));
}

#[test]
fn test_remove_returns_value() {
    let mut container = Container::new().with("a", 1);
    assert_eq!(container.remove("a"), Some(Value::Int(1)));
    assert_eq!(container.remove("a"), None);
}

#[test]
fn test_set_when() {
    let mut container = Container::new();
    container.set_when(false, "x", 1);
    assert!(!container.has("x"));

    container.set_when(true, "x", 1);
    assert_eq!(container.get("x"), Some(&Value::Int(1)));
}

#[test]
fn test_push_when_with_predicate() {
    let mut container = Container::new();
    let when_empty = Condition::predicate(|target| target.is_empty());

    container.push_when(when_empty.clone(), "first");
    container.push_when(when_empty, "second");

    assert_values(&container, &[Value::from("first")]);
}

#[test]
fn test_value_conditions_use_truthiness() {
    let mut container = Container::new();
    container
        .set_when(Value::from("0"), "zero_text", 1)
        .set_when(Value::Int(7), "seven", 1);

    assert!(!container.has("zero_text"));
    assert!(container.has("seven"));
}

#[test]
fn test_clone_is_deep() {
    let mut original = Container::new();
    original.set("child", Container::new().with("n", 1));

    let mut copy = original.clone();
    copy.get_container_mut("child").unwrap().set("n", 2);

    assert_eq!(original.get_container("child").unwrap().get("n"), Some(&Value::Int(1)));
    assert_eq!(copy.get_container("child").unwrap().get("n"), Some(&Value::Int(2)));

    original.get_container_mut("child").unwrap().set("extra", true);
    assert!(!copy.get_container("child").unwrap().has("extra"));
}

#[test]
fn test_clone_shares_configuration() {
    let mut original = Container::new();
    let config = original.config();

    let copy = original.clone();
    assert!(copy.instance_config().unwrap().ptr_eq(&config));
}

#[test]
fn test_pluck_skips_scalars_and_missing_keys() {
    let records = setup_records();
    let ids = records.pluck("id");

    assert_values(&ids, &[Value::Int(2), Value::Int(4), Value::Int(5)]);
    assert_keys(&ids, &[Key::Index(0), Key::Index(1), Key::Index(2)]);
}

#[test]
fn test_pluck_absent_key_is_empty() {
    let records = setup_records();
    assert!(records.pluck("missing").is_empty());
    assert!(Container::new().pluck("id").is_empty());
}

#[test]
fn test_pluck_shares_configuration() {
    let mut records = setup_records();
    let config = records.config();
    let names = records.pluck("name");

    assert!(names.instance_config().unwrap().ptr_eq(&config));
    assert_values(&names, &[Value::from("no id"), Value::from("two"), Value::from("five")]);
}

#[test]
fn test_equality_ignores_configuration() {
    let a = Container::new().with("a", 1);
    let b = Container::with_config(fluentarray::Config::new()).with("a", 1);
    assert_eq!(a, b);

    let reordered = Container::new().with("b", 2).with("a", 1);
    let ordered = Container::new().with("a", 1).with("b", 2);
    assert_ne!(reordered, ordered);
}
