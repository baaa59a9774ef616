use fluentarray::{Container, Value, args};

use crate::helpers::*;

#[test]
fn test_has_prefix() {
    let container = Container::new().with("foo_bar", 1);

    let found = try_call(container.clone(), "hasFooBar", args![]).unwrap();
    assert!(found.into_bool().unwrap());

    let missing = try_call(container, "hasBaz", args![]).unwrap();
    assert!(!missing.into_bool().unwrap());
}

#[test]
fn test_has_prefix_lowers_only_first_letter() {
    // `hasFooBAR` addresses `fooBAR`, which snake_case maps to `foo_bar`
    let container = Container::new().with("foo_bar", 1);
    let found = try_call(container, "hasFooBAR", args![]).unwrap();
    assert!(found.into_bool().unwrap());
}

#[test]
fn test_pluck_prefix() {
    let ids = call(setup_records(), "pluckId", args![]);
    assert_values(&ids, &[Value::Int(2), Value::Int(4), Value::Int(5)]);
}

#[test]
fn test_reads_return_the_receiver() {
    let container = setup_records().with("foo_bar", 1);

    let found = try_call(container.clone(), "hasFooBar", args![]).unwrap();
    assert_eq!(found.into_receiver(), container);

    let plucked = try_call(container.clone(), "pluckId", args![]).unwrap();
    assert_eq!(plucked.clone().into_receiver(), container);
    assert_eq!(plucked.into_container().unwrap().len(), 3);
}

#[test]
fn test_pluck_prefix_on_missing_key_is_empty() {
    let plucked = call(setup_records(), "pluckColor", args![]);
    assert!(plucked.is_empty());
}

#[test]
fn test_unset_prefix() {
    let container = Container::new().with("foo_bar", 1).with("keep", 2);
    let container = call(container, "unsetFooBar", args![]);

    assert!(!container.has("foo_bar"));
    assert!(container.has("keep"));

    // Unsetting an absent key is a no-op
    let container = call(container, "unsetMissing", args![]);
    assert_eq!(container.len(), 1);
}

#[test]
fn test_bare_prefix_names_are_plain_keys() {
    let container = call(Container::new(), "has", args![true]);
    let container = call(container, "unset", args!["x"]);
    assert_eq!(container.get("has"), Some(&Value::Bool(true)));
    assert_eq!(container.get("unset"), Some(&Value::from("x")));
}

#[test]
fn test_escaped_prefix_sets_key() {
    let container = call(Container::new(), "\\hasRole", args!["admin"]);
    assert_eq!(container.get("has_role"), Some(&Value::from("admin")));
}
