use super::*;

#[test]
fn test_define_lookup() {
    let mut env = Environment::new();
    env.define("x", Value::Int(42));
    assert_eq!(env.lookup("x"), Some(&Value::Int(42)));
    assert!(env.lookup("y").is_none());
}

#[test]
fn test_redefine_replaces() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    env.define("x", Value::str("one"));
    assert_eq!(env.lookup("x"), Some(&Value::str("one")));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_array_elements_are_separate_names() {
    let mut env = Environment::new();
    env.define("arr(a)", Value::Int(1));
    env.define("arr(b)", Value::Int(2));
    assert!(!env.contains("arr"));
    assert_eq!(env.names(), vec!["arr(a)", "arr(b)"]);
}

#[test]
fn test_remove() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    assert_eq!(env.remove("x"), Some(Value::Int(1)));
    assert!(env.is_empty());
}
