#![allow(dead_code)]

use cascade::Value;
use indexmap::IndexMap;
use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

pub fn empty_subject() -> Value {
    Value::Object(Rc::new(RefCell::new(IndexMap::new())))
}

/// `{ x: 1 }`
pub fn one_field() -> Value {
    let mut root = IndexMap::new();
    root.insert("x".to_string(), Value::Number(1.0, false));
    Value::Object(Rc::new(RefCell::new(root)))
}

/// `{ a: { b: 1 } }`
pub fn nested_subject() -> Value {
    let mut inner = IndexMap::new();
    inner.insert("b".to_string(), Value::Number(1.0, false));
    let mut root = IndexMap::new();
    root.insert("a".to_string(), Value::object(inner));
    Value::Object(Rc::new(RefCell::new(root)))
}

/// Kitchen-sink subject with a scalar of every tag plus nested
/// containers.
pub fn make_subject() -> Value {
    let mut sub = IndexMap::new();
    sub.insert("valueString".to_string(), Value::string("sub value"));
    sub.insert("valueNumber".to_string(), Value::Number(1.0, false));
    sub.insert(
        "valueArray".to_string(),
        Value::array(vec![1.into(), 2.into(), 3.into()]),
    );

    let mut root = IndexMap::new();
    root.insert("valueNumber".to_string(), Value::Number(1.0, false));
    root.insert("valueString".to_string(), Value::string("hello"));
    root.insert("valueBoolean".to_string(), Value::Bool(true));
    root.insert("valueObject".to_string(), Value::object(sub));
    root.insert("valueArray".to_string(), Value::array(Vec::new()));
    Value::Object(Rc::new(RefCell::new(root)))
}

/// A zero-argument callable returning 0, 1, 2, ... on successive calls.
pub fn counter_fn() -> Value {
    let count = Rc::new(Cell::new(0i64));
    Value::native("counter", move |_, _| {
        let n = count.get();
        count.set(n + 1);
        Ok(Value::from(n))
    })
}

/// A callable that appends every received argument to the shared log.
pub fn recording_fn(log: Rc<RefCell<Vec<Value>>>) -> Value {
    Value::native("record", move |_, args| {
        log.borrow_mut().extend(args.iter().cloned());
        Ok(Value::Undefined)
    })
}
