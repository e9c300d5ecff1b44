use jsson_core::{parse, Array, ErrorCode, Object, Value, ValueType};

#[test]
fn default_value_is_null() {
    assert_eq!(Value::default(), Value::Null);
    assert!(Value::default().is_null());
}

#[test]
fn value_type_reports_active_variant() {
    let cases = [
        (Value::Null, ValueType::Null),
        (Value::Boolean(true), ValueType::Boolean),
        (Value::Integer(1), ValueType::Integer),
        (Value::Real(1.5), ValueType::Real),
        (Value::from("s"), ValueType::String),
        (Value::Array(Array::new()), ValueType::Array),
        (Value::Object(Object::new()), ValueType::Object),
    ];
    for (value, ty) in cases {
        assert_eq!(value.value_type(), ty);
    }
}

#[test]
fn value_type_names() {
    assert_eq!(ValueType::Integer.to_string(), "integer");
    assert_eq!(ValueType::Object.name(), "object");
}

#[test]
fn predicates() {
    assert!(Value::Integer(1).is_number());
    assert!(Value::Real(1.0).is_number());
    assert!(!Value::from("1").is_number());
    assert!(Value::Boolean(false).is_boolean());
    assert!(Value::from("x").is_string());
}

// ============================================================================
// Typed accessors
// ============================================================================

#[test]
fn accessors_return_payload() {
    assert!(Value::Boolean(true).as_bool().unwrap());
    assert_eq!(Value::Integer(-5).as_integer().unwrap(), -5);
    assert_eq!(Value::Real(2.5).as_real().unwrap(), 2.5);
    assert_eq!(Value::from("hi").as_str().unwrap(), "hi");
}

#[test]
fn as_number_widens_integers() {
    assert_eq!(Value::Integer(3).as_number().unwrap(), 3.0);
    assert_eq!(Value::Real(0.5).as_number().unwrap(), 0.5);
    assert_eq!(
        Value::Null.as_number().unwrap_err().code(),
        ErrorCode::WrongType
    );
}

#[test]
fn wrong_accessor_is_wrong_type() {
    let v = Value::from("text");
    assert_eq!(v.as_integer().unwrap_err().code(), ErrorCode::WrongType);
    assert_eq!(v.as_bool().unwrap_err().code(), ErrorCode::WrongType);
    assert_eq!(v.as_array().unwrap_err().code(), ErrorCode::WrongType);
    assert_eq!(v.as_object().unwrap_err().code(), ErrorCode::WrongType);
}

#[test]
fn integer_is_not_a_real() {
    // No implicit conversion between the two numeric variants
    let err = Value::Integer(1).as_real().unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongType);
    assert!(err.detail().contains("expected real, found integer"));
    assert!(Value::Real(1.0).as_integer().is_err());
}

#[test]
fn into_accessors_move_payload() {
    assert_eq!(Value::from("own").into_string().unwrap(), "own");
    assert_eq!(
        Value::Integer(1).into_string().unwrap_err().code(),
        ErrorCode::WrongType
    );
    assert!(Value::from(vec![Value::Null]).into_array().unwrap().len() == 1);
    assert!(Value::Null.into_object().is_err());
}

#[test]
fn get_and_at_navigate_tree() {
    let v = parse(r#"{"users":[{"name":"Ada"},{"name":"Linus"}]}"#).unwrap();
    let second = v.get("users").unwrap().at(1).unwrap();
    assert_eq!(second.get("name").unwrap().as_str().unwrap(), "Linus");
}

#[test]
fn get_on_missing_key_is_item_not_found() {
    let v = parse(r#"{"a":1}"#).unwrap();
    assert_eq!(v.get("b").unwrap_err().code(), ErrorCode::ItemNotFound);
}

#[test]
fn get_on_non_object_is_wrong_type() {
    assert_eq!(
        Value::Integer(1).get("a").unwrap_err().code(),
        ErrorCode::WrongType
    );
    assert_eq!(Value::Null.at(0).unwrap_err().code(), ErrorCode::WrongType);
}

#[test]
fn at_past_end_is_index_out_of_range() {
    let v = parse("[1,2]").unwrap();
    assert_eq!(v.at(2).unwrap_err().code(), ErrorCode::IndexOutOfRange);
}

#[test]
fn mutable_accessors_edit_in_place() {
    let mut v = parse(r#"{"list":[1]}"#).unwrap();
    v.as_object_mut()
        .unwrap()
        .get_mut("list")
        .unwrap()
        .as_array_mut()
        .unwrap()
        .push(2);
    assert_eq!(v.to_string(), r#"{"list":[1,2]}"#);
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn from_primitives() {
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(Value::from(true), Value::Boolean(true));
    assert_eq!(Value::from(7i32), Value::Integer(7));
    assert_eq!(Value::from(7u32), Value::Integer(7));
    assert_eq!(Value::from(7i64), Value::Integer(7));
    assert_eq!(Value::from(0.5), Value::Real(0.5));
    assert_eq!(Value::from(String::from("s")), Value::from("s"));
}

#[test]
fn from_option() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn collect_into_value_array() {
    let v: Value = (1i64..=3).collect();
    assert_eq!(v.to_string(), "[1,2,3]");
}

// ============================================================================
// Array
// ============================================================================

#[test]
fn array_push_get_len() {
    let mut arr = Array::new();
    assert!(arr.is_empty());
    arr.push(1);
    arr.push("two");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.get(1).unwrap(), &Value::from("two"));
}

#[test]
fn array_get_out_of_range() {
    let arr = Array::new();
    let err = arr.get(0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IndexOutOfRange);
    assert!(err.detail().contains("length 0"));
}

#[test]
fn array_set_returns_previous() {
    let mut arr: Array = vec![Value::from(1), Value::from(2)].into();
    let old = arr.set(0, "first").unwrap();
    assert_eq!(old, Value::Integer(1));
    assert_eq!(arr.get(0).unwrap(), &Value::from("first"));
    assert_eq!(arr.set(5, 0).unwrap_err().code(), ErrorCode::IndexOutOfRange);
}

#[test]
fn array_insert_at_end_appends() {
    let mut arr: Array = [1, 3].into_iter().collect();
    arr.insert(1, 2).unwrap();
    arr.insert(3, 4).unwrap();
    assert_eq!(Value::Array(arr.clone()).to_string(), "[1,2,3,4]");
    assert_eq!(arr.insert(9, 0).unwrap_err().code(), ErrorCode::IndexOutOfRange);
}

#[test]
fn array_remove_and_pop() {
    let mut arr: Array = ["a", "b", "c"].into_iter().collect();
    assert_eq!(arr.remove(1).unwrap(), Value::from("b"));
    assert_eq!(arr.pop(), Some(Value::from("c")));
    assert_eq!(arr.len(), 1);
    assert_eq!(arr.remove(1).unwrap_err().code(), ErrorCode::IndexOutOfRange);
    arr.clear();
    assert_eq!(arr.pop(), None);
}

#[test]
fn array_iteration_preserves_order() {
    let mut arr = Array::with_capacity(3);
    arr.extend([10, 20, 30]);
    let seen: Vec<i64> = arr.iter().map(|v| v.as_integer().unwrap()).collect();
    assert_eq!(seen, [10, 20, 30]);

    for v in arr.iter_mut() {
        *v = Value::Null;
    }
    assert!(arr.as_slice().iter().all(Value::is_null));
    assert_eq!(arr.into_vec().len(), 3);
}

#[test]
fn array_equality_is_order_sensitive() {
    assert_ne!(parse("[1,2]").unwrap(), parse("[2,1]").unwrap());
}

// ============================================================================
// Object
// ============================================================================

#[test]
fn object_insert_and_get() {
    let mut obj = Object::new();
    assert!(obj.insert("a", 1).is_none());
    assert_eq!(obj.insert("a", 2), Some(Value::Integer(1)));
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.get("a").unwrap(), &Value::Integer(2));
    assert!(obj.contains_key("a"));
    assert!(!obj.contains_key("b"));
}

#[test]
fn object_get_missing_is_item_not_found() {
    let obj = Object::new();
    let err = obj.get("nope").unwrap_err();
    assert_eq!(err.code(), ErrorCode::ItemNotFound);
    assert!(err.detail().contains("\"nope\""));
}

#[test]
fn object_try_insert_rejects_duplicate() {
    let mut obj = Object::new();
    obj.try_insert("k", 1).unwrap();
    let err = obj.try_insert("k", 2).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateKey);
    assert_eq!(obj.get("k").unwrap(), &Value::Integer(1));
}

#[test]
fn object_remove_keeps_remaining_order() {
    let mut obj: Object = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(obj.remove("b").unwrap(), Value::Integer(2));
    let keys: Vec<&String> = obj.keys().collect();
    assert_eq!(keys, ["a", "c"]);
    assert_eq!(obj.remove("b").unwrap_err().code(), ErrorCode::ItemNotFound);
}

#[test]
fn object_get_mut_and_iter_mut() {
    let mut obj: Object = [("x", 1), ("y", 2)].into_iter().collect();
    *obj.get_mut("x").unwrap() = Value::from("one");
    for (_, v) in obj.iter_mut() {
        if v.is_integer() {
            *v = Value::Boolean(true);
        }
    }
    assert_eq!(Value::Object(obj).to_string(), r#"{"x":"one","y":true}"#);
}

#[test]
fn object_equality_ignores_order() {
    let a = parse(r#"{"a":1,"b":[true]}"#).unwrap();
    let b = parse(r#"{"b":[true],"a":1}"#).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, parse(r#"{"a":1}"#).unwrap());
}

#[test]
fn object_values_and_owned_iteration() {
    let mut obj = Object::with_capacity(2);
    obj.extend([("n", 1), ("m", 2)]);
    let total: i64 = obj.values().map(|v| v.as_integer().unwrap()).sum();
    assert_eq!(total, 3);

    let pairs: Vec<(String, Value)> = obj.into_iter().collect();
    assert_eq!(pairs[0], ("n".to_string(), Value::Integer(1)));
}

#[test]
fn clone_is_deep() {
    let original = parse(r#"{"list":[1,2]}"#).unwrap();
    let mut copy = original.clone();
    copy.as_object_mut()
        .unwrap()
        .get_mut("list")
        .unwrap()
        .as_array_mut()
        .unwrap()
        .clear();
    assert_eq!(original.get("list").unwrap().as_array().unwrap().len(), 2);
}

#[test]
fn integer_and_real_values_are_distinct() {
    assert_ne!(Value::Integer(1), Value::Real(1.0));
}
