//! Walkthrough of the jsson-core API: building values, parsing and dumping,
//! error handling, the binary scalar codec and the UTF-8 helpers.
//!
//! Run with `cargo run -p jsson-core --example demo`.

use jsson_core::pack::{pack, unpack, BinaryType};
use jsson_core::{dump, parse, utf8, Array, JsonError, Object, Value};

fn test_object() -> Object {
    let mut obj = Object::new();
    obj.insert("name", "Alice");
    obj.insert("age", 30);
    obj.insert("is_member", true);
    obj.insert("scores", [85, 92, 78].into_iter().collect::<Array>());
    obj
}

fn demonstrate_creation() {
    println!("=== Building values ===");
    println!("Null: {}", Value::Null);
    println!("Boolean: {}", Value::from(true));
    println!("Real: {}", Value::from(3.14159));
    println!("String: {}", Value::from("Hello, world!"));

    let arr: Value = vec![Value::from(1), Value::from("two"), Value::from(false), Value::Null].into();
    println!("Array: {arr}");
    println!("Object: {}", Value::Object(test_object()));
}

fn demonstrate_parse_and_dump() -> Result<(), JsonError> {
    println!("\n=== Parse and dump ===");
    let json = r#"{"title":"Jsson Demo","count":42,"values":[1,2,3],"active":true}"#;
    let value = parse(json)?;
    println!("count = {}", value.get("count")?.as_integer()?);
    println!("Dumped: {}", dump(&value));
    Ok(())
}

fn demonstrate_pack_unpack() -> Result<(), JsonError> {
    println!("\n=== Pack / unpack ===");
    let bytes = pack(BinaryType::Real, &123.45f64)?;
    println!("Packed 123.45 as {} bytes: {bytes:02x?}", bytes.len());

    let mut pos = 0;
    let real: f64 = unpack(&bytes, &mut pos)?;
    println!("Unpacked: {real} (position {pos})");

    let bytes = pack(BinaryType::String, "example")?;
    let mut pos = 0;
    let text: String = unpack(&bytes, &mut pos)?;
    println!("Unpacked string {text:?}, position {pos}");
    Ok(())
}

fn demonstrate_errors() {
    println!("\n=== Errors ===");
    if let Err(e) = parse("{[invalid]") {
        println!("Parse failed: {e} (code {})", e.code().as_u32());
    }
    let empty = Value::Object(Object::new());
    if let Err(e) = empty.get("missing") {
        println!("Lookup failed: {e}");
    }
    if let Err(e) = Value::from("text").as_integer() {
        println!("Accessor failed: {e}");
    }
}

fn demonstrate_utf8() {
    println!("\n=== UTF-8 ===");
    let text = "😀 Hello, 🌍!";
    println!("{text:?} valid: {}", utf8::is_valid(text.as_bytes()));
    println!("Overlong '/' valid: {}", utf8::is_valid(b"\xC0\xAF"));
    println!("As JSON: {}", Value::from(text));
}

fn main() -> Result<(), JsonError> {
    demonstrate_creation();
    demonstrate_parse_and_dump()?;
    demonstrate_pack_unpack()?;
    demonstrate_errors();
    demonstrate_utf8();
    println!("\n=== Done ===");
    Ok(())
}
