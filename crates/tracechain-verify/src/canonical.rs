//! Key-sorted JSON serialization for claim hashing.
//!
//! `stable_stringify` gives the same string for the same claim content no
//! matter how its keys were inserted.  Event hashing in `tracechain-ledger`
//! deliberately does the opposite and must keep insertion order; the two are
//! not interchangeable.

use serde_json::Value;

/// Serialize `value` with object keys sorted at every level.
///
/// Keys compare by UTF-16 code units, arrays keep their order, and scalars
/// use standard JSON encoding.
pub fn stable_stringify(value: &Value) -> String {
    let mut out = String::new();
    write_stable(value, &mut out);
    out
}

fn write_stable(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_stable(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_stable(&map[key.as_str()], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
