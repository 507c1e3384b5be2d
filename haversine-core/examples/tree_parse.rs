//! Example: Parse a document to a tree and navigate it.
//!
//! Run with: cargo run --example tree_parse

use haversine_core::{extract_pairs, parse, Value, EARTH_RADIUS};

fn main() {
    let input = r#"{"pairs":[
    {"x0":-71.3015509018757001, "y0":-176.9483879090714424, "x1":-68.8159353647142495, "y1":-177.4700140406496303},
    {"x0":34.052235, "y0":-118.243683, "x1":40.712776, "y1":-74.005974}
  ],
  "meta":{"method":"uniform","seed":1234,"checked":true,"note":null}
}"#;

    let root = parse(input).expect("parse failed");

    println!("=== Document Tree ===\n");
    print_value(None, &root, 0);

    println!("\n=== Pairs ===\n");
    for (i, pair) in extract_pairs(&root).expect("not a pairs document").iter().enumerate() {
        println!("{}: ({}, {}) -> ({}, {})", i, pair.x0, pair.y0, pair.x1, pair.y1);
        println!("   distance: {:.4} km", pair.distance(EARTH_RADIUS));
    }
}

fn print_value(key: Option<&str>, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = key.map(|k| format!("{}: ", k)).unwrap_or_default();

    match value {
        Value::Null => println!("{}{}null", indent, label),
        Value::Bool(b) => println!("{}{}{}", indent, label, b),
        Value::Number(n) => println!("{}{}{}", indent, label, n),
        Value::String(s) => println!("{}{}\"{}\"", indent, label, s),
        Value::Object(map) => {
            println!("{}{}{{{} keys}}", indent, label, map.len());
            for (k, v) in map {
                print_value(Some(k), v, depth + 1);
            }
        }
        Value::Array(items) => {
            println!("{}{}[{} items]", indent, label, items.len());
            for item in items {
                print_value(None, item, depth + 1);
            }
        }
    }
}
