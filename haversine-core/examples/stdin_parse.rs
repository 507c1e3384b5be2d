use std::io::Read;
use haversine_core::parse;

fn main() {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).unwrap();

    match parse(&input) {
        Ok(root) => eprintln!("TREE: {:#?}", root),
        Err(err) => eprintln!("ERROR: {}", err),
    }
}
