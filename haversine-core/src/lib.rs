//! Haversine Core
//!
//! Single-pass JSON-like document parser and the pair model used by the
//! haversine distance benchmark.
//!
//! # Architecture
//!
//! - **value.rs** - Tagged value tree and typed accessors
//! - **scanner.rs** - Bounded cursor primitives over the raw text
//! - **classify.rs** - Bare token classification (bool / null / number / string)
//! - **parser.rs** - Frame-stack driver that assembles the tree
//! - **pairs.rs** - Typed extraction of `root["pairs"]`
//! - **haversine.rs** - Reference distance formula
//! - **answers.rs** - Little-endian f64 answer files
//! - **generate.rs** - Seeded pair generator and document writer
//!
//! The parser accepts a restricted grammar: no string escapes, no exponent
//! notation, numbers must match `-?digits(.digits)?`.

pub mod answers;
pub mod classify;
pub mod error;
pub mod generate;
pub mod haversine;
pub mod pairs;
pub mod parser;
pub mod scanner;
pub mod value;

pub use error::{Error, Result};
pub use haversine::{reference_haversine, EARTH_RADIUS};
pub use pairs::{average_distance, extract_pairs, Pair};
pub use parser::{parse, parse_with, ParseOptions};
pub use value::{Map, Scalar, Value, ValueKind};
