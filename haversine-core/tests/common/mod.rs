//! Test infrastructure for the document parser
//!
//! Provides seeded random document generation with the tree each document
//! is expected to parse into.

mod generators;

pub use generators::Gen;
