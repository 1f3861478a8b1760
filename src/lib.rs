//! # SYMXREF
//!
//! Project-wide symbol cross-reference extraction.
//!
//! SYMXREF walks a source tree, extracts every file's top-level definitions
//! and every identifier used in call position, and joins the two by name
//! into a flat list of cross-file edges: which file calls a symbol, which
//! file defines it, and what kind of definition it is.
//!
//! ## Artifacts
//!
//! - **Reference map**: per-file definitions and resolved imports
//! - **Usage map**: identifier to the files calling it
//! - **Combined view**: per-file definitions with their callers
//! - **Cross reference**: `symbol`, `symbol_type`, `used_in`, `defined_in` edges
//! - **Content inventory**: per-file path, name, type and source text
//!
//! Resolution is purely name-based: `obj.method()` matches every `method`
//! defined anywhere in the tree, whatever `obj` is.
//!
//! ## Supported Languages
//!
//! Python

pub mod core;
pub mod formatters;
pub mod logging;
pub mod parsers;
