//! Code formatting for Fissure
//!
//! Pretty-printing of the syntax tree back into canonical source text.

pub mod source;
