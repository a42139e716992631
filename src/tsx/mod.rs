//! Tree-sitter integration for structural TSX queries.
//!
//! Provides CST-based parsing and span extraction for TSX source, enabling
//! precise byte-span rewrites without losing comments or formatting.

pub mod errors;
pub mod lang;
pub mod parser;

pub use errors::TsxError;
pub use lang::tsx_language;
pub use parser::{ErrorNode, ParsedSource, TsxParser};
