//! TSX language support via ast-grep-language.
//!
//! We use the bundled `SupportLang::Tsx` grammar from ast-grep-language
//! instead of depending on tree-sitter-typescript directly. This keeps the
//! grammar version in lockstep with the tree-sitter crate.

use ast_grep_language::{LanguageExt, SupportLang};

/// Get the tree-sitter language for TSX source.
pub fn tsx_language() -> tree_sitter::Language {
    SupportLang::Tsx.get_ts_language()
}
