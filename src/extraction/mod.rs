//! Symbol extraction: stage classification, docstring decoding and the
//! tree-sitter walk that produces [`SymbolRecord`](crate::core::SymbolRecord)s.

pub mod docstring;
pub mod python;
pub mod stage;

pub use python::{clip_snippet, parse_source, SymbolExtractor};
pub use stage::{KeywordStageClassifier, StageClassifier};
