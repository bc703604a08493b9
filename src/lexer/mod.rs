//! Lexical analysis module.
//!
//! This module contains the scanner that converts source text into
//! tokens on demand. It handles:
//!
//! - Single and two-character operators and delimiters
//! - Recognition of keywords, identifiers and integer literals
//! - Illegal characters, which become tokens instead of errors
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
