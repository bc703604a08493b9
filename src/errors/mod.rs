//! Error types and error handling for the front end.
//!
//! This module defines the errors the parser collects while building
//! the AST. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for structural, missing-handler and literal errors
//! - Helpful suggestions for reports shown to the user

pub mod errors;
