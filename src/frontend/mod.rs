//! Declaration fragment front end
//!
//! This module transforms declaration source text into analyzer input:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → fragments)
//! - [`ast`]: Fragment definitions
//!
//! # Supported Subset
//!
//! The front end covers exactly the declaration forms the analyzer judges:
//! - Class definitions listing constructor signatures
//! - Variable declarations with explicit types or `auto`, initialized by
//!   `=`, parentheses, braces, or nothing
//! - Callables with an inferred return type and an optional trailing
//!   `-> type` / `-> decltype(...)` annotation
//! - Expressions limited to literals, `static_cast`, constructor calls, and
//!   declared names
//!
//! No templates, no overloads, no statements beyond `return`. Anything the
//! analyzer cannot judge is rejected at parse time.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent. The one lookahead subtlety lives in
//! `declarations`: deciding whether `auto name(...)` opens a callable or a
//! parenthesized initializer without resolving the vexing parse itself.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
