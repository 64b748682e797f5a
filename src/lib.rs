//! # Introduction
//!
//! vexcheck analyzes small C++ declaration fragments for three interacting
//! rules of declaration and initialization semantics: the most vexing parse,
//! narrowing conversions inside braced initializer lists, and `auto` type
//! deduction, including the special case where a braced initializer deduces
//! a list-container type rather than the element type.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexer → Parser → Fragments → Analyzer → Judgments
//! ```
//!
//! 1. [`frontend`] — tokenises the source and extracts
//!    [`frontend::ast::DeclarationFragment`]s and
//!    [`frontend::ast::CallableFragment`]s.
//! 2. [`analyzer`] — classifies each fragment's syntactic role, deduces
//!    inferred types, and checks every initializer conversion, producing one
//!    [`analyzer::judgment::Judgment`] per fragment.
//! 3. [`types`] — the shared type model: primitive kinds, the conversion-rank
//!    lattice, aggregates and their constructor surfaces.
//!
//! ## Supported fragment subset
//!
//! Class definitions listing constructor signatures; variable declarations
//! with explicit types or `auto`, initialized by `=`, parentheses, braces, or
//! nothing; callables with inferred return types and an optional trailing
//! `-> type` / `-> decltype(...)` annotation.
//!
//! The library never renders text. Every conclusion, including every
//! diagnostic, is data on the returned judgment; the binary is the only
//! place that prints.

pub mod analyzer;
pub mod frontend;
pub mod types;
