//! Declaration analysis pipeline
//!
//! This module composes the three rule sets into one pipeline per fragment:
//! - [`engine`]: The [`engine::Analyzer`] with its registries and the
//!   classify, deduce, check sequence
//! - [`disambiguate`]: Variable definition vs function declaration
//! - [`conversion`]: Narrowing detection over the conversion-rank lattice
//! - [`deduction`]: Inferred-type and trailing-return deduction
//! - [`judgment`]: The output model returned to callers
//! - [`diagnostics`]: Typed diagnostics with the severity taxonomy
//!
//! # Analysis Model
//!
//! Each fragment is judged independently. Classification decides the
//! syntactic role; deduction runs when the qualifier is inferred; every
//! initializer element is then conversion-checked against the declared or
//! deduced target type. The aggregate and free-function registries are
//! populated before analysis, and `analyze` itself takes `&self`, so
//! repeated analyses of the same fragment produce identical judgments.

pub mod conversion;
pub mod deduction;
pub mod diagnostics;
pub mod disambiguate;
pub mod engine;
pub mod judgment;
