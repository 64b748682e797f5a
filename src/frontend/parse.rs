//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including error types, helper methods, and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following
//! organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing class definitions, declaration fragments, and
//!   callables with inferred return types
//! - `expressions`: Parsing initializer value expressions and arguments
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser does no semantic analysis of its own. It extracts identifier,
//! qualifier kind, and initializer structure; everything else — the vexing
//! parse, narrowing, deduction — is the analyzer's job. The one piece of
//! state it keeps is a table of declared names, so that a later fragment like
//! `float narrow{wide};` knows the static type of `wide`.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::frontend::ast::*;
use crate::frontend::lexer::{LexError, Lexer, Token};
use crate::types::TypeKind;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for declaration fragments
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Class names declared earlier in the unit; an identifier in type
    /// position must be one of these
    pub(crate) aggregate_names: FxHashSet<String>,
    /// Declared variable names and their static types
    pub(crate) symbols: FxHashMap<String, TypeKind>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            aggregate_names: FxHashSet::default(),
            symbols: FxHashMap::default(),
        })
    }

    /// Parse the entire unit: class definitions and fragments
    pub fn parse_unit(&mut self) -> Result<SourceUnit, ParseError> {
        let mut unit = SourceUnit::new();

        while !self.is_at_end() {
            if self.check(&Token::Class(self.current_location()))
                || self.check(&Token::Struct(self.current_location()))
            {
                let aggregate = self.parse_class_definition()?;
                self.aggregate_names.insert(aggregate.name.clone());
                unit.aggregates.push(aggregate);
            } else {
                let fragment = self.parse_fragment()?;
                self.bind_fragment(&fragment);
                unit.fragments.push(fragment);
            }
        }

        Ok(unit)
    }

    /// Record a declared name so later fragments can reference it.
    fn bind_fragment(&mut self, fragment: &Fragment) {
        match fragment {
            Fragment::Declaration(decl) => match &decl.qualifier {
                DeclaredQualifier::Explicit(ty) => {
                    self.symbols.insert(decl.identifier.clone(), ty.clone());
                }
                // Only literal single-value initializers are folded here;
                // real deduction belongs to the analyzer
                DeclaredQualifier::Inferred => {
                    if let InitializerForm::SingleValue(value) = &decl.initializer {
                        if value.constant().is_some() {
                            self.symbols
                                .insert(decl.identifier.clone(), value.static_type());
                        }
                    }
                }
                DeclaredQualifier::InferredBraced => {}
            },
            Fragment::Callable(_) => {}
        }
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek_token(),
            Token::Char(_)
                | Token::Short(_)
                | Token::Int(_)
                | Token::Long(_)
                | Token::Float(_)
                | Token::Double(_)
                | Token::Signed(_)
                | Token::Unsigned(_)
        )
    }

    /// Whether the current token starts a type: a primitive keyword or a
    /// previously declared class name.
    pub(crate) fn starts_type(&self) -> bool {
        if self.is_type_keyword() {
            return true;
        }
        matches!(self.peek_token(), Token::Ident(ref name, _) if self.aggregate_names.contains(name))
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }

    /// Static type of a previously declared name.
    pub(crate) fn lookup_symbol(&self, name: &str, location: SourceLocation) -> Result<TypeKind, ParseError> {
        self.symbols.get(name).cloned().ok_or_else(|| ParseError {
            message: format!("Unknown identifier '{}'", name),
            location,
        })
    }
}
