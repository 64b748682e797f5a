//! Declaration parsing implementation
//!
//! This module handles the fragment forms the analyzer understands:
//!
//! - Class definitions: `class Name { Name(); Name(int a); };`
//! - Declarations: `type name;`, `type name = expr;`, `type name(args);`,
//!   `type name{args};`, with `auto` in place of the type
//! - Callables with inferred return types:
//!   `auto name(params) -> trailing { return ...; }`
//!
//! # Grammar
//!
//! ```text
//! unit        ::= (class_def | fragment)*
//! class_def   ::= ("class" | "struct") identifier "{" ctor_decl* "}" ";"
//! fragment    ::= (type | "auto") identifier initializer? ";"
//! initializer ::= "=" expr | "=" brace_list | "(" args ")" | brace_list
//! type        ::= ["signed" | "unsigned"] base | identifier
//! ```
//!
//! The parser deliberately does NOT resolve the `(args)` ambiguity between a
//! variable definition and a function declaration; arguments that read as
//! type-ids stay [`Argument::TypeIdLike`] and the analyzer decides.

use crate::frontend::ast::*;
use crate::frontend::lexer::Token;
use crate::frontend::parse::{ParseError, Parser};
use crate::types::rank::RankTable;
use crate::types::{AggregateDef, ConstructorSignature, TypeKind};

impl Parser {
    /// Parse a class definition: class Name { constructors };
    pub(crate) fn parse_class_definition(&mut self) -> Result<AggregateDef, ParseError> {
        self.advance(); // consume 'class' or 'struct'
        let name = self.expect_identifier()?;

        self.expect_lbrace("after class name")?;

        let mut constructors = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            let ctor_name = self.expect_identifier()?;
            if ctor_name != name {
                return Err(ParseError {
                    message: format!(
                        "Expected constructor of '{}', found '{}'",
                        name, ctor_name
                    ),
                    location: self.previous_location(),
                });
            }

            self.expect_lparen("after constructor name")?;
            let params = self.parse_constructor_params()?;
            self.expect_rparen("after constructor parameters")?;
            self.expect_semicolon("after constructor declaration")?;

            constructors.push(ConstructorSignature::user_defined(params));
        }

        self.expect_rbrace("after class body")?;
        self.expect_semicolon("after class definition")?;

        if constructors.is_empty() {
            Ok(AggregateDef::new(&name))
        } else {
            Ok(AggregateDef::with_constructors(&name, constructors))
        }
    }

    /// Parse constructor parameter types: (type name?, type name?, ...)
    fn parse_constructor_params(&mut self) -> Result<Vec<TypeKind>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        loop {
            let ty = self.parse_type()?;
            // Parameter name is optional in a declaration
            if matches!(self.peek_token(), Token::Ident(_, _)) {
                self.advance();
            }
            params.push(ty);

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse one fragment: a declaration or a callable
    pub(crate) fn parse_fragment(&mut self) -> Result<Fragment, ParseError> {
        if self.check(&Token::Auto(self.current_location())) {
            return self.parse_auto_fragment();
        }

        let ty = self.parse_type()?;
        let identifier = self.expect_identifier()?;
        let location = self.previous_location();

        let initializer = self.parse_initializer()?;
        self.expect_semicolon("after declaration")?;

        Ok(Fragment::Declaration(DeclarationFragment {
            identifier,
            qualifier: DeclaredQualifier::Explicit(ty),
            initializer,
            location,
        }))
    }

    /// Parse a fragment that starts with `auto`: either a declaration with an
    /// inferred type or a callable with an inferred return type.
    fn parse_auto_fragment(&mut self) -> Result<Fragment, ParseError> {
        self.advance(); // consume 'auto'
        let identifier = self.expect_identifier()?;
        let location = self.previous_location();

        if self.check(&Token::LParen(self.current_location()))
            && self.looks_like_callable()
        {
            return self.parse_callable(identifier, location);
        }

        let initializer = self.parse_initializer()?;
        self.expect_semicolon("after declaration")?;

        let qualifier = match &initializer {
            InitializerForm::BraceList(_) => DeclaredQualifier::InferredBraced,
            _ => DeclaredQualifier::Inferred,
        };

        Ok(Fragment::Declaration(DeclarationFragment {
            identifier,
            qualifier,
            initializer,
            location,
        }))
    }

    /// Look ahead past the current '(' to decide between a callable and a
    /// parenthesized initializer. A callable has a typed parameter list
    /// (`int a`), or an empty one followed by `->` or a body.
    fn looks_like_callable(&mut self) -> bool {
        let saved_pos = self.position;
        self.advance(); // consume '('

        let result = if self.check(&Token::RParen(self.current_location())) {
            self.advance(); // consume ')'
            self.check(&Token::Arrow(self.current_location()))
                || self.check(&Token::LBrace(self.current_location()))
        } else if self.starts_type() {
            // A type followed by a parameter name means a parameter list;
            // a type followed by '(' or ')' is a type-id argument
            self.parse_type().is_ok() && matches!(self.peek_token(), Token::Ident(_, _))
        } else {
            false
        };

        self.position = saved_pos;
        result
    }

    /// Parse an initializer, or Empty when the declaration ends immediately.
    fn parse_initializer(&mut self) -> Result<InitializerForm, ParseError> {
        if self.check(&Token::Semicolon(self.current_location())) {
            return Ok(InitializerForm::Empty);
        }

        if self.match_token(&Token::Eq(self.current_location())) {
            if self.check(&Token::LBrace(self.current_location())) {
                // Copy-list-initialization still counts as brace syntax
                return self.parse_brace_list();
            }
            let value = self.parse_value_expr()?;
            return Ok(InitializerForm::SingleValue(value));
        }

        if self.check(&Token::LBrace(self.current_location())) {
            return self.parse_brace_list();
        }

        if self.match_token(&Token::LParen(self.current_location())) {
            let args = self.parse_argument_list()?;
            self.expect_rparen("after initializer arguments")?;
            return Ok(InitializerForm::ParenCall(args));
        }

        Err(ParseError {
            message: format!("Expected initializer or ';', found {}", self.peek()),
            location: self.current_location(),
        })
    }

    /// Parse a brace-delimited initializer list
    fn parse_brace_list(&mut self) -> Result<InitializerForm, ParseError> {
        self.expect_lbrace("before initializer list")?;

        let mut elements = Vec::new();
        if !self.check(&Token::RBrace(self.current_location())) {
            loop {
                elements.push(self.parse_value_expr()?);
                if !self.match_token(&Token::Comma(self.current_location())) {
                    break;
                }
            }
        }

        self.expect_rbrace("after initializer list")?;
        Ok(InitializerForm::BraceList(elements))
    }

    /// Parse type: [signed|unsigned] base, or a declared class name
    pub(crate) fn parse_type(&mut self) -> Result<TypeKind, ParseError> {
        let mut signed = true;
        let mut saw_sign = false;

        if self.match_token(&Token::Signed(self.current_location())) {
            saw_sign = true;
        } else if self.match_token(&Token::Unsigned(self.current_location())) {
            saw_sign = true;
            signed = false;
        }

        if self.match_token(&Token::Char(self.current_location())) {
            return Ok(TypeKind::integral(8, signed));
        }
        if self.match_token(&Token::Short(self.current_location())) {
            return Ok(TypeKind::integral(16, signed));
        }
        if self.match_token(&Token::Int(self.current_location())) {
            return Ok(TypeKind::integral(32, signed));
        }
        if self.match_token(&Token::Long(self.current_location())) {
            // 'long long' and a trailing 'int' both collapse to 64 bits
            self.match_token(&Token::Long(self.current_location()));
            self.match_token(&Token::Int(self.current_location()));
            return Ok(TypeKind::integral(64, signed));
        }

        if saw_sign {
            // 'unsigned x' alone means unsigned int
            return Ok(TypeKind::integral(32, signed));
        }

        if self.match_token(&Token::Float(self.current_location())) {
            return Ok(TypeKind::floating(32));
        }
        if self.match_token(&Token::Double(self.current_location())) {
            return Ok(TypeKind::floating(64));
        }

        if let Token::Ident(name, _) = self.peek_token() {
            if self.aggregate_names.contains(&name) {
                self.advance();
                return Ok(TypeKind::Aggregate(name));
            }
        }

        Err(ParseError {
            message: format!("Expected type, found {}", self.peek()),
            location: self.current_location(),
        })
    }

    /// Parse a callable: (params) [-> trailing] body-or-';'
    fn parse_callable(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<Fragment, ParseError> {
        self.expect_lparen("after callable name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        let trailing = if self.match_token(&Token::Arrow(self.current_location())) {
            Some(self.parse_trailing_return()?)
        } else {
            None
        };

        let return_paths = if self.check(&Token::LBrace(self.current_location())) {
            self.parse_callable_body(&params)?
        } else {
            self.expect_semicolon("after callable declaration")?;
            Vec::new()
        };

        Ok(Fragment::Callable(CallableFragment {
            name,
            params,
            trailing,
            return_paths,
            location,
        }))
    }

    /// Parse parameter list: (type name, type name, ...)
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        loop {
            let ty = self.parse_type()?;
            let name = self.expect_identifier()?;
            params.push(Param { name, ty });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse trailing return: a concrete type or a decltype form
    fn parse_trailing_return(&mut self) -> Result<TrailingReturn, ParseError> {
        if self.match_token(&Token::Decltype(self.current_location())) {
            let location = self.previous_location();
            self.expect_lparen("after 'decltype'")?;
            let left = self.expect_identifier()?;

            let trailing = if self.match_token(&Token::Plus(self.current_location())) {
                let right = self.expect_identifier()?;
                TrailingReturn::DecltypeAdd {
                    left,
                    right,
                    location,
                }
            } else {
                TrailingReturn::DecltypeParam {
                    name: left,
                    location,
                }
            };

            self.expect_rparen("after decltype operand")?;
            Ok(trailing)
        } else {
            let ty = self.parse_type()?;
            Ok(TrailingReturn::Annotated(ty))
        }
    }

    /// Parse a callable body, collecting the static type of each return path.
    fn parse_callable_body(&mut self, params: &[Param]) -> Result<Vec<ReturnPath>, ParseError> {
        self.expect_lbrace("before callable body")?;

        let mut paths = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            self.expect_token(
                &Token::Return(self.current_location()),
                "Expected 'return' statement",
            )?;
            let location = self.previous_location();
            let ty = self.parse_return_expr_type(params)?;
            self.expect_semicolon("after return expression")?;
            paths.push(ReturnPath { ty, location });
        }

        self.expect_rbrace("after callable body")?;
        Ok(paths)
    }

    /// Static type of one return expression: a literal, a parameter, a sum of
    /// two parameters, or a call (which the front end cannot type).
    fn parse_return_expr_type(&mut self, params: &[Param]) -> Result<TypeKind, ParseError> {
        let first = self.parse_return_operand_type(params)?;

        if self.match_token(&Token::Plus(self.current_location())) {
            let second = self.parse_return_operand_type(params)?;
            return Ok(RankTable::global().promote(&first, &second));
        }

        Ok(first)
    }

    fn parse_return_operand_type(&mut self, params: &[Param]) -> Result<TypeKind, ParseError> {
        match self.peek_token() {
            Token::IntLiteral(_, _) => {
                self.advance();
                Ok(TypeKind::integral(32, true))
            }
            Token::FloatLiteral(_, single, _) => {
                self.advance();
                Ok(TypeKind::floating(if single { 32 } else { 64 }))
            }
            Token::Minus(_) => {
                self.advance();
                self.parse_return_operand_type(params)
            }
            Token::Ident(name, location) => {
                self.advance();

                if self.match_token(&Token::LParen(self.current_location())) {
                    // A call; skip the argument tokens up to the closing
                    // paren. Recursive calls land here too.
                    let mut depth = 1usize;
                    while depth > 0 {
                        match self.peek_token() {
                            Token::LParen(_) => depth += 1,
                            Token::RParen(_) => depth -= 1,
                            Token::Eof(_) => {
                                return Err(ParseError {
                                    message: "Unterminated call in return expression"
                                        .to_string(),
                                    location,
                                });
                            }
                            _ => {}
                        }
                        self.advance();
                    }
                    return Ok(TypeKind::Unknown);
                }

                if let Some(param) = params.iter().find(|p| p.name == name) {
                    return Ok(param.ty.clone());
                }
                self.lookup_symbol(&name, location)
            }
            other => Err(ParseError {
                message: format!("Expected return expression, found {}", other),
                location: self.current_location(),
            }),
        }
    }
}
