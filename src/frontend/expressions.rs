//! Initializer expression parsing
//!
//! Value expressions are deliberately small: literals (optionally negated),
//! `static_cast<T>(expr)`, constructor calls of declared classes, and
//! references to previously declared names. Arguments inside a parenthesized
//! initializer go through [`Parser::parse_argument_list`], which keeps
//! type-id-like forms unresolved for the analyzer.

use crate::frontend::ast::*;
use crate::frontend::lexer::Token;
use crate::frontend::parse::{ParseError, Parser};
use crate::types::TypeKind;

impl Parser {
    /// Parse one value expression
    pub(crate) fn parse_value_expr(&mut self) -> Result<ValueExpr, ParseError> {
        match self.peek_token() {
            Token::IntLiteral(value, location) => {
                self.advance();
                Ok(ValueExpr::IntLiteral {
                    value,
                    ty: TypeKind::integral(32, true),
                    location,
                })
            }
            Token::FloatLiteral(value, single, location) => {
                self.advance();
                Ok(ValueExpr::FloatLiteral {
                    value,
                    ty: TypeKind::floating(if single { 32 } else { 64 }),
                    location,
                })
            }
            Token::Minus(location) => {
                self.advance();
                let inner = self.parse_value_expr()?;
                match inner {
                    ValueExpr::IntLiteral { value, ty, .. } => Ok(ValueExpr::IntLiteral {
                        value: -value,
                        ty,
                        location,
                    }),
                    ValueExpr::FloatLiteral { value, ty, .. } => Ok(ValueExpr::FloatLiteral {
                        value: -value,
                        ty,
                        location,
                    }),
                    _ => Err(ParseError {
                        message: "Expected numeric literal after '-'".to_string(),
                        location,
                    }),
                }
            }
            Token::StaticCast(location) => self.parse_cast(location),
            Token::Ident(name, location) => {
                self.advance();

                if self.aggregate_names.contains(&name) {
                    self.expect_lparen("after class name")?;
                    let args = self.parse_value_list()?;
                    self.expect_rparen("after constructor arguments")?;
                    return Ok(ValueExpr::Construct {
                        callee: name,
                        args,
                        location,
                    });
                }

                if self.check(&Token::LParen(self.current_location())) {
                    return Err(ParseError {
                        message: format!("Unknown function '{}'", name),
                        location,
                    });
                }

                let ty = self.lookup_symbol(&name, location)?;
                Ok(ValueExpr::Opaque { name, ty, location })
            }
            other => Err(ParseError {
                message: format!("Expected expression, found {}", other),
                location: self.current_location(),
            }),
        }
    }

    /// Parse static_cast<T>(expr)
    fn parse_cast(&mut self, location: SourceLocation) -> Result<ValueExpr, ParseError> {
        self.advance(); // consume 'static_cast'
        self.expect_token(
            &Token::Lt(self.current_location()),
            "Expected '<' after 'static_cast'",
        )?;
        let target = self.parse_type()?;
        self.expect_token(
            &Token::Gt(self.current_location()),
            "Expected '>' after cast target type",
        )?;
        self.expect_lparen("after cast target")?;
        let operand = self.parse_value_expr()?;
        self.expect_rparen("after cast operand")?;

        Ok(ValueExpr::Cast {
            target,
            operand: Box::new(operand),
            location,
        })
    }

    /// Parse comma-separated value expressions up to (not including) ')'
    fn parse_value_list(&mut self) -> Result<Vec<ValueExpr>, ParseError> {
        let mut values = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(values);
        }

        loop {
            values.push(self.parse_value_expr()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(values)
    }

    /// Parse the arguments of a parenthesized initializer, up to ')'.
    ///
    /// Forms that read as type-ids (`ExampleClass()`, a bare type name) stay
    /// [`Argument::TypeIdLike`]; everything else is parsed as a value.
    pub(crate) fn parse_argument_list(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_argument()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        if !self.starts_type() {
            return Ok(Argument::Value(self.parse_value_expr()?));
        }

        let location = self.current_location();
        let ty = self.parse_type()?;

        if !self.check(&Token::LParen(self.current_location())) {
            // A bare type name is a pure type-id
            return Ok(Argument::TypeIdLike { ty, location });
        }

        if matches!(self.peek_ahead(1), Some(Token::RParen(_))) {
            // `T()`: either a nullary construction or a function type-id.
            // The disambiguator decides, not the parser.
            self.advance(); // consume '('
            self.advance(); // consume ')'
            return Ok(Argument::TypeIdLike { ty, location });
        }

        // `T(args...)` with real arguments can only be a construction
        match ty {
            TypeKind::Aggregate(callee) => {
                self.advance(); // consume '('
                let args = self.parse_value_list()?;
                self.expect_rparen("after constructor arguments")?;
                Ok(Argument::Value(ValueExpr::Construct {
                    callee,
                    args,
                    location,
                }))
            }
            _ => Err(ParseError {
                message: format!("Expected ')' in function type-id, found {}", self.peek()),
                location: self.current_location(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parse::Parser;

    fn parse_single_value(source: &str) -> ValueExpr {
        let mut parser = Parser::new(source).unwrap();
        let unit = parser.parse_unit().unwrap();
        match unit.fragments.into_iter().next().unwrap() {
            Fragment::Declaration(decl) => match decl.initializer {
                InitializerForm::SingleValue(value) => value,
                other => panic!("Expected single value, got {:?}", other),
            },
            _ => panic!("Expected declaration fragment"),
        }
    }

    #[test]
    fn test_negated_literal() {
        let value = parse_single_value("char c = -5;");
        match value {
            ValueExpr::IntLiteral { value, .. } => assert_eq!(value, -5),
            other => panic!("Expected int literal, got {:?}", other),
        }
    }

    #[test]
    fn test_cast_expression() {
        let value = parse_single_value("char c = static_cast<char>(512);");
        match value {
            ValueExpr::Cast { target, operand, .. } => {
                assert_eq!(target, TypeKind::integral(8, true));
                assert!(matches!(
                    *operand,
                    ValueExpr::IntLiteral { value: 512, .. }
                ));
            }
            other => panic!("Expected cast, got {:?}", other),
        }
    }

    #[test]
    fn test_float_suffix_types() {
        let single = parse_single_value("float f = 4.5f;");
        assert_eq!(single.static_type(), TypeKind::floating(32));

        let double = parse_single_value("double d = 4.5;");
        assert_eq!(double.static_type(), TypeKind::floating(64));
    }

    #[test]
    fn test_constructor_call_value() {
        let source = r#"
            class Widget { Widget(int a); };
            auto w = Widget(7);
        "#;
        let mut parser = Parser::new(source).unwrap();
        let unit = parser.parse_unit().unwrap();
        match &unit.fragments[0] {
            Fragment::Declaration(decl) => match &decl.initializer {
                InitializerForm::SingleValue(ValueExpr::Construct { callee, args, .. }) => {
                    assert_eq!(callee, "Widget");
                    assert_eq!(args.len(), 1);
                }
                other => panic!("Expected construct, got {:?}", other),
            },
            _ => panic!("Expected declaration fragment"),
        }
    }

    #[test]
    fn test_bare_type_argument_is_type_id() {
        let source = r#"
            class Holder { Holder(); };
            Holder h(double);
        "#;
        let mut parser = Parser::new(source).unwrap();
        let unit = parser.parse_unit().unwrap();
        match &unit.fragments[0] {
            Fragment::Declaration(decl) => match &decl.initializer {
                InitializerForm::ParenCall(args) => {
                    assert!(args[0].is_type_id_like());
                }
                other => panic!("Expected paren call, got {:?}", other),
            },
            _ => panic!("Expected declaration fragment"),
        }
    }
}
