//! Type and method type grammar
//!
//! Precedence from loosest to tightest: `|`, `&`, postfix `?`, simple types.
//! Return types stop at the optional level so that `|` can separate method
//! overloads; write `-> (A | B)` for a union return.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::errors::{ErrorCode, SyntaxError};
use super::parser::{PResult, Parser};
use super::syntax_kind::SyntaxKind;
use crate::base::{Namespace, TypeName, TypeNameKind};
use crate::syntax::{Block, FunctionType, Literal, MethodType, Param, Type};

impl<'a> Parser<'a> {
    // =========================================================================
    // Names
    // =========================================================================

    /// Any type name: `Foo`, `::Foo::Bar`, `_Each`, `json`.
    pub(super) fn parse_type_name_any(&mut self) -> PResult<TypeName> {
        let absolute = self.eat(SyntaxKind::COLON2);
        let mut path = Vec::new();
        loop {
            let text = self.current_text();
            match self.current_kind() {
                SyntaxKind::UIDENT if self.nth(1) == SyntaxKind::COLON2 => {
                    path.push(SmolStr::new(text));
                    self.bump();
                    self.bump();
                }
                SyntaxKind::UIDENT | SyntaxKind::INTERFACE_IDENT | SyntaxKind::LIDENT => {
                    self.bump();
                    return Ok(TypeName::new(Namespace::new(path, absolute), text));
                }
                _ => return Err(self.unexpected("expected a type name", ErrorCode::E0303)),
            }
        }
    }

    /// `[T, U]` after a class or interface name; empty when absent.
    pub(super) fn parse_type_args(&mut self) -> PResult<Vec<Type>> {
        let mut args = Vec::new();
        if !self.eat(SyntaxKind::L_BRACKET) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_type()?);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET)?;
        Ok(args)
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(super) fn parse_type(&mut self) -> PResult<Type> {
        let first = self.parse_intersection_type()?;
        if !self.at(SyntaxKind::PIPE) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(SyntaxKind::PIPE) {
            types.push(self.parse_intersection_type()?);
        }
        Ok(Type::Union { types })
    }

    fn parse_intersection_type(&mut self) -> PResult<Type> {
        let first = self.parse_optional_type()?;
        if !self.at(SyntaxKind::AMP) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(SyntaxKind::AMP) {
            types.push(self.parse_optional_type()?);
        }
        Ok(Type::Intersection { types })
    }

    pub(super) fn parse_optional_type(&mut self) -> PResult<Type> {
        let ty = self.parse_simple_type()?;
        if self.eat(SyntaxKind::QUESTION) {
            return Ok(Type::Optional { ty: Box::new(ty) });
        }
        Ok(ty)
    }

    fn parse_simple_type(&mut self) -> PResult<Type> {
        let keyword = match self.current_kind() {
            SyntaxKind::VOID_KW => Some(Type::Void),
            SyntaxKind::UNTYPED_KW => Some(Type::Untyped),
            SyntaxKind::BOOL_KW => Some(Type::Bool),
            SyntaxKind::NIL_KW => Some(Type::Nil),
            SyntaxKind::TOP_KW => Some(Type::Top),
            SyntaxKind::BOT_KW => Some(Type::Bot),
            SyntaxKind::SELF_KW => Some(Type::SelfType),
            SyntaxKind::INSTANCE_KW => Some(Type::Instance),
            SyntaxKind::CLASS_KW => Some(Type::Class),
            SyntaxKind::TRUE_KW => Some(Type::Literal {
                literal: Literal::Bool(true),
            }),
            SyntaxKind::FALSE_KW => Some(Type::Literal {
                literal: Literal::Bool(false),
            }),
            _ => None,
        };
        if let Some(ty) = keyword {
            self.bump();
            return Ok(ty);
        }

        match self.current_kind() {
            SyntaxKind::L_PAREN => {
                self.bump();
                let ty = self.parse_type()?;
                self.expect(SyntaxKind::R_PAREN)?;
                Ok(ty)
            }
            SyntaxKind::INTEGER => self.parse_integer_literal(false),
            SyntaxKind::MINUS if self.nth(1) == SyntaxKind::INTEGER && self.nth_adjacent(1) => {
                self.bump();
                self.parse_integer_literal(true)
            }
            SyntaxKind::STRING => {
                let text = self.current_text();
                self.bump();
                let inner = &text[1..text.len() - 1];
                Ok(Type::Literal {
                    literal: Literal::String(SmolStr::new(inner)),
                })
            }
            SyntaxKind::COLON if self.nth_adjacent(1) => {
                self.bump();
                let name = self.parse_method_name()?;
                Ok(Type::Literal {
                    literal: Literal::Symbol(name),
                })
            }
            SyntaxKind::SINGLETON_KW => {
                self.bump();
                self.expect(SyntaxKind::L_PAREN)?;
                let name = self.parse_class_name()?;
                self.expect(SyntaxKind::R_PAREN)?;
                Ok(Type::ClassSingleton { name })
            }
            SyntaxKind::L_BRACKET => self.parse_tuple_type(),
            SyntaxKind::L_BRACE => self.parse_record_type(),
            SyntaxKind::CARET => {
                self.bump();
                self.expect(SyntaxKind::L_PAREN)?;
                let mut function = self.parse_params(SyntaxKind::R_PAREN)?;
                self.expect(SyntaxKind::ARROW)?;
                function.return_type = self.parse_optional_type()?;
                Ok(Type::Proc {
                    function: Box::new(function),
                })
            }
            SyntaxKind::UIDENT
                if self.nth(1) != SyntaxKind::COLON2 && self.is_type_var(self.current_text()) =>
            {
                let name = self.current_text();
                self.bump();
                Ok(Type::variable(name))
            }
            SyntaxKind::UIDENT
            | SyntaxKind::COLON2
            | SyntaxKind::INTERFACE_IDENT
            | SyntaxKind::LIDENT => {
                let name = self.parse_type_name_any()?;
                Ok(match name.kind() {
                    TypeNameKind::Class => Type::ClassInstance {
                        args: self.parse_type_args()?,
                        name,
                    },
                    TypeNameKind::Interface => Type::Interface {
                        args: self.parse_type_args()?,
                        name,
                    },
                    TypeNameKind::Alias => Type::Alias { name },
                })
            }
            _ => Err(self.unexpected("expected a type", ErrorCode::E0401)),
        }
    }

    fn parse_integer_literal(&mut self, negative: bool) -> PResult<Type> {
        let Some(token) = self.bump() else {
            return Err(self.unexpected("expected an integer", ErrorCode::E0401));
        };
        let value: i64 = token.text.parse().map_err(|_| {
            SyntaxError::new(
                format!("integer literal `{}` is out of range", token.text),
                token.range,
                ErrorCode::E0102,
            )
        })?;
        Ok(Type::Literal {
            literal: Literal::Integer(if negative { -value } else { value }),
        })
    }

    fn parse_tuple_type(&mut self) -> PResult<Type> {
        self.expect(SyntaxKind::L_BRACKET)?;
        let mut types = Vec::new();
        if !self.at(SyntaxKind::R_BRACKET) {
            loop {
                types.push(self.parse_type()?);
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_BRACKET)?;
        Ok(Type::Tuple { types })
    }

    fn parse_record_type(&mut self) -> PResult<Type> {
        self.expect(SyntaxKind::L_BRACE)?;
        let mut fields = IndexMap::new();
        loop {
            if !self.current_kind().is_name_like() {
                return Err(self.unexpected("expected a record key", ErrorCode::E0303));
            }
            let key = SmolStr::new(self.current_text());
            self.bump();
            self.expect(SyntaxKind::COLON)?;
            fields.insert(key, self.parse_type()?);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(Type::Record { fields })
    }

    // =========================================================================
    // Method types
    // =========================================================================

    /// `[T] (params) { block } -> R`
    pub(super) fn parse_method_type(&mut self) -> PResult<MethodType> {
        let mut type_params = Vec::new();
        if self.eat(SyntaxKind::L_BRACKET) {
            loop {
                type_params.push(SmolStr::new(self.expect(SyntaxKind::UIDENT)?.text));
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_BRACKET)?;
        }

        self.with_type_vars(type_params.clone(), |p| {
            let mut function = if p.eat(SyntaxKind::L_PAREN) {
                p.parse_params(SyntaxKind::R_PAREN)?
            } else {
                FunctionType::returning(Type::Void)
            };
            let block = p.parse_block()?;
            p.expect(SyntaxKind::ARROW)?;
            function.return_type = p.parse_optional_type()?;
            Ok(MethodType {
                type_params,
                function,
                block,
            })
        })
    }

    fn parse_block(&mut self) -> PResult<Option<Block>> {
        let required = if self.at(SyntaxKind::QUESTION) && self.nth(1) == SyntaxKind::L_BRACE {
            self.bump();
            false
        } else if self.at(SyntaxKind::L_BRACE) {
            true
        } else {
            return Ok(None);
        };
        self.expect(SyntaxKind::L_BRACE)?;
        let mut function = if self.eat(SyntaxKind::L_PAREN) {
            self.parse_params(SyntaxKind::R_PAREN)?
        } else {
            FunctionType::returning(Type::Void)
        };
        self.expect(SyntaxKind::ARROW)?;
        function.return_type = self.parse_optional_type()?;
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(Some(Block { function, required }))
    }

    /// Parameters after the opening delimiter, up to and including `closing`.
    ///
    /// Positionals after an optional or rest positional become trailing.
    /// The return type is left as `void` for the caller to fill in.
    fn parse_params(&mut self, closing: SyntaxKind) -> PResult<FunctionType> {
        let mut function = FunctionType::returning(Type::Void);
        if self.eat(closing) {
            return Ok(function);
        }

        let mut trailing = false;
        loop {
            if self.at(SyntaxKind::QUESTION)
                && self.nth(1).is_name_like()
                && self.nth(2) == SyntaxKind::COLON
            {
                self.bump();
                let key = SmolStr::new(self.current_text());
                self.bump();
                self.bump();
                let param = self.parse_param()?;
                function.optional_keywords.insert(key, param);
            } else if self.eat(SyntaxKind::QUESTION) {
                function.optional_positionals.push(self.parse_param()?);
                trailing = true;
            } else if self.eat(SyntaxKind::STAR2) {
                function.rest_keywords = Some(self.parse_param()?);
            } else if self.eat(SyntaxKind::STAR) {
                function.rest_positionals = Some(self.parse_param()?);
                trailing = true;
            } else if self.current_kind().is_name_like() && self.nth(1) == SyntaxKind::COLON {
                let key = SmolStr::new(self.current_text());
                self.bump();
                self.bump();
                let param = self.parse_param()?;
                function.required_keywords.insert(key, param);
            } else {
                let param = self.parse_param()?;
                if trailing {
                    function.trailing_positionals.push(param);
                } else {
                    function.required_positionals.push(param);
                }
            }

            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(closing)?;
        Ok(function)
    }

    /// A parameter type with an optional lowercase name.
    fn parse_param(&mut self) -> PResult<Param> {
        let ty = self.parse_type()?;
        let kind = self.current_kind();
        let name = if kind == SyntaxKind::LIDENT || kind.is_keyword() {
            let name = SmolStr::new(self.current_text());
            self.bump();
            Some(name)
        } else {
            None
        };
        Ok(Param::new(ty, name))
    }
}
