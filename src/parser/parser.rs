//! Recursive descent parser for signature files
//!
//! Produces [`Declaration`]s directly. Trivia is dropped before parsing;
//! the source text is still consulted for line breaks (`private def` on one
//! line) and token adjacency (`foo?`, `:sym`).

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::TypeName;
use crate::syntax::{
    AliasDecl, AliasKind, Attribute, ClassDecl, ConstantDecl, Declaration, ExtensionDecl,
    GlobalDecl, InstanceVariable, InterfaceDecl, Member, MethodAlias, MethodDefinition,
    MethodKind, Mixin, ModuleDecl, SuperClass, TypeParam, Variance, Visibility, param_names,
};

pub(super) type PResult<T> = Result<T, SyntaxError>;

/// Parse result containing the declarations and any errors
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    pub declarations: Vec<Declaration>,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse signature source text
pub fn parse_signature(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).filter(|t| !t.kind.is_trivia()).collect();
    let mut parser = Parser::new(input, tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Where a member list appears; decides which members are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberContext {
    Class,
    Interface,
    Extension,
}

/// The parser state
pub(super) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    declarations: Vec<Declaration>,
    errors: Vec<SyntaxError>,
    /// Type variables in scope, innermost last
    type_vars: Vec<Vec<SmolStr>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token<'a>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            declarations: Vec::new(),
            errors: Vec::new(),
            type_vars: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            declarations: self.declarations,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(super) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(super) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Whether token `n` directly follows token `n - 1` with nothing between.
    pub(super) fn nth_adjacent(&self, n: usize) -> bool {
        let idx = self.pos + n;
        if idx == 0 {
            return false;
        }
        match (self.tokens.get(idx - 1), self.tokens.get(idx)) {
            (Some(prev), Some(next)) => prev.range.end() == next.range.start(),
            _ => false,
        }
    }

    /// Whether tokens `a` and `b` (relative to the cursor) are on one line.
    fn same_line(&self, a: usize, b: usize) -> bool {
        match (self.tokens.get(self.pos + a), self.tokens.get(self.pos + b)) {
            (Some(first), Some(second)) => {
                let between = usize::from(first.range.end())..usize::from(second.range.start());
                !self.source[between].contains('\n')
            }
            _ => false,
        }
    }

    fn current_range(&self) -> TextRange {
        match self.current() {
            Some(token) => token.range,
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> PResult<Token<'a>> {
        if self.at(kind) {
            if let Some(token) = self.bump() {
                return Ok(token);
            }
        }
        Err(self.unexpected(&format!("expected {}", kind.describe()), ErrorCode::E0201))
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(super) fn unexpected(&self, message: &str, code: ErrorCode) -> SyntaxError {
        let range = self.current_range();
        match self.current() {
            Some(token) if token.kind == SyntaxKind::ERROR => SyntaxError::new(
                format!("invalid character `{}`", token.text),
                range,
                ErrorCode::E0101,
            ),
            Some(token) => SyntaxError::new(format!("{message}, found `{}`", token.text), range, code),
            None => SyntaxError::new(format!("{message}, found end of file"), range, code),
        }
    }

    /// Skip to the next token that can start a top-level declaration.
    fn recover(&mut self) {
        self.bump();
        while !self.at_eof()
            && !matches!(
                self.current_kind(),
                SyntaxKind::CLASS_KW
                    | SyntaxKind::MODULE_KW
                    | SyntaxKind::INTERFACE_KW
                    | SyntaxKind::EXTENSION_KW
                    | SyntaxKind::TYPE_KW
                    | SyntaxKind::GLOBAL
            )
        {
            self.bump();
        }
    }

    // =========================================================================
    // Type variable scopes
    // =========================================================================

    pub(super) fn is_type_var(&self, name: &str) -> bool {
        self.type_vars
            .iter()
            .rev()
            .any(|scope| scope.iter().any(|v| v == name))
    }

    pub(super) fn with_type_vars<T>(
        &mut self,
        vars: Vec<SmolStr>,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.type_vars.push(vars);
        let result = f(self);
        self.type_vars.pop();
        result
    }

    /// Nested declarations do not see the enclosing type parameters.
    fn without_type_vars<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = std::mem::take(&mut self.type_vars);
        let result = f(self);
        self.type_vars = saved;
        result
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_source_file(&mut self) {
        while !self.at_eof() {
            match self.parse_declaration() {
                Ok(decl) => self.declarations.push(decl),
                Err(error) => {
                    self.errors.push(error);
                    self.recover();
                }
            }
        }
    }

    fn parse_declaration(&mut self) -> PResult<Declaration> {
        match self.current_kind() {
            SyntaxKind::CLASS_KW => self.parse_class_decl().map(Declaration::Class),
            SyntaxKind::MODULE_KW => self.parse_module_decl().map(Declaration::Module),
            SyntaxKind::INTERFACE_KW => self.parse_interface_decl().map(Declaration::Interface),
            SyntaxKind::EXTENSION_KW => self.parse_extension_decl().map(Declaration::Extension),
            SyntaxKind::TYPE_KW => self.parse_alias_decl().map(Declaration::Alias),
            SyntaxKind::GLOBAL => self.parse_global_decl().map(Declaration::Global),
            SyntaxKind::UIDENT | SyntaxKind::COLON2 => {
                self.parse_constant_decl().map(Declaration::Constant)
            }
            _ => Err(self.unexpected("expected a declaration", ErrorCode::E0301)),
        }
    }

    fn parse_class_decl(&mut self) -> PResult<ClassDecl> {
        self.expect(SyntaxKind::CLASS_KW)?;
        let name = self.parse_class_name()?;
        let type_params = self.parse_type_params()?;
        self.with_type_vars(param_names(&type_params), |p| {
            let super_class = if p.eat(SyntaxKind::LT) {
                let name = p.parse_class_name()?;
                let args = p.parse_type_args()?;
                Some(SuperClass { name, args })
            } else {
                None
            };
            let members = p.parse_members(MemberContext::Class)?;
            Ok(ClassDecl {
                name,
                type_params,
                super_class,
                members,
            })
        })
    }

    fn parse_module_decl(&mut self) -> PResult<ModuleDecl> {
        self.expect(SyntaxKind::MODULE_KW)?;
        let name = self.parse_class_name()?;
        let type_params = self.parse_type_params()?;
        self.with_type_vars(param_names(&type_params), |p| {
            let members = p.parse_members(MemberContext::Class)?;
            Ok(ModuleDecl {
                name,
                type_params,
                members,
            })
        })
    }

    fn parse_interface_decl(&mut self) -> PResult<InterfaceDecl> {
        self.expect(SyntaxKind::INTERFACE_KW)?;
        let range = self.current_range();
        let name = self.parse_type_name_any()?;
        if !name.is_interface() {
            return Err(SyntaxError::new(
                format!("interface name must start with `_`, found `{name}`"),
                range,
                ErrorCode::E0303,
            ));
        }
        let type_params = self.parse_type_params()?;
        self.with_type_vars(param_names(&type_params), |p| {
            let members = p.parse_members(MemberContext::Interface)?;
            Ok(InterfaceDecl {
                name,
                type_params,
                members,
            })
        })
    }

    fn parse_extension_decl(&mut self) -> PResult<ExtensionDecl> {
        self.expect(SyntaxKind::EXTENSION_KW)?;
        let name = self.parse_class_name()?;
        let type_params = self.parse_type_params()?;
        self.expect(SyntaxKind::L_PAREN)?;
        let extension_name = SmolStr::new(self.expect(SyntaxKind::UIDENT)?.text);
        self.expect(SyntaxKind::R_PAREN)?;
        self.with_type_vars(param_names(&type_params), |p| {
            let members = p.parse_members(MemberContext::Extension)?;
            Ok(ExtensionDecl {
                name,
                type_params,
                extension_name,
                members,
            })
        })
    }

    fn parse_alias_decl(&mut self) -> PResult<AliasDecl> {
        self.expect(SyntaxKind::TYPE_KW)?;
        let range = self.current_range();
        let name = self.parse_type_name_any()?;
        if name.is_class() || name.is_interface() {
            return Err(SyntaxError::new(
                format!("type alias name must start with a lowercase letter, found `{name}`"),
                range,
                ErrorCode::E0303,
            ));
        }
        self.expect(SyntaxKind::EQ)?;
        let ty = self.parse_type()?;
        Ok(AliasDecl { name, ty })
    }

    fn parse_constant_decl(&mut self) -> PResult<ConstantDecl> {
        let name = self.parse_class_name()?;
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type()?;
        Ok(ConstantDecl { name, ty })
    }

    fn parse_global_decl(&mut self) -> PResult<GlobalDecl> {
        let name = SmolStr::new(self.expect(SyntaxKind::GLOBAL)?.text);
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type()?;
        Ok(GlobalDecl { name, ty })
    }

    /// A class or module name: `Foo`, `::Foo::Bar`.
    pub(super) fn parse_class_name(&mut self) -> PResult<TypeName> {
        let range = self.current_range();
        let name = self.parse_type_name_any()?;
        if !name.is_class() {
            return Err(SyntaxError::new(
                format!("expected a class name, found `{name}`"),
                range,
                ErrorCode::E0303,
            ));
        }
        Ok(name)
    }

    fn parse_type_params(&mut self) -> PResult<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !self.eat(SyntaxKind::L_BRACKET) {
            return Ok(params);
        }
        loop {
            let unchecked = self.eat(SyntaxKind::UNCHECKED_KW);
            let variance = if self.eat(SyntaxKind::OUT_KW) {
                Variance::Covariant
            } else if self.eat(SyntaxKind::IN_KW) {
                Variance::Contravariant
            } else {
                Variance::Invariant
            };
            let name = SmolStr::new(self.expect(SyntaxKind::UIDENT)?.text);
            params.push(TypeParam {
                name,
                variance,
                unchecked,
            });
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET)?;
        Ok(params)
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn parse_members(&mut self, context: MemberContext) -> PResult<Vec<Member>> {
        let mut members = Vec::new();
        loop {
            match self.current_kind() {
                SyntaxKind::END_KW => {
                    self.bump();
                    return Ok(members);
                }
                SyntaxKind::EOF => {
                    return Err(self.unexpected("expected `end`", ErrorCode::E0202));
                }
                _ => {
                    let range = self.current_range();
                    let member = self.parse_member(context)?;
                    check_member_allowed(context, &member, range)?;
                    members.push(member);
                }
            }
        }
    }

    fn parse_member(&mut self, context: MemberContext) -> PResult<Member> {
        match self.current_kind() {
            SyntaxKind::DEF_KW => self
                .parse_method_definition(None)
                .map(Member::MethodDefinition),
            SyntaxKind::PUBLIC_KW | SyntaxKind::PRIVATE_KW | SyntaxKind::PROTECTED_KW => {
                let visibility = match self.current_kind() {
                    SyntaxKind::PUBLIC_KW => Visibility::Public,
                    SyntaxKind::PRIVATE_KW => Visibility::Private,
                    _ => Visibility::Protected,
                };
                let prefixes_member = matches!(
                    self.nth(1),
                    SyntaxKind::DEF_KW
                        | SyntaxKind::ATTR_READER_KW
                        | SyntaxKind::ATTR_WRITER_KW
                        | SyntaxKind::ATTR_ACCESSOR_KW
                ) && self.same_line(0, 1);
                self.bump();
                if !prefixes_member {
                    return Ok(match visibility {
                        Visibility::Public => Member::Public,
                        Visibility::Private => Member::Private,
                        Visibility::Protected => Member::Protected,
                    });
                }
                if self.at(SyntaxKind::DEF_KW) {
                    self.parse_method_definition(Some(visibility))
                        .map(Member::MethodDefinition)
                } else {
                    self.parse_attribute(Some(visibility))
                }
            }
            SyntaxKind::INCLUDE_KW => {
                self.bump();
                self.parse_mixin().map(Member::Include)
            }
            SyntaxKind::EXTEND_KW => {
                self.bump();
                self.parse_mixin().map(Member::Extend)
            }
            SyntaxKind::ALIAS_KW => self.parse_method_alias().map(Member::Alias),
            SyntaxKind::ATTR_READER_KW
            | SyntaxKind::ATTR_WRITER_KW
            | SyntaxKind::ATTR_ACCESSOR_KW => self.parse_attribute(None),
            SyntaxKind::IVAR => {
                let name = SmolStr::new(self.current_text());
                self.bump();
                self.expect(SyntaxKind::COLON)?;
                let ty = self.parse_type()?;
                Ok(Member::InstanceVariable(InstanceVariable { name, ty }))
            }
            SyntaxKind::CLASS_KW
            | SyntaxKind::MODULE_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::TYPE_KW
            | SyntaxKind::UIDENT
            | SyntaxKind::COLON2
                if context == MemberContext::Class =>
            {
                let declaration = self.without_type_vars(|p| p.parse_declaration())?;
                Ok(Member::Declaration {
                    declaration: Box::new(declaration),
                })
            }
            _ => Err(self.unexpected("expected a member", ErrorCode::E0302)),
        }
    }

    fn parse_method_definition(
        &mut self,
        visibility: Option<Visibility>,
    ) -> PResult<MethodDefinition> {
        self.expect(SyntaxKind::DEF_KW)?;
        let kind = if self.at(SyntaxKind::SELF_KW) && self.nth(1) == SyntaxKind::DOT {
            self.bump();
            self.bump();
            MethodKind::Singleton
        } else if self.at(SyntaxKind::SELF_KW)
            && self.nth(1) == SyntaxKind::QUESTION
            && self.nth(2) == SyntaxKind::DOT
        {
            self.bump();
            self.bump();
            self.bump();
            MethodKind::SingletonInstance
        } else {
            MethodKind::Instance
        };

        let range = self.current_range();
        let name = self.parse_method_name()?;
        self.expect(SyntaxKind::COLON)?;

        let mut types = Vec::new();
        let mut overload = false;
        loop {
            if self.eat(SyntaxKind::DOT3) {
                overload = true;
                break;
            }
            types.push(self.parse_method_type()?);
            if !self.eat(SyntaxKind::PIPE) {
                break;
            }
        }
        if types.is_empty() {
            return Err(SyntaxError::new(
                format!("method `{name}` needs at least one type before `...`"),
                range,
                ErrorCode::E0304,
            ));
        }

        Ok(MethodDefinition {
            name,
            kind,
            types,
            overload,
            visibility,
        })
    }

    /// Method names: identifiers (with `?`, `!`, `=` suffixes), keywords,
    /// operators, `[]`, `[]=` and backquoted names.
    pub(super) fn parse_method_name(&mut self) -> PResult<SmolStr> {
        let kind = self.current_kind();
        let text = self.current_text();
        if kind == SyntaxKind::QUOTED_IDENT {
            self.bump();
            return Ok(SmolStr::new(text.trim_matches('`')));
        }
        if kind == SyntaxKind::L_BRACKET && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
            if self.at(SyntaxKind::EQ) && self.nth_adjacent(0) {
                self.bump();
                return Ok(SmolStr::new_inline("[]="));
            }
            return Ok(SmolStr::new_inline("[]"));
        }
        if kind.is_name_like() {
            self.bump();
            if matches!(
                self.current_kind(),
                SyntaxKind::QUESTION | SyntaxKind::BANG | SyntaxKind::EQ
            ) && self.nth_adjacent(0)
            {
                let suffix = self.current_text();
                self.bump();
                return Ok(SmolStr::new(format!("{text}{suffix}")));
            }
            return Ok(SmolStr::new(text));
        }
        if kind.is_operator_method() {
            self.bump();
            return Ok(SmolStr::new(text));
        }
        Err(self.unexpected("expected a method name", ErrorCode::E0303))
    }

    fn parse_mixin(&mut self) -> PResult<Mixin> {
        let range = self.current_range();
        let name = self.parse_type_name_any()?;
        if !(name.is_class() || name.is_interface()) {
            return Err(SyntaxError::new(
                format!("expected a module or interface name, found `{name}`"),
                range,
                ErrorCode::E0303,
            ));
        }
        let args = self.parse_type_args()?;
        Ok(Mixin { name, args })
    }

    fn parse_method_alias(&mut self) -> PResult<MethodAlias> {
        let range = self.current_range();
        self.expect(SyntaxKind::ALIAS_KW)?;
        let (new_kind, new_name) = self.parse_alias_target()?;
        let (old_kind, old_name) = self.parse_alias_target()?;
        if new_kind != old_kind {
            return Err(SyntaxError::new(
                format!("alias `{new_name}` mixes instance and singleton methods"),
                range,
                ErrorCode::E0303,
            ));
        }
        Ok(MethodAlias {
            new_name,
            old_name,
            kind: new_kind,
        })
    }

    fn parse_alias_target(&mut self) -> PResult<(AliasKind, SmolStr)> {
        if self.at(SyntaxKind::SELF_KW) && self.nth(1) == SyntaxKind::DOT {
            self.bump();
            self.bump();
            return Ok((AliasKind::Singleton, self.parse_method_name()?));
        }
        Ok((AliasKind::Instance, self.parse_method_name()?))
    }

    fn parse_attribute(&mut self, visibility: Option<Visibility>) -> PResult<Member> {
        let keyword = self.current_kind();
        self.bump();
        let name = self.parse_method_name()?;
        self.expect(SyntaxKind::COLON)?;
        let ty = self.parse_type()?;
        let attribute = Attribute {
            name,
            ty,
            visibility,
        };
        Ok(match keyword {
            SyntaxKind::ATTR_READER_KW => Member::AttrReader(attribute),
            SyntaxKind::ATTR_WRITER_KW => Member::AttrWriter(attribute),
            _ => Member::AttrAccessor(attribute),
        })
    }
}

fn check_member_allowed(
    context: MemberContext,
    member: &Member,
    range: TextRange,
) -> PResult<()> {
    let allowed = match context {
        MemberContext::Class | MemberContext::Extension => true,
        MemberContext::Interface => match member {
            Member::MethodDefinition(def) => def.kind == MethodKind::Instance,
            Member::Include(mixin) => mixin.name.is_interface(),
            Member::Alias(alias) => alias.kind == AliasKind::Instance,
            _ => false,
        },
    };
    if allowed {
        Ok(())
    } else {
        Err(SyntaxError::new(
            "interfaces may only contain instance methods, aliases and interface includes",
            range,
            ErrorCode::E0302,
        ))
    }
}
