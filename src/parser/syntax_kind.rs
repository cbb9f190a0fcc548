//! Token kinds for signature files.
//!
//! The lexer is generated by logos directly from this enum; keywords are
//! `#[token]` entries and win over the identifier regexes of the same length.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    WHITESPACE,

    #[regex(r"#[^\n]*")]
    COMMENT,

    /// `%a{...}`, `%a(...)`, `%a[...]`
    #[regex(r"%a\{[^}]*\}")]
    #[regex(r"%a\([^)]*\)")]
    #[regex(r"%a\[[^\]]*\]")]
    ANNOTATION,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    UIDENT,

    #[regex(r"_[A-Z][A-Za-z0-9_]*", priority = 5)]
    INTERFACE_IDENT,

    #[regex(r"[a-z_][A-Za-z0-9_]*")]
    LIDENT,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    IVAR,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    GLOBAL,

    #[regex(r"`[^`\n]+`")]
    QUOTED_IDENT,

    #[regex(r"[0-9]+")]
    INTEGER,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'[^'\n]*'")]
    STRING,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("::")]
    COLON2,
    #[token(":")]
    COLON,
    #[token("->")]
    ARROW,
    #[token("=>")]
    FAT_ARROW,
    #[token("...")]
    DOT3,
    #[token(".")]
    DOT,
    #[token(",")]
    COMMA,
    #[token("(")]
    L_PAREN,
    #[token(")")]
    R_PAREN,
    #[token("[")]
    L_BRACKET,
    #[token("]")]
    R_BRACKET,
    #[token("{")]
    L_BRACE,
    #[token("}")]
    R_BRACE,
    #[token("|")]
    PIPE,
    #[token("&")]
    AMP,
    #[token("?")]
    QUESTION,
    #[token("^")]
    CARET,

    // =========================================================================
    // OPERATOR METHOD NAMES
    // =========================================================================
    #[token("=")]
    EQ,
    #[token("==")]
    EQ2,
    #[token("===")]
    EQ3,
    #[token("=~")]
    MATCH,
    #[token("!")]
    BANG,
    #[token("!=")]
    NEQ,
    #[token("!~")]
    NMATCH,
    #[token("<")]
    LT,
    #[token(">")]
    GT,
    #[token("<=")]
    LE,
    #[token(">=")]
    GE,
    #[token("<=>")]
    CMP,
    #[token("<<")]
    LSHIFT,
    #[token(">>")]
    RSHIFT,
    #[token("+")]
    PLUS,
    #[token("-")]
    MINUS,
    #[token("*")]
    STAR,
    #[token("**")]
    STAR2,
    #[token("/")]
    SLASH,
    #[token("%")]
    PERCENT,
    #[token("~")]
    TILDE,
    #[token("+@")]
    UPLUS,
    #[token("-@")]
    UMINUS,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("alias")]
    ALIAS_KW,
    #[token("attr_accessor")]
    ATTR_ACCESSOR_KW,
    #[token("attr_reader")]
    ATTR_READER_KW,
    #[token("attr_writer")]
    ATTR_WRITER_KW,
    #[token("bool")]
    BOOL_KW,
    #[token("bot")]
    BOT_KW,
    #[token("class")]
    CLASS_KW,
    #[token("def")]
    DEF_KW,
    #[token("end")]
    END_KW,
    #[token("extend")]
    EXTEND_KW,
    #[token("extension")]
    EXTENSION_KW,
    #[token("false")]
    FALSE_KW,
    #[token("in")]
    IN_KW,
    #[token("include")]
    INCLUDE_KW,
    #[token("instance")]
    INSTANCE_KW,
    #[token("interface")]
    INTERFACE_KW,
    #[token("module")]
    MODULE_KW,
    #[token("nil")]
    NIL_KW,
    #[token("out")]
    OUT_KW,
    #[token("private")]
    PRIVATE_KW,
    #[token("protected")]
    PROTECTED_KW,
    #[token("public")]
    PUBLIC_KW,
    #[token("self")]
    SELF_KW,
    #[token("singleton")]
    SINGLETON_KW,
    #[token("top")]
    TOP_KW,
    #[token("true")]
    TRUE_KW,
    #[token("type")]
    TYPE_KW,
    #[token("unchecked")]
    UNCHECKED_KW,
    #[token("untyped")]
    UNTYPED_KW,
    #[token("void")]
    VOID_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognized input
    ERROR,
    EOF,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::ANNOTATION)
    }

    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ALIAS_KW as u16) && (self as u16) <= (Self::VOID_KW as u16)
    }

    /// Tokens usable as plain names: method names, parameter names, record keys.
    pub fn is_name_like(self) -> bool {
        matches!(self, Self::LIDENT | Self::UIDENT | Self::INTERFACE_IDENT) || self.is_keyword()
    }

    /// Operator tokens that are valid method names on their own.
    pub fn is_operator_method(self) -> bool {
        matches!(
            self,
            Self::EQ2
                | Self::EQ3
                | Self::MATCH
                | Self::BANG
                | Self::NEQ
                | Self::NMATCH
                | Self::LT
                | Self::GT
                | Self::LE
                | Self::GE
                | Self::CMP
                | Self::LSHIFT
                | Self::RSHIFT
                | Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::STAR2
                | Self::SLASH
                | Self::PERCENT
                | Self::TILDE
                | Self::UPLUS
                | Self::UMINUS
                | Self::AMP
                | Self::PIPE
                | Self::CARET
        )
    }

    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::UIDENT => "constant name",
            Self::INTERFACE_IDENT => "interface name",
            Self::LIDENT => "identifier",
            Self::COLON => "`:`",
            Self::COLON2 => "`::`",
            Self::ARROW => "`->`",
            Self::EQ => "`=`",
            Self::COMMA => "`,`",
            Self::L_PAREN => "`(`",
            Self::R_PAREN => "`)`",
            Self::L_BRACKET => "`[`",
            Self::R_BRACKET => "`]`",
            Self::L_BRACE => "`{`",
            Self::R_BRACE => "`}`",
            Self::END_KW => "`end`",
            Self::EOF => "end of file",
            Self::ERROR => "invalid character",
            _ => "token",
        }
    }
}
