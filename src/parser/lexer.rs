//! Streaming tokenizer for Zero source.
//!
//! The lexer walks one `SourceFile` byte-by-byte and hands out spanned
//! tokens on demand, with a single cached token of lookahead (`peek`).
//! Newlines are significant (the parser uses them as statement separators),
//! so they are emitted as tokens rather than skipped.

use crate::source::{SourceFile, SourceId, Span};

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Ident,
    IntLit,
    FloatLit,
    StringLit,

    // Keywords
    Fn,
    Let,
    Return,
    If,
    Else,
    While,
    Use,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Arrow,

    // Special
    Newline,
    Eof,
    Error,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntLit => "integer literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::StringLit => "string literal",
            TokenKind::Fn => "'fn'",
            TokenKind::Let => "'let'",
            TokenKind::Return => "'return'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Use => "'use'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Bang => "'!'",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Arrow => "'->'",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "error",
        }
    }
}

/// A token with its span and a view of the source bytes it covers.
///
/// For `Error` tokens, `text` holds a fixed diagnostic message instead of
/// source text.
#[derive(Debug, Clone, Copy)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

/// The lexer. `start` marks the beginning of the token being scanned,
/// `current` the scan cursor; both are byte offsets into the file content.
pub struct Lexer<'src> {
    content: &'src str,
    source_id: SourceId,
    start: usize,
    current: usize,
    peeked: Option<Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(file: &'src SourceFile, source_id: SourceId) -> Self {
        Self {
            content: &file.content,
            source_id,
            start: 0,
            current: 0,
            peeked: None,
        }
    }

    /// Returns the next token, consuming any cached lookahead first.
    pub fn next(&mut self) -> Token<'src> {
        if let Some(tok) = self.peeked.take() {
            return tok;
        }
        self.scan_token()
    }

    /// Returns the next token without consuming it. The peeked token is
    /// cached and returned by the following `next`.
    pub fn peek(&mut self) -> Token<'src> {
        match self.peeked {
            Some(tok) => tok,
            None => {
                let tok = self.scan_token();
                self.peeked = Some(tok);
                tok
            }
        }
    }

    pub fn at_end(&self) -> bool {
        match &self.peeked {
            Some(tok) => tok.is_eof(),
            None => self.is_at_end(),
        }
    }

    // -----------------------------------------------------------------------
    // Character helpers
    // -----------------------------------------------------------------------

    fn is_at_end(&self) -> bool {
        self.current >= self.content.len()
    }

    fn peek_byte(&self) -> u8 {
        self.content.as_bytes().get(self.current).copied().unwrap_or(0)
    }

    fn peek_next_byte(&self) -> u8 {
        self.content
            .as_bytes()
            .get(self.current + 1)
            .copied()
            .unwrap_or(0)
    }

    fn advance(&mut self) -> u8 {
        let b = self.peek_byte();
        if !self.is_at_end() {
            self.current += 1;
        }
        b
    }

    fn match_byte(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.peek_byte() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    // -----------------------------------------------------------------------
    // Whitespace and comments
    // -----------------------------------------------------------------------

    /// Skips spaces, tabs, carriage returns, and `//` line comments.
    /// Newlines are left in place to be emitted as tokens.
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek_byte() {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'/' => {
                    if self.peek_next_byte() == b'/' {
                        while !self.is_at_end() && self.peek_byte() != b'\n' {
                            self.advance();
                        }
                    } else {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Token creation
    // -----------------------------------------------------------------------

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            span: Span::new(self.source_id, self.start as u32, self.current as u32),
            text: &self.content[self.start..self.current],
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token {
            kind: TokenKind::Error,
            span: Span::point(self.source_id, self.current as u32),
            text: message,
        }
    }

    // -----------------------------------------------------------------------
    // Scanning
    // -----------------------------------------------------------------------

    fn scan_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();

        if is_alpha(c) {
            return self.scan_identifier();
        }
        if c.is_ascii_digit() {
            return self.scan_number();
        }

        match c {
            b'(' => self.make_token(TokenKind::LParen),
            b')' => self.make_token(TokenKind::RParen),
            b'{' => self.make_token(TokenKind::LBrace),
            b'}' => self.make_token(TokenKind::RBrace),
            b'[' => self.make_token(TokenKind::LBracket),
            b']' => self.make_token(TokenKind::RBracket),
            b',' => self.make_token(TokenKind::Comma),
            b':' => self.make_token(TokenKind::Colon),
            b';' => self.make_token(TokenKind::Semicolon),
            b'\n' => self.make_token(TokenKind::Newline),

            b'+' => self.make_token(TokenKind::Plus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),

            b'-' => {
                let kind = if self.match_byte(b'>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                };
                self.make_token(kind)
            }
            b'=' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                };
                self.make_token(kind)
            }
            b'!' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                };
                self.make_token(kind)
            }
            b'<' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                };
                self.make_token(kind)
            }
            b'>' => {
                let kind = if self.match_byte(b'=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                };
                self.make_token(kind)
            }

            b'"' => self.scan_string(),

            _ => self.error_token("Unexpected character"),
        }
    }

    fn scan_identifier(&mut self) -> Token<'src> {
        while is_alnum(self.peek_byte()) {
            self.advance();
        }
        self.make_token(self.identifier_kind())
    }

    /// Keyword recognition: switch on the first character, then compare the
    /// remaining bytes against the keyword tail.
    fn identifier_kind(&self) -> TokenKind {
        let text = &self.content.as_bytes()[self.start..self.current];
        match text[0] {
            b'e' => self.check_keyword(b"lse", TokenKind::Else),
            b'f' => {
                if text.len() == 2 && text[1] == b'n' {
                    TokenKind::Fn
                } else {
                    TokenKind::Ident
                }
            }
            b'i' => self.check_keyword(b"f", TokenKind::If),
            b'l' => self.check_keyword(b"et", TokenKind::Let),
            b'r' => self.check_keyword(b"eturn", TokenKind::Return),
            b'u' => self.check_keyword(b"se", TokenKind::Use),
            b'w' => self.check_keyword(b"hile", TokenKind::While),
            _ => TokenKind::Ident,
        }
    }

    fn check_keyword(&self, rest: &[u8], kind: TokenKind) -> TokenKind {
        let text = &self.content.as_bytes()[self.start..self.current];
        if text.len() == rest.len() + 1 && &text[1..] == rest {
            kind
        } else {
            TokenKind::Ident
        }
    }

    fn scan_number(&mut self) -> Token<'src> {
        while self.peek_byte().is_ascii_digit() {
            self.advance();
        }
        // A '.' followed by a digit extends this to a float literal.
        if self.peek_byte() == b'.' && self.peek_next_byte().is_ascii_digit() {
            self.advance();
            while self.peek_byte().is_ascii_digit() {
                self.advance();
            }
            return self.make_token(TokenKind::FloatLit);
        }
        self.make_token(TokenKind::IntLit)
    }

    fn scan_string(&mut self) -> Token<'src> {
        while !self.is_at_end() && self.peek_byte() != b'"' {
            self.advance();
        }
        if self.is_at_end() {
            return self.error_token("Unterminated string literal");
        }
        self.advance(); // closing quote
        self.make_token(TokenKind::StringLit)
    }
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_alnum(c: u8) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
