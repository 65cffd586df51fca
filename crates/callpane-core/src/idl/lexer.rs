//! Tokenizer shared by the type, interface and value parsers

use crate::error::{Error, Result};

/// A lexical token of the interface description language
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Keyword or identifier (`record`, `nat`, `add`, ...)
    Ident(String),
    /// Numeric literal with `_` separators removed
    Number(String),
    /// Quoted string with escapes already resolved
    Text(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
    Colon,
    Comma,
    Equals,
    Arrow,
    Minus,
    Plus,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "`{}`", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Text(_) => write!(f, "text literal"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::LBrace => write!(f, "`{{`"),
            Token::RBrace => write!(f, "`}}`"),
            Token::Semi => write!(f, "`;`"),
            Token::Colon => write!(f, "`:`"),
            Token::Comma => write!(f, "`,`"),
            Token::Equals => write!(f, "`=`"),
            Token::Arrow => write!(f, "`->`"),
            Token::Minus => write!(f, "`-`"),
            Token::Plus => write!(f, "`+`"),
        }
    }
}

/// A token with its 1-based source position
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek one character past the next one
    fn peek_second(&self) -> Option<char> {
        let mut it = self.chars.clone();
        it.next();
        it.next()
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek_second() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    let mut closed = false;
                    while let Some(c) = self.bump() {
                        if c == '*' && self.peek() == Some('/') {
                            self.bump();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(Error::parse(line, column, "unterminated block comment"));
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn number(&mut self) -> String {
        let mut out = String::new();
        self.digits(&mut out);

        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            out.push('.');
            self.bump();
            self.digits(&mut out);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let next = self.peek_second();
            if next.is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-') {
                out.push('e');
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    out.push(sign);
                    self.bump();
                }
                self.digits(&mut out);
            }
        }
        out
    }

    fn digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                out.push(c);
                self.bump();
            } else if c == '_' {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn text(&mut self, line: usize, column: usize) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(Error::parse(line, column, "unterminated text literal")),
                Some('"') => return Ok(out),
                Some('\\') => {
                    let (eline, ecol) = (self.line, self.column);
                    match self.bump() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some('r') => out.push('\r'),
                        Some('\\') => out.push('\\'),
                        Some('"') => out.push('"'),
                        Some('\'') => out.push('\''),
                        Some('u') => out.push(self.unicode_escape(eline, ecol)?),
                        Some(other) => {
                            return Err(Error::parse(
                                eline,
                                ecol,
                                format!("unknown escape `\\{}`", other),
                            ))
                        }
                        None => {
                            return Err(Error::parse(line, column, "unterminated text literal"))
                        }
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self, line: usize, column: usize) -> Result<char> {
        if self.bump() != Some('{') {
            return Err(Error::parse(line, column, "expected `{` after `\\u`"));
        }
        let mut hex = String::new();
        loop {
            match self.bump() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() && hex.len() < 6 => hex.push(c),
                _ => return Err(Error::parse(line, column, "malformed unicode escape")),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| Error::parse(line, column, "invalid unicode scalar value"))
    }
}

/// Split source text into tokens
pub fn tokenize(src: &str) -> Result<Vec<Spanned>> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();

    loop {
        lexer.skip_trivia()?;
        let (line, column) = (lexer.line, lexer.column);
        let Some(c) = lexer.peek() else {
            break;
        };

        let token = match c {
            '(' => single(&mut lexer, Token::LParen),
            ')' => single(&mut lexer, Token::RParen),
            '{' => single(&mut lexer, Token::LBrace),
            '}' => single(&mut lexer, Token::RBrace),
            ';' => single(&mut lexer, Token::Semi),
            ':' => single(&mut lexer, Token::Colon),
            ',' => single(&mut lexer, Token::Comma),
            '=' => single(&mut lexer, Token::Equals),
            '+' => single(&mut lexer, Token::Plus),
            '-' => {
                lexer.bump();
                if lexer.peek() == Some('>') {
                    lexer.bump();
                    Token::Arrow
                } else {
                    Token::Minus
                }
            }
            '"' => {
                lexer.bump();
                Token::Text(lexer.text(line, column)?)
            }
            c if c.is_ascii_digit() => Token::Number(lexer.number()),
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(c) = lexer.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        lexer.bump();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(Error::parse(
                    line,
                    column,
                    format!("unexpected character `{}`", other),
                ))
            }
        };

        tokens.push(Spanned {
            token,
            line,
            column,
        });
    }

    Ok(tokens)
}

fn single(lexer: &mut Lexer<'_>, token: Token) -> Token {
    lexer.bump();
    token
}
