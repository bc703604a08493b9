use tracing::trace;

use crate::{Position, Span, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Pull-based scanner over a single source string.
///
/// One token is produced per call to [`Lexer::next_token`]. There is no
/// rewind; scanning the same text again needs a fresh `Lexer`.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    /// Index of `ch`
    pos: usize,
    /// Index of the character after `ch`
    read_pos: usize,
    /// Current character, 0 when nothing is loaded or the source is exhausted
    ch: u8,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        let mut lexer = Lexer {
            source: source.into(),
            pos: 0,
            read_pos: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn read_char(&mut self) {
        self.ch = self.byte_at(self.read_pos);
        self.pos = self.read_pos;
        self.read_pos += 1;
    }

    fn peek_char(&self) -> u8 {
        self.byte_at(self.read_pos)
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.source.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Scans and returns the next token. Once the source is exhausted every
    /// call returns an `EOF` token with empty text.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::new(), start, start);
        }

        let kind = match self.ch {
            b'=' => self.one_or_two(b'=', TokenKind::Equals, TokenKind::Assignment),
            b'!' => self.one_or_two(b'=', TokenKind::NotEquals, TokenKind::Not),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Dash,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            c if is_letter(c) => {
                let value = self.read_while(is_letter);
                return MK_TOKEN!(lookup_identifier(&value), value, start, self.pos);
            }
            c if c.is_ascii_digit() => {
                let value = self.read_while(|c| c.is_ascii_digit());
                return MK_TOKEN!(TokenKind::Integer, value, start, self.pos);
            }
            c if c.is_ascii() => TokenKind::Illegal,
            _ => return self.read_illegal_char(start),
        };

        self.read_char();

        let value = self.source[start..self.pos].to_string();
        if kind == TokenKind::Illegal {
            trace!(value = %value.escape_debug(), position = start, "illegal character");
        }

        MK_TOKEN!(kind, value, start, self.pos)
    }

    // `ch` already matched the first character; only the lookahead decides.
    fn one_or_two(&mut self, second: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_char() == second {
            self.read_char();
            double
        } else {
            single
        }
    }

    fn read_while(&mut self, predicate: fn(u8) -> bool) -> String {
        let start = self.pos;
        while !self.at_eof() && predicate(self.ch) {
            self.read_char();
        }

        self.source[start..self.pos].to_string()
    }

    /// Consumes a whole non-ASCII character as one illegal token.
    fn read_illegal_char(&mut self, start: usize) -> Token {
        let width = self.source[start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);

        for _ in 0..width {
            self.read_char();
        }

        let value = self.source[start..self.pos].to_string();
        trace!(value = %value, position = start, "illegal character");

        MK_TOKEN!(TokenKind::Illegal, value, start, self.pos)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Scans `source` to completion, returning every token including the final `EOF`.
#[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
