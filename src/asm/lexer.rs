//! Lexer for the AVM assembly language
//!
//! Converts a character stream into an ordered token sequence terminated by
//! exactly one end marker. Comments are discarded here; unrecognized
//! identifiers lex as `Unknown` tokens and are rejected later by the parser.

use crate::asm::token::{Token, TokenKind};
use crate::error::{LexResult, LexicalError};

/// Lexer over a character buffer with position tracking
pub struct Lexer {
    /// Input source
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Whether the `;;` end-of-input marker applies
    interactive: bool,
    /// Whether lexical errors are collected instead of returned immediately
    collect_errors: bool,
    /// Collected errors (collection mode)
    errors: Vec<LexicalError>,
}

impl Lexer {
    /// Create a lexer over a source string
    ///
    /// In interactive mode the two-character sequence `;;` terminates the
    /// input; otherwise only the physical end of the source does.
    pub fn new(source: &str, interactive: bool, collect_errors: bool) -> Self {
        Lexer {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            interactive,
            collect_errors,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input
    ///
    /// Comment tokens are filtered out; the returned sequence always ends
    /// with exactly one end marker. In fail-fast mode the first invalid
    /// character returns an error; in collection mode errors are logged and
    /// scanning continues from the next line.
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind.is_end();
            if token.kind != TokenKind::Comment {
                tokens.push(token);
            }
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token from the input
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(Token::new(TokenKind::EndOfFile, "", self.line, self.column));
        }

        let line = self.line;
        let column = self.column;
        let ch = self.current();

        // ";;" ends interactive input; a single ';' starts a comment
        if ch == ';' {
            if self.interactive && self.peek() == Some(';') {
                self.advance();
                self.advance();
                return Ok(Token::new(TokenKind::EndOfInput, ";;", line, column));
            }
            self.skip_comment();
            return Ok(Token::new(TokenKind::Comment, ";", line, column));
        }

        if ch == '\n' {
            self.advance();
            return Ok(Token::new(TokenKind::Newline, "\\n", line, column));
        }

        if ch == '(' {
            self.advance();
            return Ok(Token::new(TokenKind::LeftParen, "(", line, column));
        }

        if ch == ')' {
            self.advance();
            return Ok(Token::new(TokenKind::RightParen, ")", line, column));
        }

        if ch.is_ascii_digit()
            || ((ch == '-' || ch == '+') && self.peek().is_some_and(|c| c.is_ascii_digit()))
        {
            return Ok(self.read_number(line, column));
        }

        if ch.is_ascii_alphabetic() {
            return Ok(self.read_identifier(line, column));
        }

        let error = LexicalError::UnexpectedCharacter {
            character: ch,
            line,
            column,
        };

        if self.collect_errors {
            // Log and resynchronize at the next newline so scanning continues
            self.errors.push(error);
            self.skip_to_line_end();
            Ok(Token::new(TokenKind::Unknown, ch.to_string(), line, column))
        } else {
            self.advance();
            Err(error)
        }
    }

    /// Collected lexical errors, in source order
    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    /// Check whether any errors were collected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn current(&self) -> char {
        self.input[self.position]
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.current() == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            let ch = self.current();
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while !self.is_at_end() && self.current() != '\n' {
            self.advance();
        }
    }

    /// Skip the rest of the current line, leaving the newline in place as
    /// the parser's resynchronization point
    fn skip_to_line_end(&mut self) {
        while !self.is_at_end() && self.current() != '\n' {
            self.advance();
        }
    }

    fn read_number(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        let mut decimal = false;

        if self.current() == '-' || self.current() == '+' {
            text.push(self.current());
            self.advance();
        }

        while !self.is_at_end() && self.current().is_ascii_digit() {
            text.push(self.current());
            self.advance();
        }

        if !self.is_at_end() && self.current() == '.' {
            decimal = true;
            text.push('.');
            self.advance();
            while !self.is_at_end() && self.current().is_ascii_digit() {
                text.push(self.current());
                self.advance();
            }
        }

        let kind = if decimal {
            TokenKind::Decimal
        } else {
            TokenKind::Integer
        };
        Token::new(kind, text, line, column)
    }

    fn read_identifier(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();

        while !self.is_at_end() && self.current().is_ascii_alphanumeric() {
            text.push(self.current());
            self.advance();
        }

        let kind = TokenKind::from_keyword(&text);
        Token::new(kind, text, line, column)
    }
}
