use std::rc::Rc;

use crate::{Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{classify_identifier, Token, TokenKind};

/// Stands in for the current character once the cursor has run off the input.
const NUL: char = '\0';

/// Pull-based scanner over a fully materialised source.
///
/// `position` indexes the character held in `ch`, `read_position` the next
/// one to be read. The first character is loaded by the constructor, so
/// `next_token` can inspect `ch` straight away.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: char,
    file: Rc<String>,
}

impl Lexer {
    /// Creates a lexer over `source`, reporting positions against `"shell"`.
    pub fn new(source: &str) -> Lexer {
        Lexer::with_file(source, "shell")
    }

    /// Creates a lexer over `source`, reporting positions against `file`.
    pub fn with_file(source: &str, file: &str) -> Lexer {
        let mut lexer = Lexer {
            input: source.chars().collect(),
            position: 0,
            read_position: 0,
            ch: NUL,
            file: Rc::new(String::from(file)),
        };

        lexer.advance();
        lexer
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    /// Consumes one character.
    pub fn advance(&mut self) {
        self.ch = self.input.get(self.read_position).copied().unwrap_or(NUL);
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// The character after `ch`, without consuming it.
    pub fn peek(&self) -> char {
        self.input.get(self.read_position).copied().unwrap_or(NUL)
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, ' ' | '\t' | '\n' | '\r') {
            self.advance();
        }
    }

    fn read_while(&mut self, class: fn(char) -> bool) -> String {
        let start = self.position;
        while !self.at_eof() && class(self.ch) {
            self.advance();
        }

        self.input[start..self.position].iter().collect()
    }

    fn read_identifier(&mut self) -> String {
        self.read_while(is_letter)
    }

    fn read_number(&mut self) -> String {
        self.read_while(is_digit)
    }

    /// Scans the next token. Past the end of input this keeps returning `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;

        if self.at_eof() {
            return MK_TOKEN!(TokenKind::EOF, String::new(), MK_SPAN!(start, start, self.file));
        }

        let ch = self.ch;
        let kind = match ch {
            '=' if self.peek() == '=' => {
                self.advance();
                TokenKind::Eq
            }
            '=' => TokenKind::Assign,
            '!' if self.peek() == '=' => {
                self.advance();
                TokenKind::NotEq
            }
            '!' => TokenKind::Bang,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '*' => TokenKind::Asterisk,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            c if is_letter(c) => {
                // The read loop already stops on the first character past the lexeme.
                let literal = self.read_identifier();
                return MK_TOKEN!(
                    classify_identifier(&literal),
                    literal,
                    MK_SPAN!(start, self.position, self.file)
                );
            }
            c if is_digit(c) => {
                let literal = self.read_number();
                return MK_TOKEN!(TokenKind::Int, literal, MK_SPAN!(start, self.position, self.file));
            }
            _ => TokenKind::Illegal,
        };

        self.advance();

        let literal = self.input[start..self.position].iter().collect();
        MK_TOKEN!(kind, literal, MK_SPAN!(start, self.position, self.file))
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Scans `source` up to and including the first `EOF` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
