//! Tokenizer for predicate text.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Is,
    And,
    Or,
    False,
    Dot,
    Equals,
    Mask,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Ident(String),
    Str(String),
    Bool(bool),
    Int(i32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Is => f.write_str("'IS'"),
            Self::And => f.write_str("'AND'"),
            Self::Or => f.write_str("'OR'"),
            Self::False => f.write_str("'False'"),
            Self::Dot => f.write_str("'.'"),
            Self::Equals => f.write_str("'=='"),
            Self::Mask => f.write_str("'&'"),
            Self::LBracket => f.write_str("'['"),
            Self::RBracket => f.write_str("']'"),
            Self::LBrace => f.write_str("'{'"),
            Self::RBrace => f.write_str("'}'"),
            Self::Comma => f.write_str("','"),
            Self::Ident(name) => write!(f, "identifier '{}'", name),
            Self::Str(s) => write!(f, "string '{}'", s),
            Self::Bool(v) => write!(f, "'{}'", v),
            Self::Int(v) => write!(f, "number {}", v),
            Self::Int64(v) => write!(f, "number {}", v),
            Self::UInt64(v) => write!(f, "number {}", v),
            Self::Double(v) => write!(f, "number {}", v),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>> {
        let mut tokens = Vec::new();
        while let Some(spanned) = self.next_token()? {
            tokens.push(spanned);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Spanned>> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some(&(offset, c)) = self.chars.peek() else {
            return Ok(None);
        };

        let token = match c {
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),
            ',' => self.single(Token::Comma),
            '.' => self.single(Token::Dot),
            '&' => self.single(Token::Mask),
            '=' => {
                self.chars.next();
                match self.chars.next() {
                    Some((_, '=')) => Token::Equals,
                    Some((at, other)) => {
                        return Err(ParseError::UnexpectedCharacter { ch: other, offset: at })
                    }
                    None => return Err(ParseError::UnexpectedCharacter { ch: '=', offset }),
                }
            }
            '\'' => self.string(offset)?,
            c if c.is_ascii_digit() || c == '-' => self.number(offset)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.word(),
            other => return Err(ParseError::UnexpectedCharacter { ch: other, offset }),
        };

        Ok(Some(Spanned { token, offset }))
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn string(&mut self, start: usize) -> Result<Token> {
        self.chars.next();
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\'')) => return Ok(Token::Str(value)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => return Err(ParseError::UnterminatedString { offset: start }),
                },
                Some((_, c)) => value.push(c),
                None => return Err(ParseError::UnterminatedString { offset: start }),
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<Token> {
        let mut end = start;
        if let Some((at, '-')) = self.chars.next_if(|(_, c)| *c == '-') {
            end = at + 1;
        }
        while let Some((at, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
            end = at + c.len_utf8();
        }

        let mut is_double = false;
        if let Some((at, _)) = self.chars.next_if(|(_, c)| *c == '.') {
            is_double = true;
            end = at + 1;
            while let Some((at, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
                end = at + c.len_utf8();
            }
        }

        let literal = &self.input[start..end];
        let invalid = || ParseError::InvalidNumber {
            literal: literal.to_string(),
            offset: start,
        };

        if !literal.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        if is_double {
            return literal.parse().map(Token::Double).map_err(|_| invalid());
        }
        if let Ok(v) = literal.parse::<i32>() {
            return Ok(Token::Int(v));
        }
        if let Ok(v) = literal.parse::<i64>() {
            return Ok(Token::Int64(v));
        }
        literal.parse::<u64>().map(Token::UInt64).map_err(|_| invalid())
    }

    fn word(&mut self) -> Token {
        let mut word = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        {
            word.push(c);
        }
        match word.as_str() {
            "IS" => Token::Is,
            "AND" => Token::And,
            "OR" => Token::Or,
            "False" => Token::False,
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            _ => Token::Ident(word),
        }
    }
}
