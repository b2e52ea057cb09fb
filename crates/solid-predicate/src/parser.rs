//! Parser for predicate text.
//!
//! ```text
//! predicate   := orExpr EOF
//! orExpr      := andExpr ( 'OR' andExpr )*
//! andExpr     := atom ( 'AND' atom )*
//! atom        := 'IS' ifaceName
//!              | ifaceName '.' propName compOp value
//!              | 'False'
//!              | '[' orExpr ']'
//! compOp      := '==' | '&'
//! value       := string | bool | int | double | stringList
//! stringList  := '{' (string (',' string)*)? '}'
//! ```
//!
//! Chains are left-associative and `AND` binds tighter than `OR`. Property
//! names may be keywords. Bracket levels live on an explicit stack, so nesting
//! depth is bounded only by [`ParserOptions::max_depth`] when one is set. The
//! parser keeps no state between calls.

use solid_core::{InterfaceType, Value};

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::predicate::{Comparison, Predicate};

const OPERAND: &str = "'IS', an interface name or '['";

/// Parser limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum bracket nesting depth. Unlimited when `None`.
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    /// Options honoring `SOLID_PREDICATE_MAX_DEPTH`.
    ///
    /// [`Predicate::parse`] never reads the environment; callers opt in here.
    pub fn from_env() -> Self {
        Self {
            max_depth: solid_core::config::predicate::max_depth(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Parse `text` into a predicate tree.
pub fn parse(text: &str, options: &ParserOptions) -> Result<Predicate> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        max_depth: options.max_depth,
    };
    parser.predicate()
}

/// Operands collected at one bracket level.
#[derive(Default)]
struct Group {
    /// Disjunction of the finished `AND` chains.
    any: Option<Predicate>,
    /// `AND` chain still being extended.
    all: Option<Predicate>,
}

impl Group {
    fn push(&mut self, operand: Predicate) {
        self.all = Some(match self.all.take() {
            Some(lhs) => lhs & operand,
            None => operand,
        });
    }

    fn end_chain(&mut self) {
        if let Some(all) = self.all.take() {
            self.any = Some(match self.any.take() {
                Some(lhs) => lhs | all,
                None => all,
            });
        }
    }

    fn finish(mut self) -> Predicate {
        self.end_chain();
        self.any.unwrap_or_default()
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    max_depth: Option<usize>,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_next(&mut self, expected: &'static str) -> Result<Spanned> {
        self.next().ok_or(ParseError::UnexpectedEnd { expected })
    }

    fn predicate(&mut self) -> Result<Predicate> {
        let mut current = Group::default();
        // Enclosing levels, innermost last.
        let mut outer: Vec<Group> = Vec::new();

        'operand: loop {
            let Spanned { token, offset } = self.expect_next(OPERAND)?;
            let mut operand = match token {
                Token::LBracket => {
                    if let Some(limit) = self.max_depth {
                        if outer.len() >= limit {
                            return Err(ParseError::NestingTooDeep { limit, offset });
                        }
                    }
                    outer.push(std::mem::take(&mut current));
                    continue;
                }
                Token::False => Predicate::Invalid,
                Token::Is => Predicate::is(self.interface()?),
                Token::Ident(name) => {
                    let interface = resolve_interface(name, offset)?;
                    self.property_check(interface)?
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        found: other.to_string(),
                        expected: OPERAND,
                        offset,
                    })
                }
            };

            loop {
                current.push(operand);
                match self.peek() {
                    Some(Token::And) => {
                        self.pos += 1;
                        continue 'operand;
                    }
                    Some(Token::Or) => {
                        self.pos += 1;
                        current.end_chain();
                        continue 'operand;
                    }
                    Some(Token::RBracket) => {
                        let Some(parent) = outer.pop() else { break };
                        self.pos += 1;
                        operand = std::mem::replace(&mut current, parent).finish();
                    }
                    _ => break,
                }
            }

            return match self.next() {
                None if outer.is_empty() => Ok(current.finish()),
                None => Err(ParseError::UnexpectedEnd { expected: "']'" }),
                Some(extra) if outer.is_empty() => {
                    Err(unexpected(extra, "'AND', 'OR' or end of input"))
                }
                Some(extra) => Err(unexpected(extra, "']'")),
            };
        }
    }

    fn interface(&mut self) -> Result<InterfaceType> {
        let spanned = self.expect_next("an interface name")?;
        match spanned.token {
            Token::Ident(name) => resolve_interface(name, spanned.offset),
            _ => Err(unexpected(spanned, "an interface name")),
        }
    }

    fn property_check(&mut self, interface: InterfaceType) -> Result<Predicate> {
        let dot = self.expect_next("'.'")?;
        if dot.token != Token::Dot {
            return Err(unexpected(dot, "'.'"));
        }

        let spanned = self.expect_next("a property name")?;
        let Some(property) = property_name(&spanned.token) else {
            return Err(unexpected(spanned, "a property name"));
        };

        let op = self.expect_next("'==' or '&'")?;
        let comparison = match op.token {
            Token::Equals => Comparison::Equals,
            Token::Mask => Comparison::Mask,
            _ => return Err(unexpected(op, "'==' or '&'")),
        };

        let value = self.value()?;
        Ok(Predicate::atom(interface, property, value, comparison))
    }

    fn value(&mut self) -> Result<Value> {
        let spanned = self.expect_next("a value")?;
        let value = match spanned.token {
            Token::Str(s) => Value::String(s),
            Token::Bool(v) => Value::Bool(v),
            Token::Int(v) => Value::Int(v),
            Token::Int64(v) => Value::Int64(v),
            Token::UInt64(v) => Value::UInt64(v),
            Token::Double(v) => Value::Double(v),
            Token::LBrace => Value::StringList(self.string_list()?),
            _ => return Err(unexpected(spanned, "a value")),
        };
        Ok(value)
    }

    fn string_list(&mut self) -> Result<Vec<String>> {
        let mut items = Vec::new();
        if self.eat(&Token::RBrace) {
            return Ok(items);
        }
        loop {
            let item = self.expect_next("a string")?;
            match item.token {
                Token::Str(s) => items.push(s),
                _ => return Err(unexpected(item, "a string")),
            }

            let sep = self.expect_next("',' or '}'")?;
            match sep.token {
                Token::Comma => continue,
                Token::RBrace => return Ok(items),
                _ => return Err(unexpected(sep, "',' or '}'")),
            }
        }
    }
}

/// Words accepted after `Iface.`; keywords read as plain names there.
fn property_name(token: &Token) -> Option<String> {
    let keyword = match token {
        Token::Ident(name) => return Some(name.clone()),
        Token::Is => "IS",
        Token::And => "AND",
        Token::Or => "OR",
        Token::False => "False",
        Token::Bool(true) => "true",
        Token::Bool(false) => "false",
        _ => return None,
    };
    Some(keyword.to_string())
}

fn resolve_interface(name: String, offset: usize) -> Result<InterfaceType> {
    InterfaceType::from_name(&name).ok_or(ParseError::UnknownInterface { name, offset })
}

fn unexpected(spanned: Spanned, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        found: spanned.token.to_string(),
        expected,
        offset: spanned.offset,
    }
}
