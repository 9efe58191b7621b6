//! SPDX license expressions.
//!
//! Handles the subset of the SPDX grammar that appears in project
//! manifests and file headers:
//!   `MIT`
//!   `MIT OR Apache-2.0`
//!   `(MIT AND BSD-2-Clause) OR GPL-2.0-only WITH Classpath-exception-2.0`
//!
//! Precedence is `WITH` > `AND` > `OR`. Operators are matched
//! case-insensitively; identifiers keep their spelling.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("empty license expression")]
    Empty,
    #[error("unexpected `{0}` in license expression")]
    Unexpected(String),
    #[error("license expression ends after `{0}`")]
    Truncated(String),
    #[error("missing closing parenthesis in license expression")]
    UnclosedParen,
}

/// A parsed SPDX license expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseExpression {
    License(String),
    WithException { license: String, exception: String },
    And(Box<LicenseExpression>, Box<LicenseExpression>),
    Or(Box<LicenseExpression>, Box<LicenseExpression>),
}

impl LicenseExpression {
    pub fn parse(input: &str) -> Result<Self, ExpressionError> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.or()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(ExpressionError::Unexpected(token.to_string())),
        }
    }

    /// Every license and exception identifier, in order of first
    /// appearance, without duplicates.
    pub fn license_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<String>) {
        match self {
            LicenseExpression::License(id) => push_unique(keys, id),
            LicenseExpression::WithException { license, exception } => {
                push_unique(keys, license);
                push_unique(keys, exception);
            }
            LicenseExpression::And(a, b) | LicenseExpression::Or(a, b) => {
                a.collect_keys(keys);
                b.collect_keys(keys);
            }
        }
    }

    /// The license that represents the whole expression: the leftmost
    /// license identifier (exceptions never qualify).
    pub fn primary_license(&self) -> &str {
        match self {
            LicenseExpression::License(id) => id,
            LicenseExpression::WithException { license, .. } => license,
            LicenseExpression::And(a, _) | LicenseExpression::Or(a, _) => a.primary_license(),
        }
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseExpression::License(id) => write!(f, "{id}"),
            LicenseExpression::WithException { license, exception } => {
                write!(f, "{license} WITH {exception}")
            }
            LicenseExpression::And(a, b) => write!(f, "({a} AND {b})"),
            LicenseExpression::Or(a, b) => write!(f, "({a} OR {b})"),
        }
    }
}

fn push_unique(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    And,
    Or,
    With,
    Open,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(id) => write!(f, "{id}"),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::With => write!(f, "WITH"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
        }
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        if word.is_empty() {
            return;
        }
        let token = match word.to_ascii_uppercase().as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "WITH" => Token::With,
            _ => Token::Ident(word.clone()),
        };
        tokens.push(token);
        word.clear();
    };

    for c in input.chars() {
        match c {
            '(' | ')' => {
                flush(&mut word, &mut tokens);
                tokens.push(if c == '(' { Token::Open } else { Token::Close });
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            c => word.push(c),
        }
    }
    flush(&mut word, &mut tokens);

    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Text of the final token, for errors about input that stops early.
    fn last_text(&self) -> String {
        self.tokens.last().map(Token::to_string).unwrap_or_default()
    }

    fn or(&mut self) -> Result<LicenseExpression, ExpressionError> {
        let mut left = self.and()?;
        while self.eat(&Token::Or) {
            let right = self.and()?;
            left = LicenseExpression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<LicenseExpression, ExpressionError> {
        let mut left = self.with()?;
        while self.eat(&Token::And) {
            let right = self.with()?;
            left = LicenseExpression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn with(&mut self) -> Result<LicenseExpression, ExpressionError> {
        let base = self.primary()?;
        if !self.eat(&Token::With) {
            return Ok(base);
        }
        let LicenseExpression::License(license) = base else {
            return Err(ExpressionError::Unexpected("WITH".to_string()));
        };
        match self.next() {
            Some(Token::Ident(exception)) => {
                Ok(LicenseExpression::WithException { license, exception })
            }
            Some(other) => Err(ExpressionError::Unexpected(other.to_string())),
            None => Err(ExpressionError::Truncated("WITH".to_string())),
        }
    }

    fn primary(&mut self) -> Result<LicenseExpression, ExpressionError> {
        match self.next() {
            Some(Token::Ident(id)) => Ok(LicenseExpression::License(id)),
            Some(Token::Open) => {
                let inner = self.or()?;
                if !self.eat(&Token::Close) {
                    return Err(ExpressionError::UnclosedParen);
                }
                Ok(inner)
            }
            Some(other) => Err(ExpressionError::Unexpected(other.to_string())),
            None => Err(ExpressionError::Truncated(self.last_text())),
        }
    }
}
