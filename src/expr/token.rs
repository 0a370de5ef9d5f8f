use std::fmt;

use super::ExprError;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl CmpOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Two-character operators first so `==` and `>=` never split.
const OPERATORS: [(&str, CmpOp); 6] = [
    ("!=", CmpOp::Ne),
    ("==", CmpOp::Eq),
    (">=", CmpOp::Ge),
    ("<=", CmpOp::Le),
    (">", CmpOp::Gt),
    ("<", CmpOp::Lt),
];

const KEYWORDS: [(&str, Token); 2] = [("AND", Token::And), ("OR", Token::Or)];

/// A lexical unit of a condition expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier, number, `true`/`false`/`null`, or a quoted string with
    /// its quotes (and doubled-quote escapes) kept verbatim.
    Literal(String),
    Op(CmpOp),
    And,
    Or,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "'{}'", text),
            Token::Op(op) => write!(f, "'{}'", op),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

/// Split an expression into tokens.
///
/// Fails when the source holds no tokens at all or when a quoted literal is
/// never closed.
///
/// ```
/// use vld_spec::expr::{tokenize, CmpOp, Token};
///
/// let tokens = tokenize("android == 'it''s' or(x)").unwrap();
/// assert_eq!(tokens, vec![
///     Token::Literal("android".into()),
///     Token::Op(CmpOp::Eq),
///     Token::Literal("'it''s'".into()),
///     Token::Or,
///     Token::LParen,
///     Token::Literal("x".into()),
///     Token::RParen,
/// ]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        pos: 0,
    };
    let tokens = lexer.run()?;
    if tokens.is_empty() {
        return Err(ExprError::new("empty expression"));
    }
    Ok(tokens)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn run(&mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();
        while let Some(&ch) = self.chars.get(self.pos) {
            if ch.is_whitespace() {
                self.pos += 1;
            } else if ch == '(' {
                tokens.push(Token::LParen);
                self.pos += 1;
            } else if ch == ')' {
                tokens.push(Token::RParen);
                self.pos += 1;
            } else if let Some((op, width)) = self.operator_at(self.pos) {
                tokens.push(Token::Op(op));
                self.pos += width;
            } else if let Some((keyword, width)) = self.keyword_at(self.pos) {
                tokens.push(keyword);
                self.pos += width;
            } else if ch == '"' || ch == '\'' {
                tokens.push(self.quoted(ch)?);
            } else {
                tokens.push(self.bare());
            }
        }
        Ok(tokens)
    }

    fn starts_with(&self, pos: usize, text: &str, ignore_case: bool) -> bool {
        let mut idx = pos;
        for expected in text.chars() {
            match self.chars.get(idx) {
                Some(&c) if c == expected => {}
                Some(&c) if ignore_case && c.eq_ignore_ascii_case(&expected) => {}
                _ => return false,
            }
            idx += 1;
        }
        true
    }

    fn operator_at(&self, pos: usize) -> Option<(CmpOp, usize)> {
        OPERATORS
            .iter()
            .find(|(text, _)| self.starts_with(pos, text, false))
            .map(|(text, op)| (*op, text.len()))
    }

    /// `AND`/`OR` in any case, bounded on both sides by input edges,
    /// whitespace or parentheses.
    fn keyword_at(&self, pos: usize) -> Option<(Token, usize)> {
        if pos > 0 && !is_boundary(self.chars[pos - 1]) {
            return None;
        }
        KEYWORDS.iter().find_map(|(text, token)| {
            let end = pos + text.len();
            let bounded = self.chars.get(end).map_or(true, |&c| is_boundary(c));
            if bounded && self.starts_with(pos, text, true) {
                Some((token.clone(), text.len()))
            } else {
                None
            }
        })
    }

    fn quoted(&mut self, quote: char) -> Result<Token, ExprError> {
        let start = self.pos;
        let mut text = String::from(quote);
        self.pos += 1;
        loop {
            match self.chars.get(self.pos) {
                None => {
                    return Err(ExprError::new(format!(
                        "unterminated string literal starting at position {}",
                        start
                    )))
                }
                Some(&c) if c == quote => {
                    if self.chars.get(self.pos + 1) == Some(&quote) {
                        text.push(quote);
                        text.push(quote);
                        self.pos += 2;
                    } else {
                        text.push(quote);
                        self.pos += 1;
                        return Ok(Token::Literal(text));
                    }
                }
                Some(&c) => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn bare(&mut self) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.get(self.pos) {
            if c.is_whitespace() || c == '(' || c == ')' || self.operator_at(self.pos).is_some() {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        Token::Literal(text)
    }
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}
